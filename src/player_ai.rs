use alloc::vec::Vec;

use crate::{
    ai,
    common::{PlayerId, RuleError},
    coord::{Coord, Orientation},
    firing::SalvoOrder,
    movement::MoveOrder,
    rng::SeededRng,
    state::GameState,
};

use crate::player::Player;

/// Computer opponent: random placement and movement, density-guided salvos.
pub struct AiPlayer;

impl AiPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AiPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for AiPlayer {
    fn place_fleet(
        &mut self,
        rng: &mut SeededRng,
        state: &mut GameState,
        me: PlayerId,
    ) -> Result<(), RuleError> {
        state.auto_place_fleet(me, rng)
    }

    fn choose_salvo(&mut self, rng: &mut SeededRng, state: &GameState, me: PlayerId) -> SalvoOrder {
        match ai::plan_salvo(state, me, rng) {
            Some(order) => order,
            // nothing left to fire; the engine will refuse this
            None => SalvoOrder {
                ship: state.player(me).fleet()[0].uid(),
                target: Coord::new(0, 0),
                orientation: Orientation::Horizontal,
            },
        }
    }

    fn plan_movement(
        &mut self,
        rng: &mut SeededRng,
        state: &GameState,
        me: PlayerId,
    ) -> Vec<MoveOrder> {
        state.random_movement_plan(me, rng)
    }
}
