use alloc::vec::Vec;

use crate::{
    common::{PlayerId, RuleError},
    firing::SalvoOrder,
    movement::{MoveOrder, MoveResolution},
    rng::SeededRng,
    state::{GameState, ShotResult},
};

/// Interface implemented by the different controllers of a seat.
///
/// A player only proposes actions; the engine decides whether they are legal.
pub trait Player {
    /// Place every ship of `me` on the board.
    fn place_fleet(
        &mut self,
        rng: &mut SeededRng,
        state: &mut GameState,
        me: PlayerId,
    ) -> Result<(), RuleError>;

    /// Choose the next salvo. Called only while it is `me`'s turn to fire.
    fn choose_salvo(&mut self, rng: &mut SeededRng, state: &GameState, me: PlayerId) -> SalvoOrder;

    /// One order per live ship for the coming movement resolution.
    fn plan_movement(&mut self, rng: &mut SeededRng, state: &GameState, me: PlayerId)
        -> Vec<MoveOrder>;

    /// Inform the player of the shells it just fired.
    fn handle_salvo_result(&mut self, _results: &[ShotResult]) {}

    /// Inform the player of the opponent's salvo against its fleet.
    fn handle_opponent_salvo(&mut self, _results: &[ShotResult]) {}

    /// Inform the player how the round's movement resolved.
    fn handle_movement(&mut self, _resolution: &MoveResolution) {}

    /// Inform the player that a proposed action was refused.
    fn handle_rejection(&mut self, _error: RuleError) {}
}
