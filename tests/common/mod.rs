#![allow(dead_code)]

use std::collections::BTreeSet;

use battleship_maneuvers::{
    salvo_cells, Coord, GameMode, GameState, Orientation, Phase, PlayerId, Rules, SeededRng,
    ShipClass, ShipUid,
};

pub type Placement = (ShipClass, Coord, Orientation);

pub fn uid(owner: PlayerId, class: ShipClass) -> ShipUid {
    ShipUid::new(owner, class)
}

/// Two-player game in its first firing round where only the listed ships are
/// afloat. The rest of each fleet is placed at random and then sunk.
pub fn battle_with_rules(first: &[Placement], second: &[Placement], rules: Rules) -> GameState {
    let mut rng = SeededRng::new(7);
    let mut state = GameState::with_rules(GameMode::TwoPlayer, rules);
    for (player, ships) in [(PlayerId::First, first), (PlayerId::Second, second)] {
        for &(class, anchor, orientation) in ships {
            state
                .place_ship(player, uid(player, class), anchor, orientation)
                .unwrap();
        }
        state.auto_place_fleet(player, &mut rng).unwrap();
        let listed: Vec<ShipClass> = ships.iter().map(|p| p.0).collect();
        let extra: Vec<ShipUid> = state
            .player(player)
            .fleet()
            .iter()
            .map(|s| s.uid())
            .filter(|u| !listed.contains(&u.class))
            .collect();
        for ship in extra {
            state.scuttle(ship).unwrap();
        }
    }
    assert_eq!(
        state.complete_placement(PlayerId::First, &mut rng).unwrap(),
        Phase::PlacementP2
    );
    assert_eq!(
        state.complete_placement(PlayerId::Second, &mut rng).unwrap(),
        Phase::FiringP1
    );
    state
}

pub fn battle(first: &[Placement], second: &[Placement]) -> GameState {
    battle_with_rules(first, second, Rules::default())
}

/// Fleet placed at random for both sides, ready to fire.
pub fn random_battle(seed: u64) -> GameState {
    let mut rng = SeededRng::new(seed);
    let mut state = GameState::new(GameMode::TwoPlayer);
    state.auto_place_fleet(PlayerId::First, &mut rng).unwrap();
    state.complete_placement(PlayerId::First, &mut rng).unwrap();
    state.auto_place_fleet(PlayerId::Second, &mut rng).unwrap();
    state.complete_placement(PlayerId::Second, &mut rng).unwrap();
    state
}

/// Let every ship that still has to fire this round shoot into open water,
/// leaving the game in its movement phase with no damage done.
pub fn cease_fire(state: &mut GameState) {
    while let Some(shooter) = state.turn() {
        let ship = state.unfired_ships(shooter)[0];
        let guns = state.ship(ship).unwrap().template().guns();
        let enemy: BTreeSet<Coord> = state
            .player(shooter.opponent())
            .live_ships()
            .flat_map(|s| s.cells())
            .collect();
        let (target, orientation) = (0..10)
            .flat_map(|y| (0..10).map(move |x| Coord::new(x, y)))
            .flat_map(|t| Orientation::ALL.into_iter().map(move |o| (t, o)))
            .find(|&(t, o)| salvo_cells(t, o, guns).iter().all(|c| !enemy.contains(c)))
            .expect("no open water left to fire into");
        state.fire_salvo(shooter, ship, target, orientation).unwrap();
    }
    assert_eq!(state.phase(), Phase::MovementP1);
}

/// [`battle`] advanced past its first firing round.
pub fn maneuvers(first: &[Placement], second: &[Placement]) -> GameState {
    let mut state = battle(first, second);
    cease_fire(&mut state);
    state
}
