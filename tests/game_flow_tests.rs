mod common;

use battleship_maneuvers::{
    Coord, GameMode, GameState, MoveOrder, Orientation, Phase, PlayerId, RuleError, Rules,
    SeededRng, ShipClass, ShipUid,
};
use common::{battle, battle_with_rules, cease_fire, random_battle, uid};

const P1: PlayerId = PlayerId::First;
const P2: PlayerId = PlayerId::Second;

fn hold_all(state: &battleship_maneuvers::GameState, player: PlayerId) -> Vec<MoveOrder> {
    state.player(player).live_ships().map(MoveOrder::hold).collect()
}

/// First player wounds the cruiser, second player fires wide.
fn fired_round(rules: Rules) -> battleship_maneuvers::GameState {
    let mut state = battle_with_rules(
        &[(ShipClass::Destroyer, Coord::new(0, 0), Orientation::Horizontal)],
        &[(ShipClass::Cruiser, Coord::new(5, 5), Orientation::Horizontal)],
        rules,
    );
    state
        .fire_salvo(P1, uid(P1, ShipClass::Destroyer), Coord::new(5, 5), Orientation::Horizontal)
        .unwrap();
    state
        .fire_salvo(P2, uid(P2, ShipClass::Cruiser), Coord::new(9, 9), Orientation::Vertical)
        .unwrap();
    state
}

#[test]
fn test_round_lifecycle() {
    let mut state = fired_round(Rules::default());
    assert_eq!(state.phase(), Phase::MovementP1);
    assert_eq!(state.player(P1).ephemeral_hits().count_ones(), 2);
    assert_eq!(state.player(P2).misses().count_ones(), 2);
    assert_eq!(state.fired_this_round(P1).len(), 1);

    let first = hold_all(&state, P1);
    assert_eq!(state.submit_movement(P1, first), Ok(None));
    assert_eq!(state.phase(), Phase::MovementP2);
    assert!(state.has_submitted_plan(P1));

    let second = hold_all(&state, P2);
    let res = state.submit_movement(P2, second).unwrap().unwrap();
    assert_eq!(res.applied.len(), 2);
    assert!(res.rejected.is_empty());

    assert_eq!(state.round(), 2);
    for p in PlayerId::ALL {
        assert!(state.player(p).ephemeral_hits().is_empty());
        assert!(state.player(p).impact_markers().is_empty());
        assert!(state.fired_this_round(p).is_empty());
        assert!(state.player(p).misses().is_empty());
        assert!(!state.has_submitted_plan(p));
    }
    assert_eq!(state.phase(), Phase::FiringP1);
    assert_eq!(state.turn(), Some(P1));
    // damage and the log outlive the round
    assert_eq!(state.ship(uid(P2, ShipClass::Cruiser)).unwrap().damage_count(), 2);
    assert_eq!(state.shot_log().len(), 5);
}

#[test]
fn test_misses_kept_when_configured() {
    let mut state = fired_round(Rules {
        clear_misses_each_round: false,
    });
    let first = hold_all(&state, P1);
    let second = hold_all(&state, P2);
    state.resolve_movement(&first, &second).unwrap();
    assert_eq!(state.round(), 2);
    assert_eq!(state.player(P2).misses().count_ones(), 2);
    assert!(state.player(P1).ephemeral_hits().is_empty());
}

#[test]
fn test_submit_movement_errors() {
    let mut state = random_battle(9);
    assert_eq!(
        state.submit_movement(P1, Vec::new()),
        Err(RuleError::WrongPhase)
    );

    let mut state = fired_round(Rules::default());
    assert_eq!(
        state.submit_movement(P1, Vec::new()),
        Err(RuleError::IncompletePlan(uid(P1, ShipClass::Destroyer)))
    );
    assert!(!state.has_submitted_plan(P1));

    let orders = hold_all(&state, P1);
    state.submit_movement(P1, orders.clone()).unwrap();
    assert_eq!(
        state.submit_movement(P1, orders),
        Err(RuleError::PlanAlreadySubmitted(P1))
    );
}

#[test]
fn test_second_player_may_submit_first() {
    let mut state = fired_round(Rules::default());
    let second = hold_all(&state, P2);
    assert_eq!(state.submit_movement(P2, second), Ok(None));
    assert_eq!(state.phase(), Phase::MovementP1);
    let first = hold_all(&state, P1);
    assert!(state.submit_movement(P1, first).unwrap().is_some());
    assert_eq!(state.round(), 2);
}

/// Both fleets placed, then every ship of `loser` scuttled.
fn wrecked_fleet(loser: PlayerId) -> GameState {
    let mut rng = SeededRng::new(3);
    let mut state = GameState::new(GameMode::TwoPlayer);
    for p in PlayerId::ALL {
        state.auto_place_fleet(p, &mut rng).unwrap();
    }
    assert_eq!(state.check_winner(), None);
    let fleet: Vec<ShipUid> = state.player(loser).fleet().iter().map(|s| s.uid()).collect();
    for ship in fleet {
        state.scuttle(ship).unwrap();
    }
    state
}

#[test]
fn test_winner_detection_is_symmetric() {
    assert_eq!(wrecked_fleet(P2).check_winner(), Some(P1));
    assert_eq!(wrecked_fleet(P1).check_winner(), Some(P2));
}

#[test]
fn test_resolve_movement_outside_movement_phase_changes_nothing() {
    // before placement is confirmed the AI fleet is still in port
    let mut rng = SeededRng::new(11);
    let mut state = GameState::new(GameMode::VsAi);
    state.auto_place_fleet(P1, &mut rng).unwrap();
    assert_eq!(state.resolve_movement(&[], &[]), Err(RuleError::WrongPhase));
    assert_eq!(state.phase(), Phase::PlacementP1);
    assert_eq!(state.round(), 1);
    assert_eq!(state.turn(), None);
    assert!(!state.all_ships_placed(P2));
    state.complete_placement(P1, &mut rng).unwrap();
    assert!(state.all_ships_placed(P2));
    assert_eq!(state.phase(), Phase::FiringP1);

    // mid firing round
    let misses = state.player(P1).misses().count_ones();
    assert_eq!(state.resolve_movement(&[], &[]), Err(RuleError::WrongPhase));
    assert_eq!(state.phase(), Phase::FiringP1);
    assert_eq!(state.round(), 1);
    assert_eq!(state.player(P1).misses().count_ones(), misses);

    cease_fire(&mut state);
    assert!(state.resolve_movement(&[], &[]).is_ok());
    assert_eq!(state.round(), 2);
}

#[test]
fn test_resolve_movement_after_game_over_changes_nothing() {
    let mut state = battle(
        &[(ShipClass::Destroyer, Coord::new(0, 8), Orientation::Horizontal)],
        &[(ShipClass::Scout, Coord::new(2, 2), Orientation::Horizontal)],
    );
    state
        .fire_salvo(P1, uid(P1, ShipClass::Destroyer), Coord::new(2, 2), Orientation::Horizontal)
        .unwrap();
    assert_eq!(state.phase(), Phase::GameOver);
    let markers = state.player(P1).impact_markers().len();
    assert!(markers > 0);

    let hold = MoveOrder::hold(state.ship(uid(P1, ShipClass::Destroyer)).unwrap());
    assert_eq!(state.resolve_movement(&[hold], &[]), Err(RuleError::GameOver));
    assert_eq!(state.round(), 1);
    assert_eq!(state.phase(), Phase::GameOver);
    assert_eq!(state.winner(), Some(P1));
    assert_eq!(state.player(P1).impact_markers().len(), markers);
}

#[test]
fn test_second_player_can_win() {
    let mut state = battle(
        &[(ShipClass::Scout, Coord::new(0, 0), Orientation::Horizontal)],
        &[(ShipClass::Destroyer, Coord::new(5, 5), Orientation::Horizontal)],
    );
    state
        .fire_salvo(P1, uid(P1, ShipClass::Scout), Coord::new(9, 0), Orientation::Horizontal)
        .unwrap();
    let results = state
        .fire_salvo(P2, uid(P2, ShipClass::Destroyer), Coord::new(0, 0), Orientation::Horizontal)
        .unwrap();
    assert_eq!(results[1].sunk_ship, Some(uid(P1, ShipClass::Scout)));
    assert_eq!(state.winner(), Some(P2));
    assert_eq!(state.phase(), Phase::GameOver);
    assert_eq!(state.turn(), None);
    let orders = hold_all(&state, P2);
    assert_eq!(state.submit_movement(P2, orders), Err(RuleError::GameOver));
}

#[test]
fn test_view_shows_only_own_side() {
    let state = fired_round(Rules::default());
    let view = state.view(P1);
    assert_eq!(view.player, P1);
    assert_eq!(view.phase, Phase::MovementP1);
    assert_eq!(view.fleet.len(), 5);
    assert!(view.fleet.iter().all(|s| s.uid.owner == P1));
    assert_eq!(view.ephemeral_hits, vec![Coord::new(5, 5), Coord::new(6, 5)]);
    assert_eq!(view.impact_markers.len(), 2);
    let destroyer = view
        .fleet
        .iter()
        .find(|s| s.class == ShipClass::Destroyer)
        .unwrap();
    assert!(destroyer.fired_this_round);
    assert_eq!(destroyer.cells.len(), 3);

    let enemy = state.view(P2);
    let cruiser = enemy.fleet.iter().find(|s| s.class == ShipClass::Cruiser).unwrap();
    assert_eq!(cruiser.damaged_segments, vec![0, 1]);
    assert!(!cruiser.sunk);
}

#[test]
fn test_clear_ephemeral() {
    let mut state = fired_round(Rules::default());
    state.clear_ephemeral();
    for p in PlayerId::ALL {
        assert!(state.player(p).ephemeral_hits().is_empty());
        assert!(state.player(p).impact_markers().is_empty());
    }
    // only markers go; misses and damage stay
    assert_eq!(state.player(P2).misses().count_ones(), 2);
}
