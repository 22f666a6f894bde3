mod common;

use battleship_maneuvers::{
    salvo_cells, BoardSide, Coord, Orientation, Phase, PlayerId, RuleError, ShipClass,
};
use common::{battle, uid};

const P1: PlayerId = PlayerId::First;
const P2: PlayerId = PlayerId::Second;

#[test]
fn test_salvo_cells_centering() {
    let t = Coord::new(5, 5);
    assert_eq!(salvo_cells(t, Orientation::Horizontal, 1), vec![t]);
    assert_eq!(
        salvo_cells(t, Orientation::Horizontal, 2),
        vec![Coord::new(5, 5), Coord::new(6, 5)]
    );
    assert_eq!(
        salvo_cells(t, Orientation::Vertical, 3),
        vec![Coord::new(5, 4), Coord::new(5, 5), Coord::new(5, 6)]
    );
    assert_eq!(
        salvo_cells(t, Orientation::Horizontal, 4),
        vec![Coord::new(4, 5), Coord::new(5, 5), Coord::new(6, 5), Coord::new(7, 5)]
    );
    // off-board cells are kept
    assert_eq!(salvo_cells(Coord::new(0, 0), Orientation::Horizontal, 5)[0], Coord::new(-2, 0));
}

#[test]
fn test_destroyer_sinks_scout_in_one_salvo() {
    let mut state = battle(
        &[(ShipClass::Destroyer, Coord::new(0, 8), Orientation::Horizontal)],
        &[(ShipClass::Scout, Coord::new(2, 2), Orientation::Horizontal)],
    );
    let destroyer = uid(P1, ShipClass::Destroyer);
    let scout = uid(P2, ShipClass::Scout);

    let results = state
        .fire_salvo(P1, destroyer, Coord::new(2, 2), Orientation::Horizontal)
        .unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.hit && r.hit_ship == Some(scout)));
    assert_eq!(results.iter().map(|r| r.damage).sum::<u32>(), 2);
    assert_eq!(results[1].sunk_ship, Some(scout));

    assert!(state.ship(scout).unwrap().is_sunk());
    assert_eq!(state.player(P1).destroyed(), &[scout]);
    assert_eq!(state.winner(), Some(P1));
    assert_eq!(state.phase(), Phase::GameOver);
    assert_eq!(
        state.fire_salvo(P2, scout, Coord::new(0, 8), Orientation::Horizontal),
        Err(RuleError::GameOver)
    );
}

#[test]
fn test_hit_markers_for_both_players() {
    let mut state = battle(
        &[(ShipClass::Destroyer, Coord::new(0, 8), Orientation::Horizontal)],
        &[(ShipClass::Cruiser, Coord::new(4, 4), Orientation::Vertical)],
    );
    let cruiser = uid(P2, ShipClass::Cruiser);
    let results = state
        .fire_salvo(P1, uid(P1, ShipClass::Destroyer), Coord::new(4, 4), Orientation::Horizontal)
        .unwrap();
    assert!(results[0].hit);
    assert!(!results[1].hit);

    let attacker = state.player(P1);
    assert!(attacker.ephemeral_hits().contains(Coord::new(4, 4)));
    assert!(attacker.misses().contains(Coord::new(5, 4)));
    assert_eq!(attacker.impact_markers().len(), 1);
    assert_eq!(attacker.impact_markers()[0].side, BoardSide::Target);

    let defender = state.player(P2);
    assert_eq!(defender.impact_markers().len(), 1);
    assert_eq!(defender.impact_markers()[0].side, BoardSide::Own);
    assert_eq!(defender.impact_markers()[0].ship, cruiser);
    assert!(state.ship(cruiser).unwrap().is_segment_damaged(0));
}

#[test]
fn test_repeat_hit_does_no_damage() {
    let mut state = battle(
        &[
            (ShipClass::Scout, Coord::new(0, 8), Orientation::Horizontal),
            (ShipClass::Destroyer, Coord::new(0, 9), Orientation::Horizontal),
        ],
        &[(ShipClass::Carrier, Coord::new(2, 2), Orientation::Horizontal)],
    );
    state
        .fire_salvo(P1, uid(P1, ShipClass::Scout), Coord::new(3, 2), Orientation::Horizontal)
        .unwrap();
    state
        .fire_salvo(P2, uid(P2, ShipClass::Carrier), Coord::new(9, 0), Orientation::Vertical)
        .unwrap();
    // turn returns to the first player: the carrier has no gun left this round
    assert_eq!(state.turn(), Some(P1));
    let results = state
        .fire_salvo(P1, uid(P1, ShipClass::Destroyer), Coord::new(3, 2), Orientation::Horizontal)
        .unwrap();
    assert!(results[0].hit);
    assert_eq!(results[0].damage, 0);
    assert_eq!(results[1].damage, 1);
    assert_eq!(state.ship(uid(P2, ShipClass::Carrier)).unwrap().damage_count(), 2);
}

#[test]
fn test_double_fire_rejected_without_side_effects() {
    let mut state = battle(
        &[
            (ShipClass::Destroyer, Coord::new(0, 8), Orientation::Horizontal),
            (ShipClass::Scout, Coord::new(0, 9), Orientation::Horizontal),
        ],
        &[(ShipClass::Battleship, Coord::new(3, 3), Orientation::Horizontal)],
    );
    let destroyer = uid(P1, ShipClass::Destroyer);
    let battleship = uid(P2, ShipClass::Battleship);

    state
        .fire_salvo(P1, destroyer, Coord::new(3, 3), Orientation::Horizontal)
        .unwrap();
    state
        .fire_salvo(P2, battleship, Coord::new(5, 0), Orientation::Horizontal)
        .unwrap();
    assert_eq!(state.turn(), Some(P1));

    let log_len = state.shot_log().len();
    let damage = state.ship(battleship).unwrap().damage_count();
    assert_eq!(
        state.fire_salvo(P1, destroyer, Coord::new(5, 3), Orientation::Horizontal),
        Err(RuleError::AlreadyFired(destroyer))
    );
    assert_eq!(state.shot_log().len(), log_len);
    assert_eq!(state.ship(battleship).unwrap().damage_count(), damage);
    assert_eq!(state.turn(), Some(P1));
}

#[test]
fn test_next_firing_player_alternates_then_ends() {
    let mut state = battle(
        &[(ShipClass::Scout, Coord::new(0, 0), Orientation::Horizontal)],
        &[(ShipClass::Scout, Coord::new(9, 8), Orientation::Vertical)],
    );
    assert_eq!(state.turn(), Some(P1));
    state
        .fire_salvo(P1, uid(P1, ShipClass::Scout), Coord::new(5, 5), Orientation::Horizontal)
        .unwrap();
    assert_eq!(state.next_firing_player(P1), Some(P2));
    assert_eq!(state.phase(), Phase::FiringP2);

    state
        .fire_salvo(P2, uid(P2, ShipClass::Scout), Coord::new(5, 5), Orientation::Horizontal)
        .unwrap();
    assert_eq!(state.next_firing_player(P2), None);
    assert!(state.firing_round_complete());
    assert_eq!(state.phase(), Phase::MovementP1);
    assert_eq!(state.turn(), None);
}

#[test]
fn test_fire_rejections() {
    let mut state = battle(
        &[(ShipClass::Scout, Coord::new(0, 0), Orientation::Horizontal)],
        &[(ShipClass::Scout, Coord::new(9, 8), Orientation::Vertical)],
    );
    let mine = uid(P1, ShipClass::Scout);
    let theirs = uid(P2, ShipClass::Scout);
    let sunk = uid(P1, ShipClass::Carrier);

    assert_eq!(
        state.fire_salvo(P2, theirs, Coord::new(0, 0), Orientation::Horizontal),
        Err(RuleError::NotYourTurn(P2))
    );
    assert_eq!(
        state.fire_salvo(P1, theirs, Coord::new(0, 0), Orientation::Horizontal),
        Err(RuleError::NotOwner(theirs))
    );
    assert_eq!(
        state.fire_salvo(P1, mine, Coord::new(10, 0), Orientation::Horizontal),
        Err(RuleError::OutOfBounds)
    );
    assert_eq!(
        state.fire_salvo(P1, sunk, Coord::new(4, 4), Orientation::Horizontal),
        Err(RuleError::ShipSunk(sunk))
    );
    assert!(state.shot_log().is_empty());
    assert!(state.can_ship_fire(mine));
    assert!(!state.can_ship_fire(sunk));
    assert_eq!(state.unfired_ships(P1), vec![mine]);
}

#[test]
fn test_shells_off_board_leave_no_mark() {
    let mut state = battle(
        &[(ShipClass::Battleship, Coord::new(0, 9), Orientation::Horizontal)],
        &[(ShipClass::Scout, Coord::new(9, 0), Orientation::Vertical)],
    );
    let results = state
        .fire_salvo(P1, uid(P1, ShipClass::Battleship), Coord::new(0, 0), Orientation::Horizontal)
        .unwrap();
    assert_eq!(results.len(), 5);
    assert!(results.iter().all(|r| !r.hit));
    assert_eq!(state.player(P1).misses().count_ones(), 3);
}
