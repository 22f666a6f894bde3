//! The game state aggregate threaded through every rules call.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use crate::bitboard::CellSet;
use crate::common::{PlayerId, RuleError};
use crate::config::{Rules, FLEET};
use crate::coord::Coord;
use crate::movement::MoveOrder;
use crate::ship::{Ship, ShipUid};

/// Who sits in the second seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameMode {
    /// Second player is the AI; its fleet is placed automatically.
    VsAi,
    /// Two humans, e.g. hotseat on one device.
    TwoPlayer,
}

/// Phase of the game. The p1/p2 suffix says whose view is active; within a
/// firing round the actual shooter is tracked by [`GameState::turn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "snake_case"))]
pub enum Phase {
    PlacementP1,
    PlacementP2,
    FiringP1,
    FiringP2,
    MovementP1,
    MovementP2,
    GameOver,
}

impl Phase {
    pub fn is_placement(self) -> bool {
        matches!(self, Phase::PlacementP1 | Phase::PlacementP2)
    }

    pub fn is_firing(self) -> bool {
        matches!(self, Phase::FiringP1 | Phase::FiringP2)
    }

    pub fn is_movement(self) -> bool {
        matches!(self, Phase::MovementP1 | Phase::MovementP2)
    }

    /// Firing label for the player holding the turn.
    pub(crate) fn firing_for(player: PlayerId) -> Phase {
        match player {
            PlayerId::First => Phase::FiringP1,
            PlayerId::Second => Phase::FiringP2,
        }
    }
}

/// Which board a marker is drawn on, from the owning player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum BoardSide {
    /// The player's own fleet (damage decals).
    Own,
    /// The player's targeting view of the opponent.
    Target,
}

/// A hit marker that lives until the round ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpactMarker {
    pub side: BoardSide,
    pub ship: ShipUid,
    pub cell: Coord,
}

/// One shell of a salvo. Never modified once logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotResult {
    /// Round the salvo was fired in.
    pub round: u32,
    pub attacker: PlayerId,
    pub defender: PlayerId,
    pub ship: ShipUid,
    pub target: Coord,
    pub hit: bool,
    /// 1 when a previously undamaged segment was struck.
    pub damage: u32,
    pub hit_ship: Option<ShipUid>,
    pub sunk_ship: Option<ShipUid>,
}

/// Everything one player owns: fleet and targeting intel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    id: PlayerId,
    pub(crate) fleet: Vec<Ship>,
    pub(crate) misses: CellSet,
    pub(crate) ephemeral_hits: CellSet,
    pub(crate) impact_markers: Vec<ImpactMarker>,
    pub(crate) destroyed: Vec<ShipUid>,
}

impl PlayerState {
    /// Player with the full catalog fleet, unplaced.
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            fleet: FLEET.iter().map(|t| Ship::new(id, t)).collect(),
            misses: CellSet::new(),
            ephemeral_hits: CellSet::new(),
            impact_markers: Vec::new(),
            destroyed: Vec::new(),
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Fleet in catalog order.
    pub fn fleet(&self) -> &[Ship] {
        &self.fleet
    }

    pub fn ship(&self, uid: ShipUid) -> Option<&Ship> {
        self.fleet.iter().find(|s| s.uid() == uid)
    }

    pub(crate) fn ship_mut(&mut self, uid: ShipUid) -> Option<&mut Ship> {
        self.fleet.iter_mut().find(|s| s.uid() == uid)
    }

    /// Placed ships still afloat.
    pub fn live_ships(&self) -> impl Iterator<Item = &Ship> {
        self.fleet.iter().filter(|s| s.is_alive())
    }

    pub fn has_live_ships(&self) -> bool {
        self.live_ships().next().is_some()
    }

    /// Misses on this player's targeting view.
    pub fn misses(&self) -> &CellSet {
        &self.misses
    }

    /// Hits visible to this player until the round ends.
    pub fn ephemeral_hits(&self) -> &CellSet {
        &self.ephemeral_hits
    }

    pub fn impact_markers(&self) -> &[ImpactMarker] {
        &self.impact_markers
    }

    /// Enemy ships this player has sunk, in order.
    pub fn destroyed(&self) -> &[ShipUid] {
        &self.destroyed
    }

    pub(crate) fn add_marker(&mut self, marker: ImpactMarker) {
        if !self.impact_markers.contains(&marker) {
            self.impact_markers.push(marker);
        }
    }

    pub(crate) fn record_destroyed(&mut self, uid: ShipUid) {
        if !self.destroyed.contains(&uid) {
            self.destroyed.push(uid);
        }
    }

    pub(crate) fn clear_ephemeral(&mut self) {
        self.ephemeral_hits.clear_all();
        self.impact_markers.clear();
    }
}

/// Mutable aggregate of one game. Every rules operation is a method taking
/// `&self` or `&mut self`; a refused action leaves it untouched.
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) mode: GameMode,
    pub(crate) phase: Phase,
    pub(crate) round: u32,
    pub(crate) rules: Rules,
    pub(crate) players: [PlayerState; 2],
    pub(crate) fired: [BTreeSet<ShipUid>; 2],
    pub(crate) shot_log: Vec<ShotResult>,
    pub(crate) winner: Option<PlayerId>,
    pub(crate) turn: Option<PlayerId>,
    pub(crate) pending_orders: [Option<Vec<MoveOrder>>; 2],
}

impl GameState {
    /// New game in the first placement phase with default rules.
    pub fn new(mode: GameMode) -> Self {
        Self::with_rules(mode, Rules::default())
    }

    pub fn with_rules(mode: GameMode, rules: Rules) -> Self {
        Self {
            mode,
            phase: Phase::PlacementP1,
            round: 1,
            rules,
            players: [
                PlayerState::new(PlayerId::First),
                PlayerState::new(PlayerId::Second),
            ],
            fired: [BTreeSet::new(), BTreeSet::new()],
            shot_log: Vec::new(),
            winner: None,
            turn: None,
            pending_orders: [None, None],
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Round number, starting at 1.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn player(&self, id: PlayerId) -> &PlayerState {
        &self.players[id.index()]
    }

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> &mut PlayerState {
        &mut self.players[id.index()]
    }

    pub fn ship(&self, uid: ShipUid) -> Option<&Ship> {
        self.player(uid.owner).ship(uid)
    }

    pub(crate) fn ship_mut(&mut self, uid: ShipUid) -> Option<&mut Ship> {
        self.player_mut(uid.owner).ship_mut(uid)
    }

    /// Sink `uid` before the battle starts, so a scenario can be staged with
    /// only part of a fleet afloat. Nobody is credited with the kill.
    #[doc(hidden)]
    pub fn scuttle(&mut self, uid: ShipUid) -> Result<(), RuleError> {
        if !self.phase.is_placement() {
            return Err(RuleError::WrongPhase);
        }
        let ship = self.ship_mut(uid).ok_or(RuleError::UnknownShip(uid))?;
        for segment in 0..ship.size() {
            ship.apply_hit(segment);
        }
        Ok(())
    }

    /// Every placed, unsunk ship of both players.
    pub fn live_ships(&self) -> impl Iterator<Item = &Ship> {
        self.players.iter().flat_map(|p| p.live_ships())
    }

    /// Ships of `player` that already fired this round.
    pub fn fired_this_round(&self, player: PlayerId) -> &BTreeSet<ShipUid> {
        &self.fired[player.index()]
    }

    /// Append-only log of every shell fired.
    pub fn shot_log(&self) -> &[ShotResult] {
        &self.shot_log
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Player expected to fire next, while a firing round is running.
    pub fn turn(&self) -> Option<PlayerId> {
        self.turn
    }

    /// True once `player` has handed in this round's movement plan.
    pub fn has_submitted_plan(&self, player: PlayerId) -> bool {
        self.pending_orders[player.index()].is_some()
    }
}
