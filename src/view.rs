//! Read-only snapshots handed to renderers.

use alloc::vec::Vec;

use crate::common::PlayerId;
use crate::coord::{Coord, Orientation};
use crate::ship::{Ship, ShipClass, ShipUid};
use crate::state::{GameState, ImpactMarker, Phase};

/// One ship of the viewer's own fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct ShipView {
    pub uid: ShipUid,
    pub class: ShipClass,
    pub name: &'static str,
    pub anchor: Coord,
    pub orientation: Orientation,
    pub cells: Vec<Coord>,
    pub damaged_segments: Vec<usize>,
    pub placed: bool,
    pub sunk: bool,
    pub fired_this_round: bool,
}

/// What one player is allowed to see.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct PlayerView {
    pub player: PlayerId,
    pub phase: Phase,
    pub round: u32,
    pub turn: Option<PlayerId>,
    pub fleet: Vec<ShipView>,
    pub misses: Vec<Coord>,
    pub ephemeral_hits: Vec<Coord>,
    pub impact_markers: Vec<ImpactMarker>,
    pub destroyed_enemies: Vec<ShipUid>,
    pub winner: Option<PlayerId>,
}

impl GameState {
    /// Snapshot of `player`'s side of the table. Enemy positions are not
    /// included.
    pub fn view(&self, player: PlayerId) -> PlayerView {
        let me = self.player(player);
        PlayerView {
            player,
            phase: self.phase(),
            round: self.round(),
            turn: self.turn(),
            fleet: me.fleet().iter().map(|s| self.ship_view(s)).collect(),
            misses: me.misses().iter_set_bits().collect(),
            ephemeral_hits: me.ephemeral_hits().iter_set_bits().collect(),
            impact_markers: me.impact_markers().to_vec(),
            destroyed_enemies: me.destroyed().to_vec(),
            winner: self.winner(),
        }
    }

    fn ship_view(&self, ship: &Ship) -> ShipView {
        ShipView {
            uid: ship.uid(),
            class: ship.template().class(),
            name: ship.template().name(),
            anchor: ship.anchor(),
            orientation: ship.orientation(),
            cells: ship.cells().collect(),
            damaged_segments: ship.damaged_segments().collect(),
            placed: ship.is_placed(),
            sunk: ship.is_sunk(),
            fired_this_round: self.fired_this_round(ship.owner()).contains(&ship.uid()),
        }
    }
}
