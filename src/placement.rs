//! Pre-battle ship placement.

use alloc::vec::Vec;
use log::debug;

use crate::common::{PlayerId, RuleError};
use crate::config::{BOARD_SIZE, PLACEMENT_ATTEMPTS};
use crate::coord::{footprint_in_bounds, Coord, Orientation};
use crate::rng::SeededRng;
use crate::ship::ShipUid;
use crate::state::GameState;

impl GameState {
    /// True when `ship` fits at `anchor` inside the board without touching
    /// another placed, unsunk ship of the same player. The ship's own current
    /// footprint never counts as an obstacle; the enemy fleet is ignored.
    pub fn can_place_ship(
        &self,
        player: PlayerId,
        ship: ShipUid,
        anchor: Coord,
        orientation: Orientation,
    ) -> bool {
        let Some(candidate) = self.player(player).ship(ship) else {
            return false;
        };
        if !footprint_in_bounds(anchor, orientation, candidate.size()) {
            return false;
        }
        let cells = candidate.cells_at(anchor, orientation);
        !self
            .player(player)
            .live_ships()
            .filter(|other| other.uid() != ship)
            .any(|other| cells.clone().any(|c| other.segment_at(c).is_some()))
    }

    /// Position a ship during setup. Nothing changes when the request is
    /// refused.
    pub fn place_ship(
        &mut self,
        player: PlayerId,
        uid: ShipUid,
        anchor: Coord,
        orientation: Orientation,
    ) -> Result<(), RuleError> {
        if !self.phase.is_placement() {
            return Err(RuleError::WrongPhase);
        }
        let ship = self
            .player(player)
            .ship(uid)
            .ok_or(RuleError::UnknownShip(uid))?;
        if ship.is_sunk() {
            return Err(RuleError::ShipSunk(uid));
        }
        if !footprint_in_bounds(anchor, orientation, ship.size()) {
            debug!("{} placement at {} {:?} leaves the board", uid, anchor, orientation);
            return Err(RuleError::OutOfBounds);
        }
        if !self.can_place_ship(player, uid, anchor, orientation) {
            debug!("{} placement at {} {:?} overlaps", uid, anchor, orientation);
            return Err(RuleError::ShipOverlaps);
        }
        let ship = self
            .player_mut(player)
            .ship_mut(uid)
            .ok_or(RuleError::UnknownShip(uid))?;
        ship.set_position(anchor, orientation);
        ship.mark_placed();
        debug!("{} placed at {} {:?}", uid, anchor, orientation);
        Ok(())
    }

    /// True when every ship of `player` has been placed.
    pub fn all_ships_placed(&self, player: PlayerId) -> bool {
        self.player(player).fleet().iter().all(|s| s.is_placed())
    }

    /// Sample a legal (anchor, orientation) for `uid`, giving up after
    /// [`PLACEMENT_ATTEMPTS`] tries.
    pub fn random_placement(
        &self,
        player: PlayerId,
        uid: ShipUid,
        rng: &mut SeededRng,
    ) -> Option<(Coord, Orientation)> {
        let len = self.player(player).ship(uid)?.size();
        if len > BOARD_SIZE {
            return None;
        }
        for _ in 0..PLACEMENT_ATTEMPTS {
            let orientation = if rng.coin() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (span_x, span_y) = match orientation {
                Orientation::Horizontal => (BOARD_SIZE - len + 1, BOARD_SIZE),
                Orientation::Vertical => (BOARD_SIZE, BOARD_SIZE - len + 1),
            };
            let anchor = Coord::new(rng.int(span_x) as i32, rng.int(span_y) as i32);
            if self.can_place_ship(player, uid, anchor, orientation) {
                return Some((anchor, orientation));
            }
        }
        None
    }

    /// Randomly place every still-unplaced ship of `player` in catalog order.
    /// Ships placed before a failure stay placed.
    pub fn auto_place_fleet(
        &mut self,
        player: PlayerId,
        rng: &mut SeededRng,
    ) -> Result<(), RuleError> {
        let pending: Vec<ShipUid> = self
            .player(player)
            .fleet()
            .iter()
            .filter(|s| !s.is_placed())
            .map(|s| s.uid())
            .collect();
        for uid in pending {
            let (anchor, orientation) = self
                .random_placement(player, uid, rng)
                .ok_or(RuleError::UnableToPlaceShip(uid))?;
            self.place_ship(player, uid, anchor, orientation)?;
        }
        Ok(())
    }
}
