//! Movement legality and simultaneous resolution of both players' plans.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;
use log::{debug, info};

use crate::bitboard::CellSet;
use crate::common::{PlayerId, RuleError};
use crate::coord::{footprint, l_path, Coord, Orientation};
use crate::rng::SeededRng;
use crate::ship::{Ship, ShipUid};
use crate::state::GameState;

/// One ship's order for the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveOrder {
    pub ship: ShipUid,
    pub anchor: Coord,
    pub orientation: Orientation,
    /// Stay in place. Still counts as the ship's order.
    pub skip: bool,
}

impl MoveOrder {
    pub fn new(ship: ShipUid, anchor: Coord, orientation: Orientation) -> Self {
        Self {
            ship,
            anchor,
            orientation,
            skip: false,
        }
    }

    /// Keep `ship` where it is.
    pub fn hold(ship: &Ship) -> Self {
        Self {
            ship: ship.uid(),
            anchor: ship.anchor(),
            orientation: ship.orientation(),
            skip: true,
        }
    }
}

/// Outcome of one resolution pass. Both lists are free of duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveResolution {
    pub applied: Vec<ShipUid>,
    pub rejected: Vec<ShipUid>,
}

fn push_unique(list: &mut Vec<ShipUid>, uid: ShipUid) {
    if !list.contains(&uid) {
        list.push(uid);
    }
}

impl GameState {
    /// Cells covered by every live ship of either player except `mover`.
    fn obstacles(&self, mover: ShipUid) -> CellSet {
        let mut blocked = CellSet::new();
        for ship in self.live_ships().filter(|s| s.uid() != mover) {
            for cell in ship.cells() {
                blocked.insert(cell);
            }
        }
        blocked
    }

    /// Whether `order` is a legal move for `player` against the current
    /// positions of all ships.
    ///
    /// A real move must stay within the ship's Manhattan budget, every
    /// intermediate hull position on the x-then-y walk (current orientation)
    /// must be on the board and clear, and the final hull (requested
    /// orientation) must be on the board and clear.
    pub fn can_move_ship(&self, player: PlayerId, order: &MoveOrder) -> bool {
        let Some(ship) = self.ship(order.ship) else {
            return false;
        };
        if order.ship.owner != player || !ship.is_alive() {
            return false;
        }
        if order.skip {
            return true;
        }
        if ship.anchor().manhattan(order.anchor) > ship.template().move_range() {
            return false;
        }
        let blocked = self.obstacles(order.ship);
        let clear = |anchor: Coord, orientation: Orientation| {
            ship.cells_at(anchor, orientation)
                .all(|c| c.in_bounds() && !blocked.contains(c))
        };
        l_path(ship.anchor(), order.anchor).all(|step| clear(step, ship.orientation()))
            && clear(order.anchor, order.orientation)
    }

    /// Apply both players' plans at once.
    ///
    /// Orders are checked against pre-move positions, then every live ship is
    /// laid out at its tentative position. Any two ships sharing a cell are
    /// both rejected and stay put; there is no priority between players.
    /// Afterwards the round ends: see [`GameState::finish_round`].
    ///
    /// Only allowed during a movement phase. A refused call changes nothing.
    pub fn resolve_movement(
        &mut self,
        orders_first: &[MoveOrder],
        orders_second: &[MoveOrder],
    ) -> Result<MoveResolution, RuleError> {
        if self.winner.is_some() {
            return Err(RuleError::GameOver);
        }
        if !self.phase.is_movement() {
            return Err(RuleError::WrongPhase);
        }
        let current: BTreeMap<ShipUid, (Coord, Orientation)> = self
            .live_ships()
            .map(|s| (s.uid(), (s.anchor(), s.orientation())))
            .collect();
        let mut tentative = current.clone();
        let mut submitted: Vec<ShipUid> = Vec::new();
        let mut seen: BTreeSet<ShipUid> = BTreeSet::new();
        let mut res = MoveResolution::default();

        for (player, orders) in [(PlayerId::First, orders_first), (PlayerId::Second, orders_second)] {
            for order in orders {
                let uid = order.ship;
                if uid.owner != player {
                    debug!("{} ignored order for foreign ship {}", player, uid);
                    continue;
                }
                if !seen.insert(uid) {
                    debug!("{} received more than one order", uid);
                    if let Some(&pos) = current.get(&uid) {
                        tentative.insert(uid, pos);
                    }
                    push_unique(&mut res.rejected, uid);
                    continue;
                }
                if self.can_move_ship(player, order) {
                    if !order.skip {
                        tentative.insert(uid, (order.anchor, order.orientation));
                    }
                    submitted.push(uid);
                } else {
                    debug!("{} cannot reach {} {:?}", uid, order.anchor, order.orientation);
                    push_unique(&mut res.rejected, uid);
                }
            }
        }

        let mut occupant: BTreeMap<Coord, ShipUid> = BTreeMap::new();
        for (&uid, &(anchor, orientation)) in &tentative {
            let size = self.ship(uid).map_or(0, |s| s.size());
            for cell in footprint(anchor, orientation, size) {
                match occupant.get(&cell) {
                    Some(&other) if other != uid => {
                        debug!("{} and {} collide at {}", other, uid, cell);
                        push_unique(&mut res.rejected, other);
                        push_unique(&mut res.rejected, uid);
                    }
                    Some(_) => {}
                    None => {
                        occupant.insert(cell, uid);
                    }
                }
            }
        }

        for uid in submitted {
            if res.rejected.contains(&uid) {
                continue;
            }
            if let (Some(&(anchor, orientation)), Some(ship)) =
                (tentative.get(&uid), self.ship_mut(uid))
            {
                ship.set_position(anchor, orientation);
            }
            push_unique(&mut res.applied, uid);
        }

        info!(
            "round {} movement: {} applied, {} rejected",
            self.round,
            res.applied.len(),
            res.rejected.len()
        );
        self.finish_round();
        Ok(res)
    }

    /// Every legal order for `uid` this round: holding position first, then
    /// each anchor in the Manhattan diamond with both orientations, row by
    /// row. Empty for ships that cannot move.
    pub fn movement_candidates(&self, uid: ShipUid) -> Vec<MoveOrder> {
        let Some(ship) = self.ship(uid).filter(|s| s.is_alive()) else {
            return Vec::new();
        };
        let mut candidates = Vec::new();
        candidates.push(MoveOrder::hold(ship));
        let range = ship.template().move_range() as i32;
        let origin = ship.anchor();
        for dy in -range..=range {
            let reach = range - dy.abs();
            for dx in -reach..=reach {
                let anchor = Coord::new(origin.x + dx, origin.y + dy);
                for orientation in Orientation::ALL {
                    if anchor == origin && orientation == ship.orientation() {
                        continue;
                    }
                    let order = MoveOrder::new(uid, anchor, orientation);
                    if self.can_move_ship(uid.owner, &order) {
                        candidates.push(order);
                    }
                }
            }
        }
        candidates
    }

    /// Uniform pick among [`GameState::movement_candidates`].
    pub fn random_move(&self, uid: ShipUid, rng: &mut SeededRng) -> Option<MoveOrder> {
        let candidates = self.movement_candidates(uid);
        rng.pick(&candidates).copied()
    }

    /// A random order for every live ship of `player`, in fleet order.
    pub fn random_movement_plan(&self, player: PlayerId, rng: &mut SeededRng) -> Vec<MoveOrder> {
        let ships: Vec<ShipUid> = self.player(player).live_ships().map(|s| s.uid()).collect();
        ships
            .into_iter()
            .filter_map(|uid| self.random_move(uid, rng))
            .collect()
    }
}
