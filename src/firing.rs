//! Salvo targeting, damage resolution and turn order within a firing round.

use alloc::vec::Vec;
use log::{debug, info};

use crate::common::{PlayerId, RuleError};
use crate::coord::{Coord, Orientation};
use crate::ship::{HitOutcome, ShipUid};
use crate::state::{BoardSide, GameState, ImpactMarker, ShotResult};

/// A chosen salvo: which ship fires, where, and along which axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SalvoOrder {
    pub ship: ShipUid,
    pub target: Coord,
    pub orientation: Orientation,
}

/// Cells struck by a salvo of `guns` shells aimed at `target`. The run is
/// centred on the target along `orientation`, with the extra shell of an even
/// salvo landing on the higher side. Off-board cells are kept; they just
/// cannot hit anything.
pub fn salvo_cells(target: Coord, orientation: Orientation, guns: usize) -> Vec<Coord> {
    let start = -(guns.saturating_sub(1) as i32 / 2);
    (0..guns as i32)
        .map(|i| target.step(orientation, start + i))
        .collect()
}

impl GameState {
    /// True when the ship exists, is placed and afloat, and has not fired
    /// this round.
    pub fn can_ship_fire(&self, uid: ShipUid) -> bool {
        match self.ship(uid) {
            Some(ship) => ship.is_alive() && !self.fired[uid.owner.index()].contains(&uid),
            None => false,
        }
    }

    /// Live ships of `player` that may still fire this round.
    pub fn unfired_ships(&self, player: PlayerId) -> Vec<ShipUid> {
        self.player(player)
            .live_ships()
            .map(|s| s.uid())
            .filter(|uid| !self.fired[player.index()].contains(uid))
            .collect()
    }

    pub fn has_unfired_ships(&self, player: PlayerId) -> bool {
        self.player(player)
            .live_ships()
            .any(|s| !self.fired[player.index()].contains(&s.uid()))
    }

    /// Who shoots after `current`: the opponent if they have a ship left to
    /// fire, else `current` again, else nobody and the firing round is over.
    pub fn next_firing_player(&self, current: PlayerId) -> Option<PlayerId> {
        let opponent = current.opponent();
        if self.has_unfired_ships(opponent) {
            Some(opponent)
        } else if self.has_unfired_ships(current) {
            Some(current)
        } else {
            None
        }
    }

    /// Fire every gun of `uid` at a run of cells through `target`.
    ///
    /// The salvo is all or nothing: a refused request changes nothing. On
    /// success each shell is resolved in order and logged, the ship is marked
    /// as fired, the win check runs and the turn passes on.
    pub fn fire_salvo(
        &mut self,
        attacker: PlayerId,
        uid: ShipUid,
        target: Coord,
        orientation: Orientation,
    ) -> Result<Vec<ShotResult>, RuleError> {
        if self.winner.is_some() {
            return Err(RuleError::GameOver);
        }
        if !self.phase.is_firing() {
            return Err(RuleError::WrongPhase);
        }
        if self.turn != Some(attacker) {
            return Err(RuleError::NotYourTurn(attacker));
        }
        if uid.owner != attacker {
            return Err(RuleError::NotOwner(uid));
        }
        if !target.in_bounds() {
            return Err(RuleError::OutOfBounds);
        }
        let guns = {
            let ship = self.ship(uid).ok_or(RuleError::UnknownShip(uid))?;
            if !ship.is_placed() {
                return Err(RuleError::ShipNotPlaced(uid));
            }
            if ship.is_sunk() {
                return Err(RuleError::ShipSunk(uid));
            }
            ship.template().guns()
        };
        if !self.can_ship_fire(uid) {
            debug!("{} already fired in round {}", uid, self.round);
            return Err(RuleError::AlreadyFired(uid));
        }

        let results: Vec<ShotResult> = salvo_cells(target, orientation, guns)
            .into_iter()
            .map(|cell| self.resolve_shell(attacker, uid, cell))
            .collect();
        self.shot_log.extend_from_slice(&results);
        self.fired[attacker.index()].insert(uid);
        debug!(
            "{} fired {} shells at {} ({} hits)",
            uid,
            results.len(),
            target,
            results.iter().filter(|r| r.hit).count()
        );

        self.after_salvo(attacker);
        Ok(results)
    }

    /// Resolve one shell against whatever enemy ship is afloat on `cell`.
    fn resolve_shell(&mut self, attacker: PlayerId, firing: ShipUid, cell: Coord) -> ShotResult {
        let defender = attacker.opponent();
        let mut result = ShotResult {
            round: self.round,
            attacker,
            defender,
            ship: firing,
            target: cell,
            hit: false,
            damage: 0,
            hit_ship: None,
            sunk_ship: None,
        };

        let struck = self
            .player(defender)
            .live_ships()
            .find_map(|s| s.segment_at(cell).map(|seg| (s.uid(), seg)));

        let Some((victim, segment)) = struck else {
            // off-board shells leave no mark
            self.player_mut(attacker).misses.insert(cell);
            return result;
        };

        let outcome = match self.player_mut(defender).ship_mut(victim) {
            Some(ship) => ship.apply_hit(segment),
            None => HitOutcome::Repeat,
        };
        result.hit = true;
        result.hit_ship = Some(victim);
        if outcome != HitOutcome::Repeat {
            result.damage = 1;
        }

        let shooter = self.player_mut(attacker);
        shooter.ephemeral_hits.insert(cell);
        shooter.add_marker(ImpactMarker {
            side: BoardSide::Target,
            ship: victim,
            cell,
        });
        self.player_mut(defender).add_marker(ImpactMarker {
            side: BoardSide::Own,
            ship: victim,
            cell,
        });

        if outcome == HitOutcome::Sunk {
            info!("{} sunk by {} at {}", victim, firing, cell);
            self.player_mut(attacker).record_destroyed(victim);
            result.sunk_ship = Some(victim);
        }
        result
    }
}
