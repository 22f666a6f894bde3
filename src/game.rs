//! Phase state machine: placement, firing rounds, movement and game over.

use alloc::vec::Vec;
use log::{debug, info};

use crate::common::{PlayerId, RuleError};
use crate::movement::{MoveOrder, MoveResolution};
use crate::rng::SeededRng;
use crate::state::{GameMode, GameState, Phase};

impl GameState {
    /// Confirm that `player` has finished placing.
    ///
    /// Two-player games go on to the second player's placement; against the
    /// AI the second fleet is placed at random and the first firing round
    /// starts straight away.
    pub fn complete_placement(
        &mut self,
        player: PlayerId,
        rng: &mut SeededRng,
    ) -> Result<Phase, RuleError> {
        let expected = match self.phase {
            Phase::PlacementP1 => PlayerId::First,
            Phase::PlacementP2 => PlayerId::Second,
            _ => return Err(RuleError::WrongPhase),
        };
        if player != expected {
            return Err(RuleError::NotYourTurn(player));
        }
        if !self.all_ships_placed(player) {
            return Err(RuleError::FleetIncomplete(player));
        }
        match (self.phase, self.mode) {
            (Phase::PlacementP1, GameMode::TwoPlayer) => {
                self.phase = Phase::PlacementP2;
            }
            (Phase::PlacementP1, GameMode::VsAi) => {
                self.auto_place_fleet(PlayerId::Second, rng)?;
                self.start_firing_round();
            }
            _ => self.start_firing_round(),
        }
        debug!("{} finished placement, phase now {:?}", player, self.phase);
        Ok(self.phase)
    }

    /// Side with live ships when the other has none.
    pub fn check_winner(&self) -> Option<PlayerId> {
        let first = self.player(PlayerId::First).has_live_ships();
        let second = self.player(PlayerId::Second).has_live_ships();
        match (first, second) {
            (true, false) => Some(PlayerId::First),
            (false, true) => Some(PlayerId::Second),
            _ => None,
        }
    }

    /// True once neither side has a live ship left to fire this round.
    pub fn firing_round_complete(&self) -> bool {
        PlayerId::ALL.iter().all(|&p| !self.has_unfired_ships(p))
    }

    /// Hand in `player`'s plan for the round. The plan must hold an order for
    /// every live ship. Once both plans are in they are resolved together and
    /// the resolution is returned.
    pub fn submit_movement(
        &mut self,
        player: PlayerId,
        orders: Vec<MoveOrder>,
    ) -> Result<Option<MoveResolution>, RuleError> {
        if self.winner.is_some() {
            return Err(RuleError::GameOver);
        }
        if !self.phase.is_movement() {
            return Err(RuleError::WrongPhase);
        }
        if self.has_submitted_plan(player) {
            return Err(RuleError::PlanAlreadySubmitted(player));
        }
        if let Some(missing) = self
            .player(player)
            .live_ships()
            .find(|s| !orders.iter().any(|o| o.ship == s.uid()))
        {
            return Err(RuleError::IncompletePlan(missing.uid()));
        }
        self.pending_orders[player.index()] = Some(orders);

        match (
            self.pending_orders[PlayerId::First.index()].take(),
            self.pending_orders[PlayerId::Second.index()].take(),
        ) {
            (Some(first), Some(second)) => self.resolve_movement(&first, &second).map(Some),
            (first, second) => {
                self.phase = if first.is_some() {
                    Phase::MovementP2
                } else {
                    Phase::MovementP1
                };
                self.pending_orders = [first, second];
                Ok(None)
            }
        }
    }

    /// Drop every player's ephemeral hits and impact markers.
    pub fn clear_ephemeral(&mut self) {
        for player in self.players.iter_mut() {
            player.clear_ephemeral();
        }
    }

    /// Round housekeeping after movement: bump the round, reset fired sets
    /// and ephemeral markers, and start the next firing round.
    pub(crate) fn finish_round(&mut self) {
        self.round += 1;
        for fired in self.fired.iter_mut() {
            fired.clear();
        }
        self.clear_ephemeral();
        if self.rules.clear_misses_each_round {
            for player in self.players.iter_mut() {
                player.misses.clear_all();
            }
        }
        self.pending_orders = [None, None];
        if self.winner.is_some() {
            self.phase = Phase::GameOver;
            self.turn = None;
        } else {
            self.start_firing_round();
        }
    }

    fn start_firing_round(&mut self) {
        self.turn = PlayerId::ALL
            .iter()
            .copied()
            .find(|&p| self.has_unfired_ships(p));
        self.phase = match self.turn {
            Some(p) => Phase::firing_for(p),
            None => Phase::MovementP1,
        };
        info!("round {} firing begins", self.round);
    }

    /// Win check and turn hand-off after a salvo.
    pub(crate) fn after_salvo(&mut self, attacker: PlayerId) {
        if let Some(winner) = self.check_winner() {
            info!("{} wins in round {}", winner, self.round);
            self.winner = Some(winner);
            self.phase = Phase::GameOver;
            self.turn = None;
            return;
        }
        self.turn = self.next_firing_player(attacker);
        self.phase = match self.turn {
            Some(p) => Phase::firing_for(p),
            None => {
                debug!("round {} firing complete", self.round);
                Phase::MovementP1
            }
        };
    }
}
