use std::collections::BTreeSet;

use anyhow::bail;
use log::{debug, info};
use serde::Serialize;

use crate::{
    common::PlayerId,
    config::DEFAULT_MAX_ROUNDS,
    player::Player,
    rng::SeededRng,
    state::{GameState, Phase},
};

/// Refused requests tolerated from one seat before the match is abandoned.
const MAX_ATTEMPTS: usize = 100;

/// Per-seat totals of a finished (or abandoned) match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeatReport {
    pub salvos: usize,
    pub shells: usize,
    pub hits: usize,
    pub ships_destroyed: usize,
    pub ships_afloat: usize,
}

/// Summary of a match, suitable for JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchReport {
    pub winner: Option<PlayerId>,
    pub rounds: u32,
    pub first: SeatReport,
    pub second: SeatReport,
}

impl MatchReport {
    pub fn from_state(state: &GameState) -> Self {
        let seat = |p: PlayerId| {
            let shots = state.shot_log().iter().filter(|s| s.attacker == p);
            // a ship fires at most once per round
            let salvos: BTreeSet<_> = shots.clone().map(|s| (s.round, s.ship)).collect();
            SeatReport {
                salvos: salvos.len(),
                shells: shots.clone().count(),
                hits: shots.filter(|s| s.hit).count(),
                ships_destroyed: state.player(p).destroyed().len(),
                ships_afloat: state.player(p).live_ships().count(),
            }
        };
        Self {
            winner: state.winner(),
            rounds: state.round(),
            first: seat(PlayerId::First),
            second: seat(PlayerId::Second),
        }
    }
}

/// Runs one match by asking each seat's [`Player`] for actions and feeding
/// them through the engine.
pub struct GameDriver {
    players: [Box<dyn Player>; 2],
    state: GameState,
    max_rounds: u32,
}

impl GameDriver {
    pub fn new(first: Box<dyn Player>, second: Box<dyn Player>, state: GameState) -> Self {
        Self {
            players: [first, second],
            state,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    /// Abandon the match without a winner after this many rounds.
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Play from the current phase until game over or the round cap.
    pub fn run(&mut self, rng: &mut SeededRng) -> anyhow::Result<MatchReport> {
        while self.state.phase().is_placement() {
            self.play_placement(rng)?;
        }
        while self.state.phase() != Phase::GameOver && self.state.round() <= self.max_rounds {
            if self.state.phase().is_firing() {
                self.play_salvo(rng)?;
            } else if self.state.phase().is_movement() {
                self.play_movement(rng)?;
            } else {
                bail!("unexpected phase {:?}", self.state.phase());
            }
        }
        let mut report = MatchReport::from_state(&self.state);
        match report.winner {
            Some(w) => info!("match over: {} won after {} rounds", w, report.rounds),
            None => {
                // the counter already points at the round that never started
                report.rounds = report.rounds.min(self.max_rounds);
                info!("match abandoned after {} rounds", report.rounds);
            }
        }
        Ok(report)
    }

    fn play_placement(&mut self, rng: &mut SeededRng) -> anyhow::Result<()> {
        let seat = match self.state.phase() {
            Phase::PlacementP2 => PlayerId::Second,
            _ => PlayerId::First,
        };
        for _ in 0..MAX_ATTEMPTS {
            let placed = match self.players[seat.index()].place_fleet(rng, &mut self.state, seat) {
                Ok(()) => self.state.complete_placement(seat, rng),
                Err(e) => Err(e),
            };
            match placed {
                Ok(_) => return Ok(()),
                Err(e) => {
                    debug!("{} placement refused: {}", seat, e);
                    self.players[seat.index()].handle_rejection(e);
                }
            }
        }
        bail!("{} could not complete placement", seat)
    }

    fn play_salvo(&mut self, rng: &mut SeededRng) -> anyhow::Result<()> {
        let Some(shooter) = self.state.turn() else {
            bail!("firing phase without a shooter");
        };
        for _ in 0..MAX_ATTEMPTS {
            let order = self.players[shooter.index()].choose_salvo(rng, &self.state, shooter);
            match self
                .state
                .fire_salvo(shooter, order.ship, order.target, order.orientation)
            {
                Ok(results) => {
                    self.players[shooter.index()].handle_salvo_result(&results);
                    self.players[shooter.opponent().index()].handle_opponent_salvo(&results);
                    return Ok(());
                }
                Err(e) => {
                    debug!("{} salvo refused: {}", shooter, e);
                    self.players[shooter.index()].handle_rejection(e);
                }
            }
        }
        bail!("{} made {} refused salvo requests in a row", shooter, MAX_ATTEMPTS)
    }

    fn play_movement(&mut self, rng: &mut SeededRng) -> anyhow::Result<()> {
        for seat in PlayerId::ALL {
            if self.state.has_submitted_plan(seat) {
                continue;
            }
            let mut submitted = false;
            for _ in 0..MAX_ATTEMPTS {
                let orders = self.players[seat.index()].plan_movement(rng, &self.state, seat);
                match self.state.submit_movement(seat, orders) {
                    Ok(Some(resolution)) => {
                        for player in self.players.iter_mut() {
                            player.handle_movement(&resolution);
                        }
                        return Ok(());
                    }
                    Ok(None) => {
                        submitted = true;
                        break;
                    }
                    Err(e) => {
                        debug!("{} movement plan refused: {}", seat, e);
                        self.players[seat.index()].handle_rejection(e);
                    }
                }
            }
            if !submitted {
                bail!("{} could not submit a movement plan", seat);
            }
        }
        Ok(())
    }
}
