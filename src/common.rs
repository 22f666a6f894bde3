//! Common types for the engine: player identity and rule violations.

use core::fmt;

use crate::ship::ShipUid;

/// One of the two seats at the table. The engine knows nothing about who sits
/// there, only the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerId {
    First,
    Second,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::First, PlayerId::Second];

    /// Index 0 or 1.
    pub fn index(self) -> usize {
        match self {
            PlayerId::First => 0,
            PlayerId::Second => 1,
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            PlayerId::First => PlayerId::Second,
            PlayerId::Second => PlayerId::First,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.index() + 1)
    }
}

/// Reasons an action was refused. A refused action never mutates state, so
/// the caller can simply re-prompt the same actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleError {
    /// No ship with this uid exists in the game.
    UnknownShip(ShipUid),
    /// The ship belongs to the other player.
    NotOwner(ShipUid),
    /// The ship has been sunk.
    ShipSunk(ShipUid),
    /// The ship has not been placed yet.
    ShipNotPlaced(ShipUid),
    /// The ship already fired this round.
    AlreadyFired(ShipUid),
    /// Footprint or target leaves the board.
    OutOfBounds,
    /// Footprint overlaps another ship of the same player.
    ShipOverlaps,
    /// Random placement gave up after its attempt budget.
    UnableToPlaceShip(ShipUid),
    /// Player tried to act outside of their turn.
    NotYourTurn(PlayerId),
    /// Action does not belong to the current phase.
    WrongPhase,
    /// Placement cannot be confirmed while ships are unplaced.
    FleetIncomplete(PlayerId),
    /// Movement plan is missing an order for a live ship.
    IncompletePlan(ShipUid),
    /// Player already submitted a plan this round.
    PlanAlreadySubmitted(PlayerId),
    /// The game has a winner.
    GameOver,
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleError::UnknownShip(uid) => write!(f, "No ship {} in this game", uid),
            RuleError::NotOwner(uid) => write!(f, "Ship {} belongs to the other player", uid),
            RuleError::ShipSunk(uid) => write!(f, "Ship {} has been sunk", uid),
            RuleError::ShipNotPlaced(uid) => write!(f, "Ship {} is not placed", uid),
            RuleError::AlreadyFired(uid) => write!(f, "Ship {} already fired this round", uid),
            RuleError::OutOfBounds => write!(f, "Position is off the board"),
            RuleError::ShipOverlaps => write!(f, "Ship placement overlaps with another ship"),
            RuleError::UnableToPlaceShip(uid) => write!(f, "Unable to place ship {}", uid),
            RuleError::NotYourTurn(p) => write!(f, "It is not {}'s turn", p),
            RuleError::WrongPhase => write!(f, "Action is not allowed in this phase"),
            RuleError::FleetIncomplete(p) => write!(f, "{} still has unplaced ships", p),
            RuleError::IncompletePlan(uid) => write!(f, "Movement plan has no order for {}", uid),
            RuleError::PlanAlreadySubmitted(p) => {
                write!(f, "{} already submitted a movement plan", p)
            }
            RuleError::GameOver => write!(f, "The game is over"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RuleError {}
