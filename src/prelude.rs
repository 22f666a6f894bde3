//! Commonly used types and utilities for ease of import.

pub use crate::{
    AiPlayer, Coord, GameMode, GameState, MoveOrder, Orientation, Phase, Player, PlayerId,
    RuleError, SalvoOrder, SeededRng, ShipClass, ShipUid,
};

#[cfg(feature = "std")]
pub use crate::{print_player_view, CliPlayer, GameDriver, MatchReport};
