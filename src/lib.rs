#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod ai;
mod bitboard;
mod common;
mod config;
mod coord;
#[cfg(feature = "std")]
mod driver;
mod firing;
mod game;
#[cfg(feature = "std")]
mod logging;
mod movement;
mod placement;
mod player;
mod player_ai;
#[cfg(feature = "std")]
mod player_cli;
pub mod prelude;
mod rng;
mod ship;
mod state;
mod view;

pub use ai::{calc_pdf, plan_salvo, Pdf};
pub use bitboard::{BitBoard, BitBoardError, CellSet};
pub use common::*;
pub use config::*;
pub use coord::*;
#[cfg(feature = "std")]
pub use driver::{GameDriver, MatchReport, SeatReport};
pub use firing::{salvo_cells, SalvoOrder};
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use movement::{MoveOrder, MoveResolution};
pub use player::Player;
pub use player_ai::AiPlayer;
#[cfg(feature = "std")]
pub use player_cli::{coord_to_string, parse_coord, print_player_view, CliPlayer};
pub use rng::SeededRng;
pub use ship::*;
pub use state::*;
pub use view::{PlayerView, ShipView};
