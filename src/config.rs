use crate::ship::{ShipClass, ShipTemplate};

pub const BOARD_SIZE: usize = 10;
pub const NUM_SHIPS: usize = 5;
pub static FLEET: [ShipTemplate; NUM_SHIPS] = [
    ShipTemplate::new(ShipClass::Scout, "Scout", 2, 5, 1),
    ShipTemplate::new(ShipClass::Destroyer, "Destroyer", 3, 4, 2),
    ShipTemplate::new(ShipClass::Cruiser, "Cruiser", 4, 3, 3),
    ShipTemplate::new(ShipClass::Battleship, "Battleship", 5, 2, 5),
    ShipTemplate::new(ShipClass::Carrier, "Carrier", 6, 1, 4),
];

/// Attempts the random placer makes per ship before giving up.
pub const PLACEMENT_ATTEMPTS: usize = 500;

/// Round cap used by the match driver when none is given.
pub const DEFAULT_MAX_ROUNDS: u32 = 200;

/// Ruleset switches that are a product choice rather than an invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Rules {
    /// Wipe every player's miss markers when a new round begins.
    pub clear_misses_each_round: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            clear_misses_each_round: true,
        }
    }
}
