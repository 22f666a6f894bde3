//! Board coordinates and footprint geometry.

use core::fmt;

use crate::config::BOARD_SIZE;

/// A cell on the board. Signed so that salvo cells and path steps that fall
/// off the edge can still be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// True when the cell lies on the game board.
    pub fn in_bounds(self) -> bool {
        self.index::<BOARD_SIZE>().is_some()
    }

    /// Flattened `y * N + x` key on an `N×N` grid, `None` when off the grid.
    pub fn index<const N: usize>(self) -> Option<usize> {
        let n = N as i32;
        if self.x < 0 || self.y < 0 || self.x >= n || self.y >= n {
            None
        } else {
            Some(self.y as usize * N + self.x as usize)
        }
    }

    /// Manhattan distance between two cells.
    pub fn manhattan(self, other: Coord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Shift by `delta` cells along the axis of `orientation`.
    pub fn step(self, orientation: Orientation, delta: i32) -> Coord {
        match orientation {
            Orientation::Horizontal => Coord::new(self.x + delta, self.y),
            Orientation::Vertical => Coord::new(self.x, self.y + delta),
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Orientation of a ship or salvo on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub const ALL: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];
}

/// Cells covered by a hull of `len` segments anchored at `anchor`. Segment
/// `i` sits `i` cells from the anchor along +x or +y.
pub fn footprint(
    anchor: Coord,
    orientation: Orientation,
    len: usize,
) -> impl Iterator<Item = Coord> + Clone {
    (0..len as i32).map(move |i| anchor.step(orientation, i))
}

/// True when every cell of the footprint is on the board.
pub fn footprint_in_bounds(anchor: Coord, orientation: Orientation, len: usize) -> bool {
    footprint(anchor, orientation, len).all(Coord::in_bounds)
}

/// Anchors visited when walking from `from` to `to`, x axis first and then y,
/// excluding both endpoints.
pub fn l_path(from: Coord, to: Coord) -> impl Iterator<Item = Coord> {
    let sx = (to.x - from.x).signum();
    let sy = (to.y - from.y).signum();
    let along_x = (1..from.x.abs_diff(to.x) as i32 + 1).map(move |i| Coord::new(from.x + sx * i, from.y));
    let along_y = (1..from.y.abs_diff(to.y) as i32 + 1).map(move |i| Coord::new(to.x, from.y + sy * i));
    along_x.chain(along_y).filter(move |c| *c != to)
}
