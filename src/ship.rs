//! Ship catalog entries and per-game ship instances.

use core::fmt;

use crate::common::PlayerId;
use crate::config::FLEET;
use crate::coord::{footprint, Coord, Orientation};

/// Stable key for a ship class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipClass {
    Scout,
    Destroyer,
    Cruiser,
    Battleship,
    Carrier,
}

impl ShipClass {
    /// Catalog entry for this class.
    pub fn template(self) -> &'static ShipTemplate {
        match FLEET.iter().find(|t| t.class == self) {
            Some(t) => t,
            None => unreachable!("every ship class has a catalog entry"),
        }
    }

    /// Lowercase key used in uids and CLI input.
    pub fn key(self) -> &'static str {
        match self {
            ShipClass::Scout => "scout",
            ShipClass::Destroyer => "destroyer",
            ShipClass::Cruiser => "cruiser",
            ShipClass::Battleship => "battleship",
            ShipClass::Carrier => "carrier",
        }
    }
}

/// Immutable description of a ship class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipTemplate {
    class: ShipClass,
    name: &'static str,
    size: usize,
    move_range: u32,
    guns: usize,
}

impl ShipTemplate {
    pub const fn new(
        class: ShipClass,
        name: &'static str,
        size: usize,
        move_range: u32,
        guns: usize,
    ) -> Self {
        Self {
            class,
            name,
            size,
            move_range,
            guns,
        }
    }

    pub fn class(&self) -> ShipClass {
        self.class
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of segments.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Manhattan budget per round.
    pub fn move_range(&self) -> u32 {
        self.move_range
    }

    /// Shells per salvo.
    pub fn guns(&self) -> usize {
        self.guns
    }
}

/// Game-wide ship identity: one ship per class per player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipUid {
    pub owner: PlayerId,
    pub class: ShipClass,
}

impl ShipUid {
    pub const fn new(owner: PlayerId, class: ShipClass) -> Self {
        Self { owner, class }
    }
}

impl fmt::Display for ShipUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}-{}", self.owner.index(), self.class.key())
    }
}

/// What a single shell did to a ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HitOutcome {
    /// The segment was already damaged.
    Repeat,
    /// A fresh segment was damaged.
    Damaged,
    /// The fresh damage finished the ship.
    Sunk,
}

/// A ship instance. Damage is tracked per segment index so it follows the
/// hull through moves and rotations.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ship {
    uid: ShipUid,
    template: &'static ShipTemplate,
    anchor: Coord,
    orientation: Orientation,
    hits: u16,
    placed: bool,
    sunk: bool,
}

impl Ship {
    /// Fresh, unplaced and undamaged ship.
    pub fn new(owner: PlayerId, template: &'static ShipTemplate) -> Self {
        Self {
            uid: ShipUid::new(owner, template.class()),
            template,
            anchor: Coord::new(0, 0),
            orientation: Orientation::Horizontal,
            hits: 0,
            placed: false,
            sunk: false,
        }
    }

    pub fn uid(&self) -> ShipUid {
        self.uid
    }

    pub fn owner(&self) -> PlayerId {
        self.uid.owner
    }

    pub fn template(&self) -> &'static ShipTemplate {
        self.template
    }

    pub fn size(&self) -> usize {
        self.template.size()
    }

    pub fn anchor(&self) -> Coord {
        self.anchor
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_placed(&self) -> bool {
        self.placed
    }

    pub fn is_sunk(&self) -> bool {
        self.sunk
    }

    /// Placed and still afloat: can fire, move and block.
    pub fn is_alive(&self) -> bool {
        self.placed && !self.sunk
    }

    /// Occupied cells at the current anchor and orientation.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + Clone {
        footprint(self.anchor, self.orientation, self.size())
    }

    /// Cells the hull would cover at another anchor/orientation.
    pub fn cells_at(
        &self,
        anchor: Coord,
        orientation: Orientation,
    ) -> impl Iterator<Item = Coord> + Clone {
        footprint(anchor, orientation, self.size())
    }

    /// Segment index occupying `cell`, if any.
    pub fn segment_at(&self, cell: Coord) -> Option<usize> {
        self.cells().position(|c| c == cell)
    }

    pub fn is_segment_damaged(&self, segment: usize) -> bool {
        segment < self.size() && self.hits & (1 << segment) != 0
    }

    /// Indices of damaged segments in ascending order.
    pub fn damaged_segments(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.size()).filter(move |&i| self.is_segment_damaged(i))
    }

    pub fn damage_count(&self) -> usize {
        self.hits.count_ones() as usize
    }

    /// Mark a segment damaged; sinks the ship once every segment is.
    /// Sinking is permanent.
    pub(crate) fn apply_hit(&mut self, segment: usize) -> HitOutcome {
        if segment >= self.size() || self.is_segment_damaged(segment) {
            return HitOutcome::Repeat;
        }
        self.hits |= 1 << segment;
        if self.damage_count() == self.size() {
            self.sunk = true;
            HitOutcome::Sunk
        } else {
            HitOutcome::Damaged
        }
    }

    /// Move the hull. Damage stays with the segments.
    pub(crate) fn set_position(&mut self, anchor: Coord, orientation: Orientation) {
        self.anchor = anchor;
        self.orientation = orientation;
    }

    pub(crate) fn mark_placed(&mut self) {
        self.placed = true;
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ uid: {}, anchor: {}, orientation: {:?}, hits: {}/{}, placed: {}, sunk: {} }}",
            self.uid,
            self.anchor,
            self.orientation,
            self.damage_count(),
            self.size(),
            self.placed,
            self.sunk,
        )
    }
}
