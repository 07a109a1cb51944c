//! Fleet members and placed ship records.

use alloc::vec::Vec;
use core::fmt;

use crate::board::Position;
use crate::config::FLEET;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// One of the five fixed fleet members. Doubles as the ship's identity on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ShipKind {
    Carrier,
    Battleship,
    Cruiser,
    Submarine,
    Destroyer,
}

impl ShipKind {
    /// Stable lowercase identifier, e.g. `"carrier"`.
    pub const fn id(self) -> &'static str {
        match self {
            ShipKind::Carrier => "carrier",
            ShipKind::Battleship => "battleship",
            ShipKind::Cruiser => "cruiser",
            ShipKind::Submarine => "submarine",
            ShipKind::Destroyer => "destroyer",
        }
    }

    /// Ship's display name.
    pub const fn name(self) -> &'static str {
        match self {
            ShipKind::Carrier => "Carrier",
            ShipKind::Battleship => "Battleship",
            ShipKind::Cruiser => "Cruiser",
            ShipKind::Submarine => "Submarine",
            ShipKind::Destroyer => "Destroyer",
        }
    }

    /// Number of cells the ship occupies.
    pub const fn length(self) -> usize {
        match self {
            ShipKind::Carrier => 5,
            ShipKind::Battleship => 4,
            ShipKind::Cruiser => 3,
            ShipKind::Submarine => 3,
            ShipKind::Destroyer => 2,
        }
    }

    /// Look up a fleet member by its identifier, ignoring ASCII case.
    pub fn from_id(id: &str) -> Option<Self> {
        FLEET
            .iter()
            .copied()
            .find(|kind| kind.id().eq_ignore_ascii_case(id))
    }
}

impl fmt::Display for ShipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A ship placed on a board.
///
/// Everything except the hit counter is fixed at placement time; hits only
/// ever increase.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ship {
    kind: ShipKind,
    positions: Vec<Position>,
    orientation: Orientation,
    hits: usize,
}

impl Ship {
    pub(crate) fn new(kind: ShipKind, positions: Vec<Position>, orientation: Orientation) -> Self {
        Ship {
            kind,
            positions,
            orientation,
            hits: 0,
        }
    }

    pub fn kind(&self) -> ShipKind {
        self.kind
    }

    /// Cells occupied by the ship, starting at its anchor.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Anchor cell the ship was placed from.
    pub fn origin(&self) -> Position {
        self.positions[0]
    }

    pub fn size(&self) -> usize {
        self.kind.length()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Check if the ship is sunk (every segment hit).
    pub fn is_sunk(&self) -> bool {
        self.hits >= self.size()
    }

    pub(crate) fn register_hit(&mut self) {
        self.hits += 1;
    }
}
