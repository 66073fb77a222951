//! Wall value type
//!
//! A wall spans two adjacent cells. Vertical walls cover a cell and the one
//! below it and block both east edges; horizontal walls cover a cell and the
//! one to its right and block both south edges. The anchor is always the
//! top / left cell, so a wall value doubles as its own identity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{CellId, Step};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Wall {
    pub orientation: Orientation,
    anchor: CellId,
}

impl Wall {
    /// Wall on the east edges of `top` and the cell below it
    pub const fn vertical(top: CellId) -> Self {
        Self { orientation: Orientation::Vertical, anchor: top }
    }

    /// Wall on the south edges of `left` and the cell right of it
    pub const fn horizontal(left: CellId) -> Self {
        Self { orientation: Orientation::Horizontal, anchor: left }
    }

    /// Wall covering two adjacent cells given in any order
    pub fn between(a: CellId, b: CellId) -> Option<Self> {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        match (second.row - first.row, second.col - first.col) {
            (1, 0) => Some(Wall::vertical(first)),
            (0, 1) => Some(Wall::horizontal(first)),
            _ => None,
        }
    }

    pub fn anchor(&self) -> CellId {
        self.anchor
    }

    pub fn is_vertical(&self) -> bool {
        self.orientation == Orientation::Vertical
    }

    /// The two covered cells, anchor first; `None` if the second one falls
    /// outside the coordinate range
    pub fn positions(&self) -> Option<[CellId; 2]> {
        let second = match self.orientation {
            Orientation::Vertical => self.anchor.checked_offset(1, 0)?,
            Orientation::Horizontal => self.anchor.checked_offset(0, 1)?,
        };
        Some([self.anchor, second])
    }

    pub fn covers(&self, cell: CellId) -> bool {
        self.positions().is_some_and(|p| p.contains(&cell))
    }

    /// Would this wall block a unit step out of `cell`?
    pub fn blocks(&self, cell: CellId, step: Step) -> bool {
        match (self.orientation, step) {
            (Orientation::Vertical, Step::East) => self.covers(cell),
            (Orientation::Vertical, Step::West) => {
                cell.checked_offset(0, -1).is_some_and(|west| self.covers(west))
            }
            (Orientation::Horizontal, Step::South) => self.covers(cell),
            (Orientation::Horizontal, Step::North) => {
                cell.checked_offset(-1, 0).is_some_and(|north| self.covers(north))
            }
            _ => false,
        }
    }
}

/// `v:ROW,COL` or `h:ROW,COL`
impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.orientation {
            Orientation::Vertical => 'v',
            Orientation::Horizontal => 'h',
        };
        write!(f, "{}:{},{}", tag, self.anchor.row, self.anchor.col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected v:ROW,COL or h:ROW,COL but got {0:?}")]
pub struct ParseWallError(pub String);

impl FromStr for Wall {
    type Err = ParseWallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseWallError(s.to_string());
        let (tag, cell) = s.split_once(':').ok_or_else(err)?;
        let anchor: CellId = cell.parse().map_err(|_| err())?;
        match tag.trim().to_ascii_lowercase().as_str() {
            "v" | "vertical" => Ok(Wall::vertical(anchor)),
            "h" | "horizontal" => Ok(Wall::horizontal(anchor)),
            _ => Err(err()),
        }
    }
}
