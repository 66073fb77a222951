//! Wall placement legality
//!
//! Cheap geometric checks run first (overlap, intersection, location), then
//! the expensive connectivity check: after the placement every pawn must
//! still reach every opponent home base. The trial placement is made on a
//! private copy of the board, so the caller's board is never touched.

use tracing::debug;

use crate::board::{Board, Cell, CellId};
use crate::paths::find_player_path_lengths;
use crate::wall::{Orientation, Wall};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WallLegalityError {
    #[error("walls cannot overlap")]
    Overlapping,

    #[error("walls cannot intersect")]
    Intersecting,

    #[error("invalid wall placement")]
    InvalidLocation,

    #[error("wall would cut a pawn off from an opponent home base")]
    MissingPath,
}

/// Does `wall` cross a perpendicular wall line through its middle corner?
///
/// Any walls on both sides count, so two walls meeting end to end at the
/// corner are crossed just like a single one.
fn intersects(board: &Board, wall: Wall) -> bool {
    let anchor = wall.anchor();
    let (beside, crossing): (CellId, fn(&Cell) -> Option<Wall>) = match wall.orientation {
        Orientation::Vertical => (anchor.offset(0, 1), |c| c.south_wall),
        Orientation::Horizontal => (anchor.offset(1, 0), |c| c.east_wall),
    };
    matches!(
        (board.cell(anchor).and_then(crossing), board.cell(beside).and_then(crossing)),
        (Some(_), Some(_))
    )
}

/// Decide whether `wall` may be placed, targeting the cell at `location`.
///
/// Checks short-circuit in order: overlap, intersection, location,
/// connectivity. `board` is left exactly as it was.
pub fn check_wall_legality(
    board: &Board,
    wall: Wall,
    location: CellId,
) -> Result<(), WallLegalityError> {
    let result = check(board, wall, location);
    if let Err(reason) = result {
        debug!("rejected {} at {}: {}", wall, location, reason);
    }
    result
}

fn check(board: &Board, wall: Wall, location: CellId) -> Result<(), WallLegalityError> {
    let fits = wall.positions().is_some_and(|p| p.iter().all(|&c| board.contains(c)));
    if !fits {
        return Err(WallLegalityError::InvalidLocation);
    }
    if board.wall_overlaps(wall) {
        return Err(WallLegalityError::Overlapping);
    }

    let mut trial = board.clone();
    trial
        .add_wall(wall)
        .map_err(|_| WallLegalityError::InvalidLocation)?;

    if intersects(&trial, wall) {
        return Err(WallLegalityError::Intersecting);
    }
    if !board.contains(location) {
        return Err(WallLegalityError::InvalidLocation);
    }
    if !find_player_path_lengths(&trial).is_valid() {
        return Err(WallLegalityError::MissingPath);
    }
    Ok(())
}

/// The walls of `candidates` that pass `check_wall_legality`, order kept
pub fn legal_walls(board: &Board, candidates: &[Wall]) -> Vec<Wall> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        candidates
            .par_iter()
            .copied()
            .filter(|&wall| check_wall_legality(board, wall, wall.anchor()).is_ok())
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        candidates
            .iter()
            .copied()
            .filter(|&wall| check_wall_legality(board, wall, wall.anchor()).is_ok())
            .collect()
    }
}

impl Board {
    /// See `check_wall_legality`
    pub fn check_wall_legality(&self, wall: Wall, location: CellId) -> Result<(), WallLegalityError> {
        check_wall_legality(self, wall, location)
    }
}
