//! Pawn moves and move generation
//!
//! Pawns move two cells straight or one cell diagonally. A single straight
//! step is only generated when it sets up a jump (an opponent pawn stands two
//! cells away in that direction) or when it lands on an opponent home base.
//! Plain single steps are dominated by double steps and are left out of both
//! path search and move listing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Board, CellId, Player, Step};
use crate::paths::VisitedSet;
use crate::wall::Wall;

// ============================================================================
// DIRECTIONS
// ============================================================================

/// Displacement kind of a move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
    NorthNorth,
    EastEast,
    SouthSouth,
    WestWest,
    NorthEast,
    SouthEast,
    SouthWest,
    NorthWest,
}

/// Single-cell directions, in generation order
pub const SINGLE_DIRECTIONS: [Direction; 4] =
    [Direction::North, Direction::East, Direction::South, Direction::West];

/// Diagonal directions, in generation order
pub const DIAGONAL_DIRECTIONS: [Direction; 4] = [
    Direction::NorthEast,
    Direction::SouthEast,
    Direction::SouthWest,
    Direction::NorthWest,
];

impl Direction {
    /// (drow, dcol) of the whole move
    pub fn offset(self) -> (i16, i16) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
            Direction::NorthNorth => (-2, 0),
            Direction::EastEast => (0, 2),
            Direction::SouthSouth => (2, 0),
            Direction::WestWest => (0, -2),
            Direction::NorthEast => (-1, 1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (1, -1),
            Direction::NorthWest => (-1, -1),
        }
    }

    pub fn from_offset(drow: i16, dcol: i16) -> Option<Self> {
        let dir = match (drow, dcol) {
            (-1, 0) => Direction::North,
            (0, 1) => Direction::East,
            (1, 0) => Direction::South,
            (0, -1) => Direction::West,
            (-2, 0) => Direction::NorthNorth,
            (0, 2) => Direction::EastEast,
            (2, 0) => Direction::SouthSouth,
            (0, -2) => Direction::WestWest,
            (-1, 1) => Direction::NorthEast,
            (1, 1) => Direction::SouthEast,
            (1, -1) => Direction::SouthWest,
            (-1, -1) => Direction::NorthWest,
            _ => return None,
        };
        Some(dir)
    }

    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::NorthEast | Direction::SouthEast | Direction::SouthWest | Direction::NorthWest
        )
    }

    pub fn is_double(self) -> bool {
        matches!(
            self,
            Direction::NorthNorth | Direction::EastEast | Direction::SouthSouth | Direction::WestWest
        )
    }

    /// Orthogonal unit step for straight moves
    pub fn straight_step(self) -> Option<Step> {
        match self {
            Direction::North | Direction::NorthNorth => Some(Step::North),
            Direction::East | Direction::EastEast => Some(Step::East),
            Direction::South | Direction::SouthSouth => Some(Step::South),
            Direction::West | Direction::WestWest => Some(Step::West),
            _ => None,
        }
    }

    /// The (vertical, horizontal) half-steps of a diagonal
    pub fn diagonal_steps(self) -> Option<(Step, Step)> {
        match self {
            Direction::NorthEast => Some((Step::North, Step::East)),
            Direction::SouthEast => Some((Step::South, Step::East)),
            Direction::SouthWest => Some((Step::South, Step::West)),
            Direction::NorthWest => Some((Step::North, Step::West)),
            _ => None,
        }
    }

    /// Double-step counterpart of a single step
    fn doubled(step: Step) -> Self {
        match step {
            Step::North => Direction::NorthNorth,
            Step::East => Direction::EastEast,
            Step::South => Direction::SouthSouth,
            Step::West => Direction::WestWest,
        }
    }
}

// ============================================================================
// MOVE
// ============================================================================

/// A pawn displacement, optionally bundled with a wall placement
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: CellId,
    pub to: CellId,
    pub wall: Option<Wall>,
}

impl Move {
    pub fn step(from: CellId, to: CellId) -> Self {
        Self { from, to, wall: None }
    }

    pub fn with_wall(from: CellId, to: CellId, wall: Wall) -> Self {
        Self { from, to, wall: Some(wall) }
    }

    /// Same displacement, different wall
    pub fn placing(&self, wall: Option<Wall>) -> Self {
        Self { wall, ..*self }
    }

    /// `None` when from/to are not one move apart
    pub fn direction(&self) -> Option<Direction> {
        let drow = self.to.row.checked_sub(self.from.row)?;
        let dcol = self.to.col.checked_sub(self.from.col)?;
        Direction::from_offset(drow, dcol)
    }

    /// Would `wall`, added to the current board, cut this move?
    pub fn is_blocked_by_wall(&self, wall: Wall, board: &Board) -> bool {
        !route_open(board, self, Some(wall))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)?;
        if let Some(wall) = self.wall {
            write!(f, " + {}", wall)?;
        }
        Ok(())
    }
}

// ============================================================================
// WALL CHECKS
// ============================================================================

fn edge_blocked(board: &Board, cell: CellId, step: Step, extra: Option<Wall>) -> bool {
    board.is_blocked(cell, step) || extra.is_some_and(|w| w.blocks(cell, step))
}

/// Is the displacement of `mv` free of walls (optionally with one extra wall)?
pub(crate) fn route_open(board: &Board, mv: &Move, extra: Option<Wall>) -> bool {
    let Some(direction) = mv.direction() else {
        return false;
    };

    if let Some((vertical, horizontal)) = direction.diagonal_steps() {
        // Either L-shaped route will do; each half-step is checked on its own
        let via = |first: Step, second: Step| {
            !edge_blocked(board, mv.from, first, extra)
                && !edge_blocked(board, mv.from.neighbor(first), second, extra)
        };
        return via(vertical, horizontal) || via(horizontal, vertical);
    }

    let Some(step) = direction.straight_step() else {
        return false;
    };
    if edge_blocked(board, mv.from, step, extra) {
        return false;
    }
    !direction.is_double() || !edge_blocked(board, mv.from.neighbor(step), step, extra)
}

// ============================================================================
// MOVE GENERATION
// ============================================================================

/// Legal destinations for the pawn at `from`.
///
/// `opponent` owns the home bases being sought and the pawns that can be
/// jumped toward. Order is stable: for each of N, E, S, W the double step
/// then the single step, followed by NE, SE, SW, NW.
pub fn generate_moves(board: &Board, from: CellId, opponent: Player) -> Vec<Move> {
    unvisited_moves(board, from, opponent, &VisitedSet::new(board))
}

/// `generate_moves` restricted to cells not yet in `visited`
pub(crate) fn unvisited_moves(
    board: &Board,
    from: CellId,
    opponent: Player,
    visited: &VisitedSet,
) -> Vec<Move> {
    let mut moves = Vec::with_capacity(12);
    if !board.contains(from) {
        return moves;
    }

    let enterable = |cell: CellId| {
        board.cell(cell).is_some_and(|c| !c.is_occupied() || c.is_home_of(opponent))
            && !visited.contains(board, cell)
    };

    for step in Step::ALL {
        let one = from.neighbor(step);
        let two = one.neighbor(step);
        if board.is_blocked(from, step) {
            continue;
        }

        if !board.is_blocked(one, step) && enterable(two) {
            let mv = Move::step(from, two);
            debug_assert_eq!(mv.direction(), Some(Direction::doubled(step)));
            moves.push(mv);
        }

        let sets_up_jump = board.pawn_at(two) == Some(opponent);
        if enterable(one) && (sets_up_jump || board.is_home_of(one, opponent)) {
            moves.push(Move::step(from, one));
        }
    }

    for direction in DIAGONAL_DIRECTIONS {
        let (drow, dcol) = direction.offset();
        let mv = Move::step(from, from.offset(drow, dcol));
        if enterable(mv.to) && route_open(board, &mv, None) {
            moves.push(mv);
        }
    }

    moves
}

impl Board {
    /// Moves for the pawn at `cell`, seeking `opponent`'s homes
    pub fn generate_moves(&self, cell: CellId, opponent: Player) -> Vec<Move> {
        generate_moves(self, cell, opponent)
    }
}

// ============================================================================
// TESTS
// ============================================================================
