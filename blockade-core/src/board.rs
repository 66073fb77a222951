//! Grid board with pawns, home bases and east/south walls

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::BoardConfig;
use crate::moves::Move;
use crate::paths::find_player_path_lengths;
use crate::profiler::MoveProfiler;
use crate::wall::{Orientation, Wall};

/// Largest supported board edge
pub const MAX_DIMENSION: i16 = 64;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Player identity
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One = 0,
    Two = 1,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::One, Player::Two];

    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "player 1"),
            Player::Two => write!(f, "player 2"),
        }
    }
}

/// Grid coordinates (0-based row, column)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId {
    pub row: i16,
    pub col: i16,
}

impl CellId {
    pub const fn new(row: i16, col: i16) -> Self {
        Self { row, col }
    }

    /// Shifted cell, `None` past the `i16` range
    pub fn checked_offset(&self, drow: i16, dcol: i16) -> Option<CellId> {
        Some(CellId::new(self.row.checked_add(drow)?, self.col.checked_add(dcol)?))
    }

    /// Shifted cell, clamped to the `i16` range (clamped cells are never on a board)
    pub fn offset(&self, drow: i16, dcol: i16) -> CellId {
        CellId::new(self.row.saturating_add(drow), self.col.saturating_add(dcol))
    }

    /// Orthogonal neighbour (may lie off the board)
    pub fn neighbor(&self, step: Step) -> CellId {
        let (drow, dcol) = step.offset();
        self.offset(drow, dcol)
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected ROW,COL but got {0:?}")]
pub struct ParseCellError(pub String);

impl FromStr for CellId {
    type Err = ParseCellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s
            .trim_matches(|c| c == '(' || c == ')')
            .split_once(',')
            .ok_or_else(|| ParseCellError(s.to_string()))?;
        let row = row.trim().parse().map_err(|_| ParseCellError(s.to_string()))?;
        let col = col.trim().parse().map_err(|_| ParseCellError(s.to_string()))?;
        Ok(CellId::new(row, col))
    }
}

/// Unit orthogonal step
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    North,
    East,
    South,
    West,
}

impl Step {
    pub const ALL: [Step; 4] = [Step::North, Step::East, Step::South, Step::West];

    /// (drow, dcol); north is row - 1
    pub fn offset(self) -> (i16, i16) {
        match self {
            Step::North => (-1, 0),
            Step::East => (0, 1),
            Step::South => (1, 0),
            Step::West => (0, -1),
        }
    }
}

/// What stands on a cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupancy {
    #[default]
    Empty,
    Pawn(Player),
}

/// One grid square
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub occupancy: Occupancy,
    pub east_wall: Option<Wall>,
    pub south_wall: Option<Wall>,
    /// Home base owner, if any
    pub home_of: Option<Player>,
}

impl Cell {
    pub fn pawn(&self) -> Option<Player> {
        match self.occupancy {
            Occupancy::Pawn(player) => Some(player),
            Occupancy::Empty => None,
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.occupancy != Occupancy::Empty
    }

    pub fn is_east_blocked(&self) -> bool {
        self.east_wall.is_some()
    }

    pub fn is_south_blocked(&self) -> bool {
        self.south_wall.is_some()
    }

    pub fn is_home_of(&self, player: Player) -> bool {
        self.home_of == Some(player)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board dimensions {rows}x{cols} out of range (1..={})", MAX_DIMENSION)]
    BadDimensions { rows: i16, cols: i16 },

    #[error("cell {0} is not on the board")]
    OffBoard(CellId),

    #[error("wall {0} does not fit on the board")]
    WallOffBoard(Wall),

    #[error("wall {0} overlaps a wall already on the board")]
    WallOverlap(Wall),

    #[error("no pawn at {0}")]
    NoPawn(CellId),

    #[error("cell {cell} is already a home base of {owner}")]
    HomeTaken { cell: CellId, owner: Player },

    #[error("invalid home layout: {0}")]
    BadHomeLayout(String),
}

// ============================================================================
// BOARD
// ============================================================================

/// Board state (clone to run independent searches)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    rows: i16,
    cols: i16,

    /// Row-major cells
    cells: Vec<Cell>,

    /// Home bases per player, in insertion order
    homes: [Vec<CellId>; 2],
}

impl Board {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Empty board with no homes, pawns or walls
    pub fn new(rows: i16, cols: i16) -> Result<Self, BoardError> {
        if !(1..=MAX_DIMENSION).contains(&rows) || !(1..=MAX_DIMENSION).contains(&cols) {
            return Err(BoardError::BadDimensions { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::default(); rows as usize * cols as usize],
            homes: [Vec::new(), Vec::new()],
        })
    }

    /// Board laid out from config, every pawn standing on its own home base
    pub fn from_config(config: &BoardConfig) -> Result<Self, BoardError> {
        config.validate()?;
        let mut board = Board::new(config.rows, config.cols)?;
        for player in Player::ALL {
            for home in config.home_cells(player) {
                board.add_home(home, player)?;
                board.place_pawn(home, player)?;
            }
        }
        Ok(board)
    }

    /// Mark a cell as home base of `player`
    pub fn add_home(&mut self, cell: CellId, player: Player) -> Result<(), BoardError> {
        let slot = self.cell_mut(cell)?;
        match slot.home_of {
            Some(owner) => Err(BoardError::HomeTaken { cell, owner }),
            None => {
                slot.home_of = Some(player);
                self.homes[player.index()].push(cell);
                Ok(())
            }
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn rows(&self) -> i16 {
        self.rows
    }

    pub fn cols(&self) -> i16 {
        self.cols
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, cell: CellId) -> bool {
        (0..self.rows).contains(&cell.row) && (0..self.cols).contains(&cell.col)
    }

    /// Row-major index of a cell on the board
    pub fn index_of(&self, cell: CellId) -> Option<usize> {
        if self.contains(cell) {
            Some(cell.row as usize * self.cols as usize + cell.col as usize)
        } else {
            None
        }
    }

    pub fn cell(&self, cell: CellId) -> Option<&Cell> {
        self.index_of(cell).map(|i| &self.cells[i])
    }

    /// Bounds-checked lookup; `None` outside the grid
    pub fn position_at(&self, row: i16, col: i16) -> Option<&Cell> {
        self.cell(CellId::new(row, col))
    }

    fn cell_mut(&mut self, cell: CellId) -> Result<&mut Cell, BoardError> {
        match self.index_of(cell) {
            Some(i) => Ok(&mut self.cells[i]),
            None => Err(BoardError::OffBoard(cell)),
        }
    }

    /// Every cell id, row-major
    pub fn cell_ids(&self) -> impl Iterator<Item = CellId> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| CellId::new(row, col)))
    }

    pub fn homes(&self, player: Player) -> &[CellId] {
        &self.homes[player.index()]
    }

    pub fn is_home_of(&self, cell: CellId, player: Player) -> bool {
        self.cell(cell).is_some_and(|c| c.is_home_of(player))
    }

    pub fn pawn_at(&self, cell: CellId) -> Option<Player> {
        self.cell(cell).and_then(Cell::pawn)
    }

    /// Pawns in row-major order
    pub fn pawns(&self) -> impl Iterator<Item = (CellId, Player)> + '_ {
        self.cell_ids()
            .zip(self.cells.iter())
            .filter_map(|(id, cell)| cell.pawn().map(|player| (id, player)))
    }

    pub fn pawns_of(&self, player: Player) -> impl Iterator<Item = CellId> + '_ {
        self.pawns().filter(move |&(_, owner)| owner == player).map(|(id, _)| id)
    }

    /// Distinct walls, ordered by anchor cell (row-major), vertical first
    pub fn walls(&self) -> Vec<Wall> {
        let mut walls = Vec::new();
        for (id, cell) in self.cell_ids().zip(self.cells.iter()) {
            for wall in [cell.east_wall, cell.south_wall].into_iter().flatten() {
                if wall.anchor() == id {
                    walls.push(wall);
                }
            }
        }
        walls
    }

    /// Is the edge crossed by a unit step out of `cell` walled (or the board edge)?
    pub fn is_blocked(&self, cell: CellId, step: Step) -> bool {
        let target = cell.neighbor(step);
        let (Some(from), Some(to)) = (self.cell(cell), self.cell(target)) else {
            return true;
        };
        match step {
            Step::East => from.is_east_blocked(),
            Step::West => to.is_east_blocked(),
            Step::South => from.is_south_blocked(),
            Step::North => to.is_south_blocked(),
        }
    }

    // ========================================================================
    // MUTATION PRIMITIVES
    // ========================================================================

    /// Put a pawn on a cell, returning whoever stood there before
    pub fn place_pawn(&mut self, cell: CellId, player: Player) -> Result<Option<Player>, BoardError> {
        let slot = self.cell_mut(cell)?;
        let previous = slot.pawn();
        slot.occupancy = Occupancy::Pawn(player);
        Ok(previous)
    }

    /// Remove whatever pawn stands on a cell
    pub fn clear_pawn(&mut self, cell: CellId) -> Result<Option<Player>, BoardError> {
        let slot = self.cell_mut(cell)?;
        let previous = slot.pawn();
        slot.occupancy = Occupancy::Empty;
        Ok(previous)
    }

    /// Set the east (vertical) or south (horizontal) wall on both covered cells.
    ///
    /// Fails without touching the board if either edge is already walled.
    pub fn add_wall(&mut self, wall: Wall) -> Result<(), BoardError> {
        self.set_wall(wall, Some(wall))
    }

    /// Exact inverse of `add_wall` for the same wall value
    pub fn remove_wall(&mut self, wall: Wall) -> Result<(), BoardError> {
        self.set_wall(wall, None)
    }

    fn set_wall(&mut self, wall: Wall, value: Option<Wall>) -> Result<(), BoardError> {
        let positions = self.wall_positions(wall)?;
        if value.is_some() && self.wall_overlaps(wall) {
            return Err(BoardError::WallOverlap(wall));
        }
        for pos in positions {
            let cell = self.cell_mut(pos)?;
            let slot = match wall.orientation {
                Orientation::Vertical => &mut cell.east_wall,
                Orientation::Horizontal => &mut cell.south_wall,
            };
            if value.is_some() || *slot == Some(wall) {
                *slot = value;
            }
        }
        Ok(())
    }

    /// Covered cells of a wall that fits on the board
    fn wall_positions(&self, wall: Wall) -> Result<[CellId; 2], BoardError> {
        match wall.positions() {
            Some(positions) if positions.iter().all(|&p| self.contains(p)) => Ok(positions),
            _ => Err(BoardError::WallOffBoard(wall)),
        }
    }

    /// Is an edge covered by `wall` already walled?
    pub fn wall_overlaps(&self, wall: Wall) -> bool {
        wall.positions().into_iter().flatten().any(|pos| {
            self.cell(pos).is_some_and(|cell| match wall.orientation {
                Orientation::Vertical => cell.is_east_blocked(),
                Orientation::Horizontal => cell.is_south_blocked(),
            })
        })
    }

    // ========================================================================
    // MOVE EXECUTION
    // ========================================================================

    /// Relocate the pawn and insert the bundled wall.
    ///
    /// Returns the pawn displaced from the destination (only possible when a
    /// pawn lands on an occupied home base); pass it back to `undo_move`.
    pub fn make_move(
        &mut self,
        mv: &Move,
        profiler: &mut MoveProfiler,
    ) -> Result<Option<Player>, BoardError> {
        let timer = profiler.start_make();
        self.check_move_fits(mv)?;
        if let Some(wall) = mv.wall.filter(|&w| self.wall_overlaps(w)) {
            return Err(BoardError::WallOverlap(wall));
        }
        let player = self.pawn_at(mv.from).ok_or(BoardError::NoPawn(mv.from))?;

        self.clear_pawn(mv.from)?;
        let displaced = self.place_pawn(mv.to, player)?;
        if let Some(wall) = mv.wall {
            self.add_wall(wall)?;
        }
        profiler.stop_make(timer, mv);

        debug_assert!(
            find_player_path_lengths(self).is_valid(),
            "move {} broke the path invariant:\n{}",
            mv,
            self
        );
        Ok(displaced)
    }

    /// Exact inverse of `make_move`
    pub fn undo_move(
        &mut self,
        mv: &Move,
        displaced: Option<Player>,
        profiler: &mut MoveProfiler,
    ) -> Result<(), BoardError> {
        let timer = profiler.start_undo();
        self.check_move_fits(mv)?;
        let player = self.pawn_at(mv.to).ok_or(BoardError::NoPawn(mv.to))?;

        if let Some(wall) = mv.wall {
            self.remove_wall(wall)?;
        }
        match displaced {
            Some(previous) => self.place_pawn(mv.to, previous)?,
            None => self.clear_pawn(mv.to)?,
        };
        self.place_pawn(mv.from, player)?;
        profiler.stop_undo(timer, mv);
        Ok(())
    }

    fn check_move_fits(&self, mv: &Move) -> Result<(), BoardError> {
        for cell in [mv.from, mv.to] {
            if !self.contains(cell) {
                return Err(BoardError::OffBoard(cell));
            }
        }
        match mv.wall {
            Some(wall) => self.wall_positions(wall).map(|_| ()),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Just the walls
        for (id, cell) in self.cell_ids().zip(self.cells.iter()) {
            if cell.east_wall.is_some() {
                writeln!(f, "East wall at: {} {}", id.row, id.col)?;
            }
            if cell.south_wall.is_some() {
                writeln!(f, "South wall at: {} {}", id.row, id.col)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_board() -> Board {
        Board::new(5, 5).unwrap()
    }

    #[test]
    fn test_position_at_bounds() {
        let board = small_board();
        assert!(board.position_at(0, 0).is_some());
        assert!(board.position_at(4, 4).is_some());
        assert!(board.position_at(-1, 0).is_none());
        assert!(board.position_at(0, 5).is_none());
        assert!(board.position_at(5, 0).is_none());
    }

    #[test]
    fn test_bad_dimensions() {
        assert!(matches!(Board::new(0, 3), Err(BoardError::BadDimensions { .. })));
        assert!(Board::new(MAX_DIMENSION + 1, 3).is_err());
    }

    #[test]
    fn test_place_and_clear_pawn() {
        let mut board = small_board();
        let cell = CellId::new(2, 2);
        assert_eq!(board.place_pawn(cell, Player::One).unwrap(), None);
        assert_eq!(board.pawn_at(cell), Some(Player::One));

        // Never two pawns on one cell: the old one is handed back
        assert_eq!(board.place_pawn(cell, Player::Two).unwrap(), Some(Player::One));
        assert_eq!(board.pawns().count(), 1);

        assert_eq!(board.clear_pawn(cell).unwrap(), Some(Player::Two));
        assert_eq!(board.pawn_at(cell), None);
        assert!(board.place_pawn(CellId::new(9, 9), Player::One).is_err());
    }

    #[test]
    fn test_add_remove_vertical_wall() {
        let mut board = small_board();
        let before = board.clone();
        let wall = Wall::vertical(CellId::new(1, 1));
        board.add_wall(wall).unwrap();

        assert_eq!(board.cell(CellId::new(1, 1)).unwrap().east_wall, Some(wall));
        assert_eq!(board.cell(CellId::new(2, 1)).unwrap().east_wall, Some(wall));
        assert!(board.is_blocked(CellId::new(1, 1), Step::East));
        assert!(board.is_blocked(CellId::new(2, 2), Step::West));
        assert!(!board.is_blocked(CellId::new(3, 1), Step::East));
        assert_eq!(board.walls(), vec![wall]);

        board.remove_wall(wall).unwrap();
        assert_eq!(board, before);
    }

    #[test]
    fn test_add_remove_horizontal_wall() {
        let mut board = small_board();
        let wall = Wall::horizontal(CellId::new(0, 3));
        board.add_wall(wall).unwrap();
        assert!(board.is_blocked(CellId::new(0, 3), Step::South));
        assert!(board.is_blocked(CellId::new(1, 4), Step::North));
        assert!(!board.is_blocked(CellId::new(0, 2), Step::South));
        board.remove_wall(wall).unwrap();
        assert!(board.walls().is_empty());
    }

    #[test]
    fn test_wall_off_board_rejected() {
        let mut board = small_board();
        let wall = Wall::vertical(CellId::new(4, 0));
        assert_eq!(board.add_wall(wall), Err(BoardError::WallOffBoard(wall)));
        assert!(board.walls().is_empty());
    }

    #[test]
    fn test_overlapping_wall_rejected() {
        let mut board = small_board();
        let wall = Wall::vertical(CellId::new(1, 1));
        board.add_wall(wall).unwrap();
        let before = board.clone();

        // Shares the (2,1) east edge with the first wall
        let half = Wall::vertical(CellId::new(2, 1));
        assert_eq!(board.add_wall(half), Err(BoardError::WallOverlap(half)));
        assert_eq!(board, before);

        board.remove_wall(wall).unwrap();
        assert!(board.walls().is_empty());
        assert_eq!(board.cell(CellId::new(2, 1)).unwrap().east_wall, None);
    }

    #[test]
    fn test_offset_limits() {
        let cell = CellId::new(i16::MAX, i16::MIN);
        assert_eq!(cell.checked_offset(1, 0), None);
        assert_eq!(cell.checked_offset(0, -1), None);
        assert_eq!(cell.checked_offset(-1, 1), Some(CellId::new(i16::MAX - 1, i16::MIN + 1)));
        assert_eq!(cell.neighbor(Step::South), cell);
        assert!(small_board().is_blocked(cell, Step::South));
    }

    #[test]
    fn test_board_edges_block() {
        let board = small_board();
        assert!(board.is_blocked(CellId::new(0, 0), Step::North));
        assert!(board.is_blocked(CellId::new(0, 0), Step::West));
        assert!(!board.is_blocked(CellId::new(0, 0), Step::East));
    }

    #[test]
    fn test_standard_layout() {
        let board = Board::from_config(&BoardConfig::default()).unwrap();
        assert_eq!(board.homes(Player::One), &[CellId::new(10, 3), CellId::new(10, 7)]);
        assert_eq!(board.homes(Player::Two), &[CellId::new(3, 3), CellId::new(3, 7)]);
        assert_eq!(board.pawns_of(Player::One).count(), 2);
        assert_eq!(board.pawns_of(Player::Two).count(), 2);
        assert!(board.is_home_of(CellId::new(3, 7), Player::Two));
    }

    #[test]
    fn test_home_taken() {
        let mut board = small_board();
        board.add_home(CellId::new(0, 0), Player::One).unwrap();
        assert!(matches!(
            board.add_home(CellId::new(0, 0), Player::Two),
            Err(BoardError::HomeTaken { .. })
        ));
    }

    #[test]
    fn test_make_and_undo_move() {
        let mut board = Board::from_config(&BoardConfig::default()).unwrap();
        let before = board.clone();
        let mut profiler = MoveProfiler::default();
        let mv = Move::with_wall(
            CellId::new(10, 3),
            CellId::new(8, 3),
            Wall::horizontal(CellId::new(5, 5)),
        );

        let displaced = board.make_move(&mv, &mut profiler).unwrap();
        assert_eq!(displaced, None);
        assert_eq!(board.pawn_at(CellId::new(8, 3)), Some(Player::One));
        assert_eq!(board.pawn_at(CellId::new(10, 3)), None);
        assert_eq!(board.walls(), vec![Wall::horizontal(CellId::new(5, 5))]);

        board.undo_move(&mv, displaced, &mut profiler).unwrap();
        assert_eq!(board, before);
        assert_eq!(profiler.moves_made(), 1);
        assert_eq!(profiler.moves_undone(), 1);
    }

    #[test]
    fn test_make_move_onto_walled_edge_leaves_board() {
        let mut board = Board::from_config(&BoardConfig::default()).unwrap();
        board.add_wall(Wall::horizontal(CellId::new(5, 5))).unwrap();
        let before = board.clone();

        let wall = Wall::horizontal(CellId::new(5, 4));
        let mv = Move::with_wall(CellId::new(10, 3), CellId::new(8, 3), wall);
        assert_eq!(
            board.make_move(&mv, &mut MoveProfiler::default()),
            Err(BoardError::WallOverlap(wall))
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_make_move_without_pawn() {
        let mut board = small_board();
        let mv = Move::step(CellId::new(0, 0), CellId::new(0, 2));
        assert_eq!(
            board.make_move(&mv, &mut MoveProfiler::default()),
            Err(BoardError::NoPawn(CellId::new(0, 0)))
        );
    }

    #[test]
    fn test_parse_cell() {
        assert_eq!("3,4".parse::<CellId>().unwrap(), CellId::new(3, 4));
        assert_eq!("(0, 7)".parse::<CellId>().unwrap(), CellId::new(0, 7));
        assert!("3;4".parse::<CellId>().is_err());
    }

    #[test]
    fn test_display_lists_walls() {
        let mut board = small_board();
        board.add_wall(Wall::vertical(CellId::new(0, 0))).unwrap();
        let text = board.to_string();
        assert!(text.contains("East wall at: 0 0"));
        assert!(text.contains("East wall at: 1 0"));
    }
}
