//! Blockade Core - Pathfinding and wall legality engine
//!
//! This crate provides the rules engine for Blockade:
//! - Board model (grid cells, pawns, home bases, east/south walls)
//! - Pawn move generation (double steps, diagonals, jump-adjacent single steps)
//! - Breadth-first shortest paths from each pawn to every opponent home
//! - Wall legality (overlap, intersection, connectivity invariant)
//! - Heuristic wall candidates next to a pawn move

pub mod board;
pub mod wall;
pub mod moves;
pub mod paths;
pub mod legality;
pub mod candidates;
pub mod config;
pub mod profiler;

// Re-exports for convenient access
pub use board::{Board, BoardError, Cell, CellId, Occupancy, ParseCellError, Player, Step};
pub use wall::{Orientation, ParseWallError, Wall};
pub use moves::{generate_moves, Direction, Move};
pub use paths::{
    find_all_opponent_shortest_paths, find_player_path_lengths, find_shortest_paths, Path,
    PathLengths, PawnPaths, PlayerPathLengths, VisitedSet,
};
pub use legality::{check_wall_legality, legal_walls, WallLegalityError};
pub use candidates::{candidate_walls, turn_moves, wall_placements_for_step, walls_for_move};
pub use config::BoardConfig;
pub use profiler::MoveProfiler;
