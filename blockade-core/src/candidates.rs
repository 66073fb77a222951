//! Wall candidates next to pawn moves
//!
//! Heuristic support for listing "move + wall" turns: for a move along an
//! opponent's shortest path, propose the few walls that would sit across it.
//! Walls that would cut one of the mover's own shortest paths are dropped.
//! Proposals are not checked for legality here; `wall_placements_for_step`
//! runs every survivor through `check_wall_legality`.

use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use crate::board::{Board, BoardError, CellId, Player, Step};
use crate::legality::check_wall_legality;
use crate::moves::{Direction, Move};
use crate::paths::{
    find_all_opponent_shortest_paths, find_player_path_lengths, find_shortest_paths, Path,
};
use crate::wall::Wall;

// ============================================================================
// EDGE HELPERS
// ============================================================================

fn east_wall(board: &Board, cell: CellId) -> Option<Wall> {
    board.cell(cell).and_then(|c| c.east_wall)
}

fn south_wall(board: &Board, cell: CellId) -> Option<Wall> {
    board.cell(cell).and_then(|c| c.south_wall)
}

/// On the board with no east wall
fn east_open(board: &Board, cell: CellId) -> bool {
    board.cell(cell).is_some_and(|c| c.east_wall.is_none())
}

/// On the board with no south wall
fn south_open(board: &Board, cell: CellId) -> bool {
    board.cell(cell).is_some_and(|c| c.south_wall.is_none())
}

/// Both cells carry the same wall (one wall running through their shared corner)
fn same_wall(a: Option<Wall>, b: Option<Wall>) -> bool {
    a.is_some() && a == b
}

fn push_between(out: &mut Vec<Wall>, a: CellId, b: CellId) {
    if let Some(wall) = Wall::between(a, b) {
        out.push(wall);
    }
}

// ============================================================================
// ORTHOGONAL
// ============================================================================

/// Vertical walls across the east edge of `pos`
fn walls_east(board: &Board, pos: CellId, out: &mut Vec<Wall>) {
    let east = pos.neighbor(Step::East);
    if !board.contains(east) || !east_open(board, pos) {
        return;
    }
    let north = pos.neighbor(Step::North);
    let north_east = north.neighbor(Step::East);
    if east_open(board, north)
        && !same_wall(south_wall(board, north), south_wall(board, north_east))
    {
        push_between(out, pos, north);
    }
    let south = pos.neighbor(Step::South);
    if east_open(board, south) && !same_wall(south_wall(board, pos), south_wall(board, east)) {
        push_between(out, pos, south);
    }
}

/// Vertical walls across the west edge of `pos`
fn walls_west(board: &Board, pos: CellId, out: &mut Vec<Wall>) {
    let west = pos.neighbor(Step::West);
    if !east_open(board, west) {
        return;
    }
    let north = pos.neighbor(Step::North);
    let north_west = west.neighbor(Step::North);
    if east_open(board, north_west)
        && !same_wall(south_wall(board, north_west), south_wall(board, north))
    {
        push_between(out, west, north_west);
    }
    let south_west = west.neighbor(Step::South);
    if east_open(board, south_west) && !same_wall(south_wall(board, west), south_wall(board, pos)) {
        push_between(out, west, south_west);
    }
}

/// Horizontal walls across the north edge of `pos`
fn walls_north(board: &Board, pos: CellId, out: &mut Vec<Wall>) {
    let north = pos.neighbor(Step::North);
    if !south_open(board, north) {
        return;
    }
    let west = pos.neighbor(Step::West);
    let north_west = north.neighbor(Step::West);
    if south_open(board, north_west)
        && !same_wall(east_wall(board, west), east_wall(board, north_west))
    {
        push_between(out, north, north_west);
    }
    let north_east = north.neighbor(Step::East);
    if south_open(board, north_east) && !same_wall(east_wall(board, pos), east_wall(board, north)) {
        push_between(out, north, north_east);
    }
}

/// Horizontal walls across the south edge of `pos`
fn walls_south(board: &Board, pos: CellId, out: &mut Vec<Wall>) {
    let south = pos.neighbor(Step::South);
    if !board.contains(south) || !south_open(board, pos) {
        return;
    }
    let east = pos.neighbor(Step::East);
    if south_open(board, east) && !same_wall(east_wall(board, pos), east_wall(board, south)) {
        push_between(out, pos, east);
    }
    let west = pos.neighbor(Step::West);
    let south_west = south.neighbor(Step::West);
    if south_open(board, west) && !same_wall(east_wall(board, west), east_wall(board, south_west)) {
        push_between(out, pos, west);
    }
}

// ============================================================================
// DIAGONAL
// ============================================================================

/// Extend a half-blocked corner: wall from `pos` to its `(drow, dcol)` neighbour,
/// if neither covered edge is walled yet
fn extend(board: &Board, pos: CellId, drow: i16, dcol: i16, out: &mut Vec<Wall>) {
    let other = pos.offset(drow, dcol);
    let open = |cell| {
        if drow != 0 {
            east_open(board, cell)
        } else {
            south_open(board, cell)
        }
    };
    if open(pos) && open(other) {
        push_between(out, pos, other);
    }
}

/// Walls through the corner shared by a 2x2 block of cells
///
/// The four half-edges meeting at the corner decide the proposals: an open
/// corner gets a wall across each axis; a partly walled corner gets walls
/// extending the open half-edges away from it.
fn walls_at_corner(
    board: &Board,
    top_left: CellId,
    top_right: CellId,
    bottom_left: CellId,
    out: &mut Vec<Wall>,
) {
    if ![top_left, top_right, bottom_left].iter().all(|&c| board.contains(c)) {
        return;
    }
    let left = south_wall(board, top_left).is_some();
    let right = south_wall(board, top_right).is_some();
    let top = east_wall(board, top_left).is_some();
    let bottom = east_wall(board, bottom_left).is_some();

    match (left, right, top, bottom) {
        (false, false, false, false) => {
            push_between(out, top_left, top_right);
            push_between(out, top_left, bottom_left);
        }
        (true, _, _, true) => {
            extend(board, top_right, 0, 1, out);
            extend(board, top_left, -1, 0, out);
        }
        (_, true, true, _) => {
            extend(board, top_left, 0, -1, out);
            extend(board, bottom_left, 1, 0, out);
        }
        (true, _, true, _) => {
            extend(board, top_right, 0, 1, out);
            extend(board, bottom_left, 1, 0, out);
        }
        (_, true, _, true) => {
            extend(board, top_left, -1, 0, out);
            extend(board, top_left, 0, -1, out);
        }
        (true, _, _, _) => {
            push_between(out, top_left, bottom_left);
            extend(board, top_right, 0, 1, out);
        }
        (_, true, _, _) => {
            push_between(out, top_left, bottom_left);
            extend(board, top_left, 0, -1, out);
        }
        (_, _, true, _) => {
            push_between(out, top_left, top_right);
            extend(board, bottom_left, 1, 0, out);
        }
        (_, _, _, true) => {
            push_between(out, top_left, top_right);
            extend(board, top_left, -1, 0, out);
        }
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

fn geometric_walls(board: &Board, cell: CellId, direction: Direction, out: &mut Vec<Wall>) {
    let step = |s: Step| cell.neighbor(s);
    match direction {
        Direction::East => walls_east(board, cell, out),
        Direction::West => walls_west(board, cell, out),
        Direction::North => walls_north(board, cell, out),
        Direction::South => walls_south(board, cell, out),
        Direction::EastEast => {
            walls_east(board, step(Step::East), out);
            walls_east(board, cell, out);
        }
        Direction::WestWest => {
            walls_west(board, step(Step::West), out);
            walls_west(board, cell, out);
        }
        Direction::NorthNorth => {
            walls_north(board, step(Step::North), out);
            walls_north(board, cell, out);
        }
        Direction::SouthSouth => {
            walls_south(board, step(Step::South), out);
            walls_south(board, cell, out);
        }
        Direction::NorthWest => {
            walls_at_corner(board, cell.offset(-1, -1), step(Step::North), step(Step::West), out)
        }
        Direction::NorthEast => {
            walls_at_corner(board, step(Step::North), cell.offset(-1, 1), cell, out)
        }
        Direction::SouthWest => {
            walls_at_corner(board, step(Step::West), cell, cell.offset(1, -1), out)
        }
        Direction::SouthEast => {
            walls_at_corner(board, cell, step(Step::East), step(Step::South), out)
        }
    }
}

/// Walls across a move from `cell` in `direction` that leave `own_paths` open.
///
/// Distinct, in proposal order. A double step proposes walls at its far
/// half first.
pub fn candidate_walls(
    board: &Board,
    cell: CellId,
    direction: Direction,
    own_paths: &[Path],
) -> Vec<Wall> {
    let mut proposed = Vec::with_capacity(4);
    geometric_walls(board, cell, direction, &mut proposed);

    let mut seen = FxHashSet::default();
    proposed
        .into_iter()
        .filter(|&wall| seen.insert(wall))
        .filter(|&wall| !own_paths.iter().any(|p| p.is_blocked_by_wall(wall, board)))
        .collect()
}

/// `candidate_walls` for the displacement of `mv`
pub fn walls_for_move(board: &Board, mv: &Move, own_paths: &[Path]) -> Vec<Wall> {
    match mv.direction() {
        Some(direction) => candidate_walls(board, mv.from, direction, own_paths),
        None => Vec::new(),
    }
}

/// Copy of `board` with the pawn of `step` relocated
fn stepped_board(board: &Board, step: &Move) -> Result<Board, BoardError> {
    let player = board.pawn_at(step.from).ok_or(BoardError::NoPawn(step.from))?;
    let mut stepped = board.clone();
    stepped.clear_pawn(step.from)?;
    stepped.place_pawn(step.to, player)?;
    Ok(stepped)
}

/// Variants of `step` bundled with a wall across one of `opponent_paths`.
///
/// `own_paths` are the mover's shortest paths after the step. Every wall is
/// checked for legality on the board as it stands after the step. With no
/// surviving wall the bare step is returned, unless the relocated pawn itself
/// leaves some pawn without a path.
pub fn wall_placements_for_step(
    board: &Board,
    step: &Move,
    own_paths: &[Path],
    opponent_paths: &[Path],
) -> Result<Vec<Move>, BoardError> {
    let stepped = stepped_board(board, step)?;
    let bare = step.placing(None);

    let mut seen = FxHashSet::default();
    let mut moves = Vec::new();
    for opponent_move in opponent_paths.iter().flat_map(Path::moves) {
        for wall in walls_for_move(&stepped, opponent_move, own_paths) {
            if !seen.insert(wall) {
                continue;
            }
            match check_wall_legality(&stepped, wall, wall.anchor()) {
                Ok(()) => moves.push(bare.placing(Some(wall))),
                Err(reason) => debug!("skipping {} with {}: {}", bare, wall, reason),
            }
        }
    }

    if moves.is_empty() && find_player_path_lengths(&stepped).is_valid() {
        moves.push(bare);
    }
    Ok(moves)
}

/// Candidate turns for `player`: the first step of each shortest path of each
/// pawn, combined with walls across the opponent's shortest paths.
pub fn turn_moves(board: &Board, player: Player) -> Result<Vec<Move>, BoardError> {
    let opponent_paths = find_all_opponent_shortest_paths(board, player);

    let mut seen = FxHashSet::default();
    let mut moves = Vec::new();
    for pawn in board.pawns_of(player) {
        for path in find_shortest_paths(board, pawn) {
            let Some(first) = path.first() else {
                continue;
            };
            let stepped = stepped_board(board, first)?;
            let own_paths = find_shortest_paths(&stepped, first.to);
            for mv in wall_placements_for_step(board, first, &own_paths, &opponent_paths)? {
                if seen.insert(mv) {
                    moves.push(mv);
                }
            }
        }
    }

    if moves.is_empty() {
        warn!("no moves for {}", player);
    } else {
        debug!("{} candidate moves for {}", moves.len(), player);
    }
    Ok(moves)
}

impl Board {
    /// See `candidate_walls`
    pub fn candidate_walls(&self, cell: CellId, direction: Direction, own_paths: &[Path]) -> Vec<Wall> {
        candidate_walls(self, cell, direction, own_paths)
    }
}

// ============================================================================
// TESTS
// ============================================================================
