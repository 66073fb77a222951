//! Breadth-first shortest paths from a pawn to every opponent home base
//!
//! The search runs over move units (see `moves`), not raw cells. Each call
//! owns its `VisitedSet` and an arena of parent links, so searches never
//! touch the board and can run side by side on the same `&Board`.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{Board, CellId, Player};
use crate::moves::{unvisited_moves, Move};
use crate::wall::Wall;

// ============================================================================
// VISITED SET
// ============================================================================

/// Bitset over the cells of one board
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisitedSet {
    bits: Vec<u64>,
}

impl VisitedSet {
    pub fn new(board: &Board) -> Self {
        Self { bits: vec![0; board.num_cells().div_ceil(64)] }
    }

    /// Mark a cell; false if it was already marked or lies off the board
    pub fn insert(&mut self, board: &Board, cell: CellId) -> bool {
        let Some(i) = board.index_of(cell) else {
            return false;
        };
        let mask = 1u64 << (i % 64);
        let word = &mut self.bits[i / 64];
        let fresh = *word & mask == 0;
        *word |= mask;
        fresh
    }

    pub fn contains(&self, board: &Board, cell: CellId) -> bool {
        board
            .index_of(cell)
            .is_some_and(|i| self.bits[i / 64] & (1u64 << (i % 64)) != 0)
    }

    pub fn len(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&w| w == 0)
    }

    /// Forget every mark
    pub fn clear(&mut self) {
        self.bits.fill(0);
    }
}

// ============================================================================
// PATH
// ============================================================================

/// Shortest route from a pawn to one home base
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Path {
    start: CellId,
    moves: Vec<Move>,
}

impl Path {
    /// Zero-length path: the pawn already stands on the home
    pub fn arrived(start: CellId) -> Self {
        Self { start, moves: Vec::new() }
    }

    pub fn from_moves(start: CellId, moves: Vec<Move>) -> Self {
        Self { start, moves }
    }

    /// Number of moves
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn start(&self) -> CellId {
        self.start
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn first(&self) -> Option<&Move> {
        self.moves.first()
    }

    /// The home base reached
    pub fn destination(&self) -> CellId {
        self.moves.last().map_or(self.start, |m| m.to)
    }

    /// Would adding `wall` cut any move of this path?
    pub fn is_blocked_by_wall(&self, wall: Wall, board: &Board) -> bool {
        self.moves.iter().any(|m| m.is_blocked_by_wall(wall, board))
    }
}

// ============================================================================
// SEARCH
// ============================================================================

/// Arena entry: the move that reached a cell and the entry it extends
struct SearchNode {
    mv: Move,
    parent: Option<usize>,
}

fn reconstruct(nodes: &[SearchNode], start: CellId, leaf: usize) -> Path {
    let mut moves = Vec::new();
    let mut cursor = Some(leaf);
    while let Some(i) = cursor {
        moves.push(nodes[i].mv);
        cursor = nodes[i].parent;
    }
    moves.reverse();
    Path::from_moves(start, moves)
}

/// One shortest path per reachable opponent home, in discovery order.
///
/// Empty when no pawn stands on `from`. Fewer paths than the opponent has
/// homes means the pawn is walled off from some of them.
pub fn find_shortest_paths(board: &Board, from: CellId) -> Vec<Path> {
    let Some(owner) = board.pawn_at(from) else {
        return Vec::new();
    };
    let opponent = owner.opponent();
    let expected = board.homes(opponent).len();

    if board.is_home_of(from, opponent) {
        return vec![Path::arrived(from)];
    }

    let mut visited = VisitedSet::new(board);
    visited.insert(board, from);

    let mut nodes: Vec<SearchNode> = Vec::new();
    let mut queue = VecDeque::new();
    for mv in unvisited_moves(board, from, opponent, &visited) {
        queue.push_back(nodes.len());
        nodes.push(SearchNode { mv, parent: None });
    }

    let mut found = Vec::with_capacity(expected);
    while let Some(idx) = queue.pop_front() {
        if found.len() >= expected {
            break;
        }
        let cell = nodes[idx].mv.to;
        if !visited.insert(board, cell) {
            continue;
        }
        if board.is_home_of(cell, opponent) {
            found.push(idx);
            if found.len() == expected {
                break;
            }
        }
        for mv in unvisited_moves(board, cell, opponent, &visited) {
            queue.push_back(nodes.len());
            nodes.push(SearchNode { mv, parent: Some(idx) });
        }
    }

    let paths: Vec<Path> = found.iter().map(|&leaf| reconstruct(&nodes, from, leaf)).collect();
    debug!(
        "{} pawn at {}: {}/{} homes reached, {} nodes expanded",
        owner,
        from,
        paths.len(),
        expected,
        nodes.len()
    );
    paths
}

/// Shortest paths of every pawn not owned by `player`
pub fn find_all_opponent_shortest_paths(board: &Board, player: Player) -> Vec<Path> {
    board
        .pawns_of(player.opponent())
        .flat_map(|cell| find_shortest_paths(board, cell))
        .collect()
}

// ============================================================================
// PATH LENGTHS
// ============================================================================

/// Search result for one pawn
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PawnPaths {
    pub pawn: CellId,
    pub owner: Player,
    /// Length of the shortest path to each reached home, discovery order
    pub lengths: Vec<usize>,
    /// Every opponent home reached, or already standing on one
    pub complete: bool,
}

/// Length summary for one player's pawns
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathLengths {
    pub shortest: usize,
    pub second_shortest: usize,
    pub furthest: usize,
}

/// Shortest-path lengths of every pawn on the board
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPathLengths {
    pawns: Vec<PawnPaths>,
}

impl PlayerPathLengths {
    /// Per-pawn results in row-major pawn order
    pub fn pawns(&self) -> &[PawnPaths] {
        &self.pawns
    }

    /// Number of shortest paths found for `player`'s pawns
    pub fn path_count(&self, player: Player) -> usize {
        self.owned_by(player).map(|p| p.lengths.len()).sum()
    }

    pub fn lengths_for(&self, pawn: CellId) -> Option<&[usize]> {
        self.pawns.iter().find(|p| p.pawn == pawn).map(|p| p.lengths.as_slice())
    }

    /// `None` if none of `player`'s pawns reached a home
    pub fn summary_for(&self, player: Player) -> Option<PathLengths> {
        let mut lengths: Vec<usize> =
            self.owned_by(player).flat_map(|p| p.lengths.iter().copied()).collect();
        lengths.sort_unstable();
        let shortest = *lengths.first()?;
        Some(PathLengths {
            shortest,
            second_shortest: lengths.get(1).copied().unwrap_or(shortest),
            furthest: lengths.last().copied().unwrap_or(shortest),
        })
    }

    /// Every pawn can still reach every opponent home
    pub fn is_valid(&self) -> bool {
        self.pawns.iter().all(|p| p.complete)
    }

    /// First player with a pawn on an opponent home
    pub fn winner(&self) -> Option<Player> {
        self.pawns.iter().find(|p| p.lengths.contains(&0)).map(|p| p.owner)
    }

    fn owned_by(&self, player: Player) -> impl Iterator<Item = &PawnPaths> + '_ {
        self.pawns.iter().filter(move |p| p.owner == player)
    }
}

/// Run the per-pawn search for every pawn on the board
pub fn find_player_path_lengths(board: &Board) -> PlayerPathLengths {
    let pawns = board
        .pawns()
        .map(|(pawn, owner)| {
            let paths = find_shortest_paths(board, pawn);
            let lengths: Vec<usize> = paths.iter().map(Path::len).collect();
            let complete = lengths.len() >= board.homes(owner.opponent()).len()
                || lengths.contains(&0);
            PawnPaths { pawn, owner, lengths, complete }
        })
        .collect();
    PlayerPathLengths { pawns }
}

// ============================================================================
// BOARD CONVENIENCE
// ============================================================================

impl Board {
    /// Shortest paths of the pawn at `cell` (see `find_shortest_paths`)
    pub fn shortest_paths(&self, cell: CellId) -> Vec<Path> {
        find_shortest_paths(self, cell)
    }

    pub fn all_player_path_lengths(&self) -> PlayerPathLengths {
        find_player_path_lengths(self)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;

    /// 5x5, player One pawn at (4,2), single home of Two at (0,2)
    fn corridor_board() -> Board {
        let mut board = Board::new(5, 5).unwrap();
        board.add_home(CellId::new(0, 2), Player::Two).unwrap();
        board.place_pawn(CellId::new(4, 2), Player::One).unwrap();
        board
    }

    #[test]
    fn test_visited_set() {
        let board = Board::new(9, 9).unwrap();
        let mut visited = VisitedSet::new(&board);
        assert!(visited.is_empty());
        assert!(visited.insert(&board, CellId::new(8, 8)));
        assert!(!visited.insert(&board, CellId::new(8, 8)));
        assert!(!visited.insert(&board, CellId::new(9, 0)));
        assert!(visited.contains(&board, CellId::new(8, 8)));
        assert_eq!(visited.len(), 1);
        visited.clear();
        assert!(!visited.contains(&board, CellId::new(8, 8)));
    }

    #[test]
    fn test_straight_path() {
        let board = corridor_board();
        let paths = find_shortest_paths(&board, CellId::new(4, 2));
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].len(), 2);
        assert_eq!(paths[0].destination(), CellId::new(0, 2));
        assert_eq!(paths[0].first().unwrap().to, CellId::new(2, 2));
    }

    #[test]
    fn test_wall_lengthens_path() {
        let mut board = corridor_board();
        // Cuts the straight double step out of (4,2)
        board.add_wall(Wall::horizontal(CellId::new(3, 1))).unwrap();
        let paths = find_shortest_paths(&board, CellId::new(4, 2));
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].len(), 3);
    }

    #[test]
    fn test_moves_chain() {
        let mut board = corridor_board();
        board.add_wall(Wall::horizontal(CellId::new(3, 1))).unwrap();
        let path = &find_shortest_paths(&board, CellId::new(4, 2))[0];
        let mut at = path.start();
        for mv in path.moves() {
            assert_eq!(mv.from, at);
            assert!(mv.direction().is_some());
            at = mv.to;
        }
        assert_eq!(at, CellId::new(0, 2));
    }

    #[test]
    fn test_already_home() {
        let mut board = Board::new(5, 5).unwrap();
        board.add_home(CellId::new(0, 2), Player::Two).unwrap();
        board.place_pawn(CellId::new(0, 2), Player::One).unwrap();
        let paths = find_shortest_paths(&board, CellId::new(0, 2));
        assert_eq!(paths, vec![Path::arrived(CellId::new(0, 2))]);
        assert_eq!(find_player_path_lengths(&board).winner(), Some(Player::One));
    }

    #[test]
    fn test_no_pawn_no_paths() {
        let board = corridor_board();
        assert!(find_shortest_paths(&board, CellId::new(1, 1)).is_empty());
    }

    #[test]
    fn test_walled_in_pawn() {
        let mut board = corridor_board();
        // Box the pawn into the first four cells of the bottom row
        board.add_wall(Wall::horizontal(CellId::new(3, 0))).unwrap();
        board.add_wall(Wall::horizontal(CellId::new(3, 2))).unwrap();
        board.add_wall(Wall::vertical(CellId::new(3, 3))).unwrap();
        assert!(find_shortest_paths(&board, CellId::new(4, 2)).is_empty());

        let lengths = find_player_path_lengths(&board);
        assert!(!lengths.is_valid());
        assert_eq!(lengths.path_count(Player::One), 0);
    }

    #[test]
    fn test_standard_board_lengths() {
        let board = Board::from_config(&BoardConfig::default()).unwrap();
        let lengths = find_player_path_lengths(&board);
        assert!(lengths.is_valid());
        assert_eq!(lengths.pawns().len(), 4);
        assert_eq!(lengths.path_count(Player::One), 4);
        assert_eq!(lengths.path_count(Player::Two), 4);
        assert_eq!(lengths.winner(), None);

        let summary = lengths.summary_for(Player::One).unwrap();
        assert!(summary.shortest <= summary.second_shortest);
        assert!(summary.second_shortest <= summary.furthest);
        assert_eq!(lengths.lengths_for(CellId::new(10, 3)).map(<[usize]>::len), Some(2));
    }

    #[test]
    fn test_bfs_is_deterministic() {
        let board = Board::from_config(&BoardConfig::default()).unwrap();
        let first = find_all_opponent_shortest_paths(&board, Player::One);
        let second = find_all_opponent_shortest_paths(&board, Player::One);
        assert_eq!(first, second);
        assert!(first.iter().all(|p| board.pawn_at(p.start()) == Some(Player::Two)));
    }

    #[test]
    fn test_path_blocked_by_wall() {
        let board = corridor_board();
        let path = &find_shortest_paths(&board, CellId::new(4, 2))[0];
        assert!(path.is_blocked_by_wall(Wall::horizontal(CellId::new(1, 2)), &board));
        assert!(!path.is_blocked_by_wall(Wall::vertical(CellId::new(0, 0)), &board));
    }
}
