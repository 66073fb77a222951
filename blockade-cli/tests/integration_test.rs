//! Integration tests for the Blockade engine
//!
//! Tests the full stack: board model, move generation, path finding, wall
//! legality and candidate turns working together.

use blockade_core::{
    check_wall_legality, find_player_path_lengths, find_shortest_paths, generate_moves,
    turn_moves, Board, BoardConfig, CellId, Move, MoveProfiler, Player, Wall, WallLegalityError,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn cell(row: i16, col: i16) -> CellId {
    CellId::new(row, col)
}

/// Standard 14x11 board with both players on their homes
fn standard_board() -> Board {
    Board::from_config(&BoardConfig::default()).unwrap()
}

/// Empty board with a single pawn of player One and a single home of player Two
fn single_pawn_board(rows: i16, cols: i16, pawn: CellId, home: CellId) -> Board {
    let mut board = Board::new(rows, cols).unwrap();
    board.add_home(home, Player::Two).unwrap();
    board.place_pawn(pawn, Player::One).unwrap();
    board
}

/// Place a wall the way a turn controller would: validate, then commit
fn try_place(board: &mut Board, wall: Wall) -> Result<(), WallLegalityError> {
    check_wall_legality(board, wall, wall.anchor())?;
    board.add_wall(wall).unwrap();
    Ok(())
}

fn random_wall(rng: &mut ChaCha8Rng, board: &Board) -> Wall {
    let anchor = cell(rng.gen_range(0..board.rows()), rng.gen_range(0..board.cols()));
    if rng.gen_bool(0.5) {
        Wall::vertical(anchor)
    } else {
        Wall::horizontal(anchor)
    }
}

// ============================================================================
// PATH FINDING
// ============================================================================

#[test]
fn test_bfs_optimal_with_single_wall() {
    let mut board = single_pawn_board(5, 5, cell(4, 2), cell(0, 2));
    assert_eq!(find_shortest_paths(&board, cell(4, 2))[0].len(), 2);

    // Closes the second double step north; best is diagonal, double, diagonal
    board.add_wall(Wall::horizontal(cell(1, 2))).unwrap();
    let paths = find_shortest_paths(&board, cell(4, 2));
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].len(), 3);
    assert_eq!(paths[0].destination(), cell(0, 2));
}

#[test]
fn test_every_pawn_reaches_every_home() {
    let board = standard_board();
    for (pawn, owner) in board.pawns() {
        let paths = board.shortest_paths(pawn);
        assert_eq!(paths.len(), board.homes(owner.opponent()).len());
        for path in &paths {
            assert!(board.is_home_of(path.destination(), owner.opponent()));
        }
    }
}

// ============================================================================
// MOVE GENERATION
// ============================================================================

#[test]
fn test_generate_moves_deterministic() {
    let mut board = standard_board();
    board.add_wall(Wall::vertical(cell(8, 3))).unwrap();
    board.add_wall(Wall::horizontal(cell(5, 6))).unwrap();

    for (pawn, owner) in board.pawns().collect::<Vec<_>>() {
        let first = generate_moves(&board, pawn, owner.opponent());
        let second = generate_moves(&board, pawn, owner.opponent());
        assert_eq!(first, second);
        assert!(first.iter().all(|m| m.wall.is_none() && m.from == pawn));
    }
}

#[test]
fn test_jump_rule_onto_opponent_home() {
    let mut board = Board::new(7, 7).unwrap();
    let from = cell(3, 1);
    let home = cell(3, 3);
    board.place_pawn(from, Player::One).unwrap();
    board.add_home(home, Player::Two).unwrap();
    board.place_pawn(home, Player::Two).unwrap();

    let moves = generate_moves(&board, from, Player::Two);
    assert!(moves.contains(&Move::step(from, cell(3, 2))));
    assert!(moves.contains(&Move::step(from, home)));
}

#[test]
fn test_jump_rule_onto_plain_pawn() {
    let mut board = Board::new(7, 7).unwrap();
    let from = cell(3, 1);
    board.place_pawn(from, Player::One).unwrap();
    board.place_pawn(cell(3, 3), Player::Two).unwrap();

    let moves = generate_moves(&board, from, Player::Two);
    assert!(moves.contains(&Move::step(from, cell(3, 2))));
    assert!(!moves.contains(&Move::step(from, cell(3, 3))));
}

// ============================================================================
// WALL LEGALITY
// ============================================================================

#[test]
fn test_overlap_rejection_keeps_one_wall() {
    let mut board = standard_board();
    let wall = Wall::horizontal(cell(6, 4));

    assert_eq!(try_place(&mut board, wall), Ok(()));
    assert_eq!(try_place(&mut board, wall), Err(WallLegalityError::Overlapping));
    assert_eq!(board.walls(), vec![wall]);
}

#[test]
fn test_cut_off_rejection_leaves_paths_unchanged() {
    // Only way out of (0,0) is the double step south onto the home
    let mut board = single_pawn_board(3, 3, cell(0, 0), cell(2, 0));
    board.add_wall(Wall::vertical(cell(0, 0))).unwrap();
    let before = board.shortest_paths(cell(0, 0));
    assert_eq!(before.len(), 1);
    assert_eq!(before[0].moves(), &[Move::step(cell(0, 0), cell(2, 0))]);

    let result = board.check_wall_legality(Wall::horizontal(cell(1, 0)), cell(1, 0));
    assert_eq!(result, Err(WallLegalityError::MissingPath));
    assert_eq!(board.shortest_paths(cell(0, 0)), before);
}

#[test]
fn test_random_walls_revert_and_preserve_paths() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut board = standard_board();
    let mut placed = 0;

    for _ in 0..300 {
        let wall = random_wall(&mut rng, &board);
        let snapshot = board.clone();
        let result = check_wall_legality(&board, wall, wall.anchor());
        assert_eq!(board, snapshot, "check of {} changed the board", wall);

        if result.is_ok() {
            board.add_wall(wall).unwrap();
            placed += 1;
            assert!(find_player_path_lengths(&board).is_valid(), "{} cut a pawn off", wall);
        }
    }
    assert!(placed > 0);
    assert_eq!(board.walls().len(), placed);
}

// ============================================================================
// TURNS
// ============================================================================

#[test]
fn test_turn_moves_make_and_undo() {
    let mut board = standard_board();
    let before = board.clone();
    let mut profiler = MoveProfiler::new();

    let moves = turn_moves(&board, Player::One).unwrap();
    assert!(!moves.is_empty());
    for mv in &moves {
        let displaced = board.make_move(mv, &mut profiler).unwrap();
        assert!(board.all_player_path_lengths().is_valid(), "{} broke a path", mv);
        board.undo_move(mv, displaced, &mut profiler).unwrap();
        assert_eq!(board, before);
    }
    assert_eq!(profiler.moves_made(), moves.len() as u64);
    assert_eq!(profiler.moves_undone(), moves.len() as u64);
}

#[test]
fn test_random_playout_keeps_invariant() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut board = Board::from_config(&BoardConfig::new(9, 9)).unwrap();
    let mut profiler = MoveProfiler::new();
    let mut player = Player::One;

    for _ in 0..16 {
        let moves = turn_moves(&board, player).unwrap();
        assert!(!moves.is_empty());
        let mv = moves[rng.gen_range(0..moves.len())];
        board.make_move(&mv, &mut profiler).unwrap();

        let lengths = board.all_player_path_lengths();
        assert!(lengths.is_valid());
        if lengths.winner().is_some() {
            break;
        }
        player = player.opponent();
    }
    assert!(profiler.moves_made() > 0);
}
