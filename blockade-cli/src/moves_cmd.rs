//! Moves commands - list pawn moves and candidate turns

use anyhow::{Context, Result};
use clap::Args;

use blockade_core::{turn_moves, CellId, Move, Player};

use crate::board_args::{parse_player, BoardArgs};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct MovesArgs {
    #[command(flatten)]
    pub board: BoardArgs,

    /// Cell of the pawn to move, e.g. 10,3
    #[arg(long, value_name = "ROW,COL")]
    pub cell: CellId,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct TurnsArgs {
    #[command(flatten)]
    pub board: BoardArgs,

    /// Player to list turns for (1 or 2)
    #[arg(long, value_parser = parse_player, default_value = "1")]
    pub player: Player,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// COMMANDS
// ============================================================================

/// Run moves command: destinations reachable by the pawn at `--cell`
pub fn run_moves(args: MovesArgs) -> Result<()> {
    let board = args.board.build()?;
    let owner = board
        .pawn_at(args.cell)
        .with_context(|| format!("No pawn at {}", args.cell))?;

    let moves = board.generate_moves(args.cell, owner.opponent());
    tracing::info!("{} moves for {} pawn at {}", moves.len(), owner, args.cell);

    print_moves(&moves, args.json)
}

/// Run turns command: candidate move + wall combinations for a player
pub fn run_turns(args: TurnsArgs) -> Result<()> {
    let board = args.board.build()?;
    let moves = turn_moves(&board, args.player)?;
    tracing::info!("{} candidate turns for {}", moves.len(), args.player);

    print_moves(&moves, args.json)
}

// ============================================================================
// OUTPUT
// ============================================================================

fn print_moves(moves: &[Move], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(moves)?);
    } else {
        for mv in moves {
            let direction = mv
                .direction()
                .map_or_else(|| "?".to_string(), |d| format!("{:?}", d));
            println!("{:<12} {}", direction, mv);
        }
    }
    Ok(())
}
