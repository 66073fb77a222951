//! Paths command - shortest paths of one pawn or path lengths of every pawn

use anyhow::{bail, Result};
use clap::Args;

use blockade_core::{Board, CellId, Path, Player, PlayerPathLengths};

use crate::board_args::BoardArgs;

#[derive(Args)]
pub struct PathsArgs {
    #[command(flatten)]
    pub board: BoardArgs,

    /// Only the pawn at this cell (default: every pawn)
    #[arg(long, value_name = "ROW,COL")]
    pub cell: Option<CellId>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run paths command
pub fn run(args: PathsArgs) -> Result<()> {
    let board = args.board.build()?;

    match args.cell {
        Some(cell) => report_pawn(&board, cell, args.json),
        None => report_all(&board.all_player_path_lengths(), args.json),
    }
}

fn report_pawn(board: &Board, cell: CellId, json: bool) -> Result<()> {
    if board.pawn_at(cell).is_none() {
        bail!("No pawn at {}", cell);
    }
    let paths = board.shortest_paths(cell);

    if json {
        println!("{}", serde_json::to_string_pretty(&paths)?);
        return Ok(());
    }
    for path in &paths {
        print_path(path);
    }
    Ok(())
}

fn print_path(path: &Path) {
    println!("{} -> {} in {} moves", path.start(), path.destination(), path.len());
    for mv in path.moves() {
        println!("    {}", mv);
    }
}

fn report_all(lengths: &PlayerPathLengths, json: bool) -> Result<()> {
    if json {
        #[derive(serde::Serialize)]
        struct JsonOutput<'a> {
            valid: bool,
            winner: Option<Player>,
            pawns: &'a [blockade_core::PawnPaths],
        }

        let output = JsonOutput {
            valid: lengths.is_valid(),
            winner: lengths.winner(),
            pawns: lengths.pawns(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("\n=== Path Lengths ===");
    for pawn in lengths.pawns() {
        println!(
            "{} pawn at {}: {:?}{}",
            pawn.owner,
            pawn.pawn,
            pawn.lengths,
            if pawn.complete { "" } else { " (cut off)" }
        );
    }
    for player in Player::ALL {
        if let Some(summary) = lengths.summary_for(player) {
            println!(
                "{}: shortest {}, second {}, furthest {}",
                player, summary.shortest, summary.second_shortest, summary.furthest
            );
        }
    }
    if let Some(winner) = lengths.winner() {
        println!("Winner: {}", winner);
    }
    Ok(())
}
