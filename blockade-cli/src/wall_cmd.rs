//! Wall commands - check one wall, or list legal walls along a move

use anyhow::{bail, Result};
use clap::Args;

use blockade_core::{find_all_opponent_shortest_paths, legal_walls, walls_for_move, CellId, Move, Wall};

use crate::board_args::{parse_relocation, BoardArgs};

#[derive(Args)]
pub struct CheckWallArgs {
    #[command(flatten)]
    pub board: BoardArgs,

    /// Wall to check, e.g. h:5,5
    #[arg(value_name = "WALL")]
    pub wall: Wall,

    /// Target cell (default: the wall's anchor)
    #[arg(long, value_name = "ROW,COL", allow_hyphen_values = true)]
    pub at: Option<CellId>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct BlockArgs {
    #[command(flatten)]
    pub board: BoardArgs,

    /// Move to block, e.g. 3,3:5,3
    #[arg(value_name = "FROM:TO", value_parser = parse_relocation)]
    pub mv: (CellId, CellId),

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run check-wall command
pub fn run_check(args: CheckWallArgs) -> Result<()> {
    let board = args.board.build()?;
    let location = args.at.unwrap_or(args.wall.anchor());
    let result = board.check_wall_legality(args.wall, location);

    if args.json {
        #[derive(serde::Serialize)]
        struct JsonOutput {
            wall: Wall,
            legal: bool,
            reason: Option<String>,
        }

        let output = JsonOutput {
            wall: args.wall,
            legal: result.is_ok(),
            reason: result.err().map(|e| e.to_string()),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        match result {
            Ok(()) => println!("{}: legal", args.wall),
            Err(reason) => println!("{}: illegal ({})", args.wall, reason),
        }
    }
    Ok(())
}

/// Run block command: legal walls across a pawn's move that leave the
/// blocking player's own shortest paths open
pub fn run_block(args: BlockArgs) -> Result<()> {
    let board = args.board.build()?;
    let (from, to) = args.mv;
    let mv = Move::step(from, to);
    if mv.direction().is_none() {
        bail!("{} is not a single pawn move", mv);
    }

    // The blocker is whoever does not own the moving pawn
    let own_paths = match board.pawn_at(from) {
        Some(mover) => find_all_opponent_shortest_paths(&board, mover),
        None => Vec::new(),
    };
    let candidates = walls_for_move(&board, &mv, &own_paths);
    let walls = legal_walls(&board, &candidates);
    tracing::info!("{} of {} candidate walls are legal", walls.len(), candidates.len());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&walls)?);
    } else {
        for wall in &walls {
            println!("{}", wall);
        }
    }
    Ok(())
}
