//! Blockade CLI - Command-line interface
//!
//! Commands:
//! - moves: List moves of one pawn
//! - turns: List candidate move + wall turns for a player
//! - paths: Shortest paths and path lengths
//! - check-wall: Check whether a wall placement is legal
//! - block: Legal walls across a move
//! - init-config: Write a board config file

mod board_args;
mod moves_cmd;
mod paths_cmd;
mod wall_cmd;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use blockade_core::BoardConfig;

#[derive(Parser)]
#[command(name = "blockade")]
#[command(about = "Blockade path finding and wall legality engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List moves of the pawn at a cell
    Moves(moves_cmd::MovesArgs),
    /// List candidate move + wall turns for a player
    Turns(moves_cmd::TurnsArgs),
    /// Show shortest paths to the opponent homes
    Paths(paths_cmd::PathsArgs),
    /// Check whether a wall may be placed
    CheckWall(wall_cmd::CheckWallArgs),
    /// List legal walls across a move
    Block(wall_cmd::BlockArgs),
    /// Write a board config file
    InitConfig {
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
        #[arg(long, default_value = "14")]
        rows: i16,
        #[arg(long, default_value = "11")]
        cols: i16,
        #[arg(long, default_value = "2")]
        homes: usize,
        #[arg(long, default_value = "default")]
        name: String,
    },
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so --json output stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Moves(args) => moves_cmd::run_moves(args),
        Commands::Turns(args) => moves_cmd::run_turns(args),
        Commands::Paths(args) => paths_cmd::run(args),
        Commands::CheckWall(args) => wall_cmd::run_check(args),
        Commands::Block(args) => wall_cmd::run_block(args),
        Commands::InitConfig { output, rows, cols, homes, name } => {
            let config = BoardConfig::new(rows, cols).with_homes(homes).with_name(&name);
            config.validate()?;
            config.save(&output)?;
            tracing::info!("Wrote {} ({}x{}, {} homes each)", output.display(), rows, cols, homes);
            Ok(())
        }
    }
}
