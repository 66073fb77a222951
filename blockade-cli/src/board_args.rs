//! Board setup shared by every command

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use blockade_core::{Board, BoardConfig, CellId, Player, Wall};

#[derive(Args, Clone, Debug)]
pub struct BoardArgs {
    /// Board config JSON file (default: 14x11, two homes each)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Wall to place before running the command, e.g. v:4,5 (repeatable)
    #[arg(long = "wall", value_name = "WALL")]
    pub walls: Vec<Wall>,

    /// Relocate a pawn before running the command, e.g. 10,3:8,3 (repeatable)
    #[arg(long = "pawn", value_name = "FROM:TO", value_parser = parse_relocation)]
    pub pawns: Vec<(CellId, CellId)>,
}

/// Parse `ROW,COL:ROW,COL`
pub fn parse_relocation(s: &str) -> Result<(CellId, CellId), String> {
    let (from, to) = s
        .split_once(':')
        .ok_or_else(|| format!("expected FROM:TO but got {:?}", s))?;
    let from = from.parse().map_err(|e| format!("{}", e))?;
    let to = to.parse().map_err(|e| format!("{}", e))?;
    Ok((from, to))
}

/// Parse `1` / `2` as a player
pub fn parse_player(s: &str) -> Result<Player, String> {
    match s.trim() {
        "1" | "one" => Ok(Player::One),
        "2" | "two" => Ok(Player::Two),
        _ => Err(format!("expected 1 or 2 but got {:?}", s)),
    }
}

impl BoardArgs {
    /// Build the board: config layout, then pawn relocations, then walls.
    ///
    /// Every wall must pass the legality check against the board as built so
    /// far.
    pub fn build(&self) -> Result<Board> {
        let config = match &self.config {
            Some(path) => BoardConfig::load(path)
                .with_context(|| format!("Failed to load board config: {}", path.display()))?,
            None => BoardConfig::default(),
        };
        tracing::info!("Board '{}': {}x{}", config.name, config.rows, config.cols);

        let mut board = Board::from_config(&config)?;

        for &(from, to) in &self.pawns {
            let Some(player) = board.pawn_at(from) else {
                bail!("no pawn at {} to relocate", from);
            };
            if board.pawn_at(to).is_some() {
                bail!("cannot relocate {} onto occupied cell {}", from, to);
            }
            board.clear_pawn(from)?;
            board.place_pawn(to, player)?;
        }

        for &wall in &self.walls {
            board
                .check_wall_legality(wall, wall.anchor())
                .with_context(|| format!("Cannot place wall {}", wall))?;
            board.add_wall(wall)?;
        }
        Ok(board)
    }
}
