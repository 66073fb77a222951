//! Board setup: dimensions and home base layout

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::board::{BoardError, CellId, Player, MAX_DIMENSION};

/// Board configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default = "default_name")]
    pub name: String,
    pub rows: i16,
    pub cols: i16,
    /// Home bases (and starting pawns) per player
    pub homes_per_player: usize,
    /// Distance of the home rows from the board edges, as a share of `rows`
    pub home_row_fraction: f32,
}

fn default_name() -> String {
    "default".to_string()
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            rows: 14,
            cols: 11,
            homes_per_player: 2,
            home_row_fraction: 0.3,
        }
    }
}

impl BoardConfig {
    pub fn new(rows: i16, cols: i16) -> Self {
        Self { rows, cols, ..Self::default() }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_homes(mut self, homes_per_player: usize) -> Self {
        self.homes_per_player = homes_per_player;
        self
    }

    pub fn with_home_row_fraction(mut self, fraction: f32) -> Self {
        self.home_row_fraction = fraction;
        self
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read board config: {:?}", path))?;
        let config: BoardConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse board config: {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write board config: {:?}", path))?;
        Ok(())
    }

    fn home_rows(&self) -> (i16, i16) {
        let offset = (self.home_row_fraction * self.rows as f32).floor() as i16;
        (self.rows - offset, offset - 1)
    }

    fn home_cols(&self) -> Vec<i16> {
        let n = self.homes_per_player;
        let increment = self.cols as f32 / (n + 1) as f32;
        (0..n)
            .map(|i| increment.round() as i16 + (i as f32 * increment).round() as i16 - 1)
            .collect()
    }

    /// Check the home layout fits on the board
    pub fn validate(&self) -> Result<(), BoardError> {
        let dims = 1..=MAX_DIMENSION;
        if !dims.contains(&self.rows) || !dims.contains(&self.cols) {
            return Err(BoardError::BadDimensions { rows: self.rows, cols: self.cols });
        }
        if self.homes_per_player == 0 {
            return Err(BoardError::BadHomeLayout("no home bases".to_string()));
        }
        if !(self.home_row_fraction > 0.0 && self.home_row_fraction < 0.5) {
            return Err(BoardError::BadHomeLayout(format!(
                "home row fraction {} outside (0, 0.5)",
                self.home_row_fraction
            )));
        }

        let (row_one, row_two) = self.home_rows();
        if row_two < 0 || row_one >= self.rows || row_two >= row_one {
            return Err(BoardError::BadHomeLayout(format!(
                "{} rows leave no room for home rows",
                self.rows
            )));
        }

        if self.homes_per_player > self.cols as usize {
            return Err(BoardError::BadHomeLayout(format!(
                "{} homes do not fit in {} columns",
                self.homes_per_player, self.cols
            )));
        }
        let cols = self.home_cols();
        let ordered = cols.windows(2).all(|w| w[0] < w[1]);
        let fits = cols.iter().all(|c| (0..self.cols).contains(c));
        if !ordered || !fits {
            return Err(BoardError::BadHomeLayout(format!(
                "{} homes do not fit in {} columns",
                self.homes_per_player, self.cols
            )));
        }
        Ok(())
    }

    /// Home base cells of `player`, left to right
    pub fn home_cells(&self, player: Player) -> Vec<CellId> {
        let (row_one, row_two) = self.home_rows();
        let row = match player {
            Player::One => row_one,
            Player::Two => row_two,
        };
        self.home_cols().into_iter().map(|col| CellId::new(row, col)).collect()
    }
}
