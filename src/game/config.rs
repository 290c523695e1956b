use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Points awarded for each food eaten
pub const FOOD_REWARD: u32 = 10;

/// Chance that a non-eating tick plays the move cue
pub const MOVE_CUE_PROBABILITY: f64 = 0.3;

/// Side length of the default square board
pub const GRID_COUNT: usize = 20;

/// Largest board side accepted; cells are two terminal columns wide
pub const MAX_GRID_SIDE: usize = 200;

/// Tick interval presets the player can pick from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SpeedPreset {
    Slow,
    #[default]
    Normal,
    Fast,
    Extreme,
}

impl SpeedPreset {
    pub const ALL: [SpeedPreset; 4] = [
        SpeedPreset::Slow,
        SpeedPreset::Normal,
        SpeedPreset::Fast,
        SpeedPreset::Extreme,
    ];

    /// Time between two ticks
    pub fn interval(&self) -> Duration {
        let millis = match self {
            SpeedPreset::Slow => 350,
            SpeedPreset::Normal => 250,
            SpeedPreset::Fast => 150,
            SpeedPreset::Extreme => 80,
        };
        Duration::from_millis(millis)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SpeedPreset::Slow => "slow",
            SpeedPreset::Normal => "normal",
            SpeedPreset::Fast => "fast",
            SpeedPreset::Extreme => "extreme",
        }
    }
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Tick interval preset
    pub speed: SpeedPreset,
    /// Whether sound cues start enabled
    pub sound_enabled: bool,
    /// Where the best score is kept between sessions
    pub high_score_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: GRID_COUNT,
            grid_height: GRID_COUNT,
            initial_snake_length: 1,
            speed: SpeedPreset::default(),
            sound_enabled: true,
            high_score_path: PathBuf::from("snake_high_score.json"),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Read a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to deserialize config")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject boards the snake cannot start on
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.grid_width > 0 && self.grid_height > 0,
            "grid must be at least 1x1, got {}x{}",
            self.grid_width,
            self.grid_height
        );
        anyhow::ensure!(
            self.grid_width <= MAX_GRID_SIDE && self.grid_height <= MAX_GRID_SIDE,
            "grid sides are capped at {}, got {}x{}",
            MAX_GRID_SIDE,
            self.grid_width,
            self.grid_height
        );
        anyhow::ensure!(
            self.initial_snake_length >= 1,
            "initial snake length must be at least 1"
        );
        anyhow::ensure!(
            self.initial_snake_length <= self.grid_width / 2 + 1,
            "initial snake of length {} does not fit left of the centre of a {}-wide grid",
            self.initial_snake_length,
            self.grid_width
        );
        let cells = self
            .grid_width
            .checked_mul(self.grid_height)
            .context("grid cell count overflows")?;
        anyhow::ensure!(
            cells > self.initial_snake_length,
            "no room left for food on a {}x{} grid",
            self.grid_width,
            self.grid_height
        );
        Ok(())
    }
}
