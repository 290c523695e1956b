use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::audio::{SoundBoard, TerminalBell};
use grid_snake::game::{GameConfig, SpeedPreset};
use grid_snake::modes::HumanMode;
use grid_snake::storage::JsonFileStore;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a fixed grid, played in the terminal")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Tick interval preset
    #[arg(long, value_enum)]
    speed: Option<SpeedPreset>,

    /// Start with sound cues muted
    #[arg(long)]
    mute: bool,

    /// File the best score is kept in
    #[arg(long)]
    high_score_file: Option<PathBuf>,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        if self.mute {
            config.sound_enabled = false;
        }
        if let Some(path) = &self.high_score_file {
            config.high_score_path = path.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {:?}", path))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.game_config()?;
    let store = JsonFileStore::new(config.high_score_path.clone());
    let sound = SoundBoard::new(Box::new(TerminalBell), !config.sound_enabled);
    info!(
        width = config.grid_width,
        height = config.grid_height,
        speed = config.speed.label(),
        high_score_file = %store.path().display(),
        "starting game"
    );

    let mut human_mode = HumanMode::new(config, Box::new(store), sound);
    human_mode.run().await?;

    Ok(())
}
