use std::{fs::File, path::{Path, PathBuf}, sync::Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gridsnake::clock::FixedRateClock;
use gridsnake::term::{TermInput, TermManager};
use gridsnake::{Board, Game, GameConfig};

#[derive(Parser)]
#[command(name = "gridsnake")]
#[command(version, about = "Snake on a wrapping grid, played in the terminal")]
struct Cli {
    /// JSON file with board_width, board_height, cell_size and ticks_per_second
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width in cells
    #[arg(long)]
    board_width: Option<u16>,

    /// Board height in cells
    #[arg(long)]
    board_height: Option<u16>,

    /// Cell size in pixels
    #[arg(long)]
    cell_size: Option<u16>,

    /// Game speed
    #[arg(long)]
    ticks_per_second: Option<u32>,

    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(w) = self.board_width {
            config.board_width = w;
        }
        if let Some(h) = self.board_height {
            config.board_height = h;
        }
        if let Some(s) = self.cell_size {
            config.cell_size = s;
        }
        if let Some(t) = self.ticks_per_second {
            config.ticks_per_second = t;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "gridsnake=info".into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.game_config()?;

    // The terminal is in raw mode while playing, so logs only ever go to a file
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }
    info!(?config, "Configuration loaded");

    let mut term = TermManager::new(Board::from_config(&config))?;
    let mut clock = FixedRateClock::new(config.tick_interval());
    let mut game = Game::new(&config);

    let result = term
        .setup()
        .and_then(|_| game.run(&mut TermInput, &mut term, &mut clock));

    term.restore()?;
    result
}
