use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::config::GameConfig;
use grid_snake::game::{GameEvent, GameSimulation, GameStatus};
use grid_snake::input::{GameInput, InputHandler};
use grid_snake::renderer;
use grid_snake::scheduler::TickScheduler;
use grid_snake::terminal_runtime::TerminalSession;
use grid_snake::ui::hud::{HudInfo, HudValueFlash};
use grid_snake::ui::THEME_CLASSIC;
use tracing::{error, info};
use tracing_subscriber::filter::EnvFilter;

/// Upper bound on a single input poll, so frames keep refreshing.
const MAX_POLL_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Board width in cells (overrides the config file).
    #[arg(long)]
    width: Option<u16>,

    /// Board height in cells (overrides the config file).
    #[arg(long)]
    height: Option<u16>,

    /// Seed for food and wall placement, for reproducible rounds.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON config file; defaults to the platform config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write tracing output to this file (filtered by RUST_LOG).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = load_config(&cli)?;
    let sim = match cli.seed {
        Some(seed) => GameSimulation::new_with_seed(config, seed),
        None => GameSimulation::new(config),
    }
    .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;

    let mut session = TerminalSession::enter()?;
    run(&mut session, sim)
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_config(cli: &Cli) -> io::Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::load_default()?,
    };

    if let Some(width) = cli.width {
        config.grid.width = width;
    }
    if let Some(height) = cli.height {
        config.grid.height = height;
    }
    config.validate()?;

    info!(?config, "configuration loaded");
    Ok(config)
}

fn run(session: &mut TerminalSession, mut sim: GameSimulation) -> io::Result<()> {
    let mut input = InputHandler::new(MAX_POLL_INTERVAL);
    let mut scheduler = TickScheduler::new(Instant::now());
    let mut value_flash = HudValueFlash::default();

    loop {
        let now = Instant::now();
        session.draw(|frame| {
            renderer::render(
                frame,
                &sim,
                HudInfo {
                    theme: &THEME_CLASSIC,
                    now,
                    value_flash,
                },
            )
        })?;

        // Sleep no longer than the time left until the next tick is due.
        let wait = if sim.status() == GameStatus::Running {
            scheduler.remaining(Instant::now(), sim.tick_interval())
        } else {
            MAX_POLL_INTERVAL
        };
        if let Some(game_input) = input.poll_input(wait)? {
            if game_input == GameInput::Quit {
                break;
            }
            if let Err(error) = sim.apply_input(game_input) {
                error!(%error, "input could not be applied");
            }
        }

        // The interval is re-read every pass so level-ups apply to the very next tick.
        let interval = sim.tick_interval();
        if sim.status() != GameStatus::Running {
            scheduler.reset(Instant::now());
        } else if scheduler.is_due(Instant::now(), interval) {
            if let Err(error) = sim.tick() {
                error!(%error, "round aborted");
            }
        }

        let now = Instant::now();
        for event in sim.drain_events() {
            if let GameEvent::GameOver { final_score, .. } = &event {
                info!(final_score, high_scores = ?sim.high_scores(), "round finished");
            }
            value_flash.observe(&event, now);
        }
    }

    Ok(())
}
