use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use obstacle_snake::config::{ConfigError, EdgePolicy, GameConfig, Preset, RestartPolicy};
use obstacle_snake::error::AppError;
use obstacle_snake::input::{GameInput, InputHandler};
use obstacle_snake::logging;
use obstacle_snake::scheduler::IntervalTimer;
use obstacle_snake::score::FileScoreStore;
use obstacle_snake::session::GameSession;
use obstacle_snake::terminal_runtime::{TerminalSession, install_panic_hook};

/// Longest wait between redraws while idle.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

type Session = GameSession<IntervalTimer, FileScoreStore>;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Rule preset to start from.
    #[arg(long, value_enum, conflicts_with = "config")]
    mode: Option<Preset>,

    /// JSON rules file; missing fields use the arcade defaults.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override what happens at the grid edge.
    #[arg(long, value_enum)]
    edge: Option<EdgePolicy>,

    /// Override how a finished round restarts.
    #[arg(long, value_enum)]
    restart: Option<RestartPolicy>,

    /// Override cells per side.
    #[arg(long)]
    grid_size: Option<u16>,

    /// Seed for reproducible obstacle and food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Best-score file (defaults to the platform data directory).
    #[arg(long, value_name = "PATH")]
    scores_file: Option<PathBuf>,

    /// Write logs here; honours RUST_LOG.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref())?;

    let config = build_config(&cli)?;
    config.validate()?;
    log::info!("starting with {config:?}");

    let store = cli
        .scores_file
        .clone()
        .map_or_else(FileScoreStore::at_default_location, FileScoreStore::new);
    log::debug!("best score file: {}", store.path().display());

    let mut session = GameSession::new(config, store, IntervalTimer::new(), cli.seed);

    install_panic_hook();
    let mut terminal = TerminalSession::enter()?;
    run(&mut terminal, &mut session)?;

    log::info!("quit");
    Ok(())
}

fn build_config(cli: &Cli) -> Result<GameConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load_from_path(path)?,
        None => GameConfig::preset(cli.mode.unwrap_or(Preset::Arcade)),
    };

    if let Some(edge) = cli.edge {
        config.edge_policy = edge;
    }
    if let Some(restart) = cli.restart {
        config.restart_policy = restart;
    }
    if let Some(grid_size) = cli.grid_size {
        config.grid_size = grid_size;
    }

    Ok(config)
}

fn run(terminal: &mut TerminalSession, session: &mut Session) -> io::Result<()> {
    let mut input = InputHandler::new();

    loop {
        terminal.draw(&session.snapshot())?;

        let timeout = session
            .scheduler()
            .time_until_due(Instant::now())
            .map_or(FRAME_INTERVAL, |due| due.min(FRAME_INTERVAL));

        if let Some(game_input) = input.poll_input(timeout)? {
            if game_input == GameInput::Quit {
                break;
            }

            session.handle_input(game_input);
        }

        session.poll(Instant::now());
    }

    Ok(())
}
