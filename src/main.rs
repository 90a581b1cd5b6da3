use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use pixel_snake::clock::TickClock;
use pixel_snake::config::{config_path, load_config_file, ConfigFile};
use pixel_snake::game::GameState;
use pixel_snake::input::{GameInput, InputHandler};
use pixel_snake::renderer;
use pixel_snake::terminal_runtime::TerminalSession;
use pixel_snake::ui::hud::HudInfo;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const FRAME_SLEEP: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Board width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Board height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Cell edge length in pixels.
    #[arg(long = "cell-size")]
    cell_size: Option<u32>,

    /// Milliseconds between simulation ticks.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Config file to read instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file. Logging is off without it.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> ConfigFile {
        ConfigFile {
            width: self.width,
            height: self.height,
            cell_size: self.cell_size,
            tick_ms: self.tick_ms,
        }
    }
}

/// Handle for components that may ask the application to stop.
#[derive(Debug, Default)]
struct AppContext {
    quit_requested: bool,
}

impl AppContext {
    fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    fn should_quit(&self) -> bool {
        self.quit_requested
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config_file = cli.config.clone().unwrap_or_else(config_path);
    let board = load_config_file(&config_file)?
        .merged_with(cli.overrides())
        .resolve()
        .context("invalid board configuration")?;

    let state = match cli.seed {
        Some(seed) => GameState::new_with_seed(board, seed),
        None => GameState::new(board),
    }
    .context("failed to start game")?;

    tracing::info!(
        width = board.width(),
        height = board.height(),
        cell_size = board.cell_size(),
        tick_ms = board.tick_interval().as_millis() as u64,
        "starting"
    );

    let mut session = TerminalSession::enter().context("failed to set up terminal")?;
    let result = run(&mut session, state);
    drop(session);

    if let Err(error) = &result {
        tracing::error!(error = %error, "game stopped");
    }
    result
}

fn run(session: &mut TerminalSession, mut state: GameState) -> Result<()> {
    let mut app = AppContext::default();
    let mut input = InputHandler::new();
    let mut clock = TickClock::new(state.board().tick_interval(), Instant::now());
    let mut hud_info = HudInfo::default();

    while !app.should_quit() {
        session.draw(|frame| renderer::render(frame, &state, &hud_info))?;

        if let Some(game_input) = input.poll_input()? {
            handle_input(&mut app, &mut state, &mut hud_info, game_input)?;
            if matches!(game_input, GameInput::Reset) {
                clock.restart(Instant::now());
            }
        }

        if clock.is_due(Instant::now()) {
            state.tick()?;
        }

        thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}

fn handle_input(
    app: &mut AppContext,
    state: &mut GameState,
    hud_info: &mut HudInfo,
    input: GameInput,
) -> Result<()> {
    match input {
        GameInput::Quit => app.request_quit(),
        GameInput::Reset => {
            if state.is_game_over() {
                hud_info.rounds_played += 1;
            }
            state.apply_input(input)?;
        }
        GameInput::Direction(_) => state.apply_input(input)?,
    }

    Ok(())
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "pixel_snake=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();

    Ok(())
}
