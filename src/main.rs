use std::io;
use std::panic;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use grid_snake::config::{FRAME_INTERVAL, GRID_SIZE, MAX_GRID_SIZE, MIN_GRID_SIZE};
use grid_snake::game::{GameState, GameStatus};
use grid_snake::grid::Grid;
use grid_snake::input::{GameInput, InputConfig, InputHandler};
use grid_snake::logging::{default_log_path, init_file_logger};
use grid_snake::palette::{GeminiPalette, PalettePoll, PaletteRequest};
use grid_snake::renderer;
use grid_snake::scheduler::TickScheduler;
use grid_snake::score::{scores_path, HighScoreTracker};
use grid_snake::terminal_runtime::{restore_terminal, TerminalSession};
use grid_snake::theme::ThemeCatalog;
use grid_snake::ui::hud::HudInfo;
use log::{error, info, warn, LevelFilter};

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Board side length in cells; fixed for the whole run.
    #[arg(
        long,
        default_value_t = GRID_SIZE,
        value_parser = clap::value_parser!(u16).range(MIN_GRID_SIZE as i64..=MAX_GRID_SIZE as i64)
    )]
    grid_size: u16,

    /// Seed food placement for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,

    /// Theme to start with.
    #[arg(long)]
    theme: Option<String>,

    /// Describe a palette to generate at startup (needs GEMINI_API_KEY).
    #[arg(long)]
    theme_prompt: Option<String>,

    /// Disable swipe steering with the mouse.
    #[arg(long = "no-mouse")]
    no_mouse: bool,

    /// Write the log here instead of the data directory.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log verbosity (off, error, warn, info, debug, trace).
    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let log_path = cli.log_file.clone().unwrap_or_else(default_log_path);
    if let Err(error) = init_file_logger(&log_path, cli.log_level) {
        eprintln!(
            "Warning: logging disabled, cannot open {}: {error}",
            log_path.display()
        );
    }
    info!("grid-snake {} starting", env!("CARGO_PKG_VERSION"));

    let mut themes = ThemeCatalog::builtin();
    if let Some(name) = &cli.theme {
        if !themes.select_by_name(name) {
            eprintln!(
                "Warning: unknown theme '{name}'; available: {}",
                themes.names().join(", ")
            );
        }
    }

    install_panic_hook();

    let result = run(&cli, themes);
    if let Err(error) = &result {
        error!("terminal error: {error}");
    }
    result
}

fn run(cli: &Cli, mut themes: ThemeCatalog) -> io::Result<()> {
    let grid = Grid::new(cli.grid_size);
    let mut state = match cli.seed {
        Some(seed) => GameState::new_with_seed(grid, seed),
        None => GameState::new(grid),
    };
    let mut high_score = HighScoreTracker::load(scores_path());
    let mut reference_high_score = high_score.best();
    let mut palette = cli.theme_prompt.clone().map(start_palette_request);

    let mut input = InputHandler::new(InputConfig {
        enable_mouse: !cli.no_mouse,
    });
    let mut scheduler = TickScheduler::new();
    let mut session = TerminalSession::enter(!cli.no_mouse)?;

    loop {
        {
            let hud_info = HudInfo {
                high_score: high_score.best(),
                reference_high_score,
                theme: themes.current(),
                palette_prompt: palette.as_ref().map(PaletteRequest::prompt),
            };
            session
                .terminal_mut()
                .draw(|frame| renderer::render(frame, &state.snapshot(), &hud_info))?;
        }

        let now = Instant::now();
        scheduler.sync(state.status, state.tick_interval(), now);
        let timeout = scheduler
            .time_until_due(now)
            .map_or(FRAME_INTERVAL, |due| due.min(FRAME_INTERVAL));

        if let Some(game_input) = input.poll_input(timeout)? {
            match game_input {
                GameInput::Quit => break,
                GameInput::CycleTheme => themes.select_next(),
                other => {
                    let previous = state.status;
                    state.apply_input(other);
                    if starts_session(previous, state.status) {
                        reference_high_score = high_score.best();
                    }
                }
            }
        }

        let now = Instant::now();
        scheduler.sync(state.status, state.tick_interval(), now);
        if scheduler.poll(now) {
            state.step();
            high_score.observe(state.score);
        }

        match palette.as_ref().map(PaletteRequest::poll) {
            Some(PalettePoll::Ready(theme)) => {
                themes.insert_generated(theme);
                palette = None;
            }
            Some(PalettePoll::Failed) => palette = None,
            Some(PalettePoll::Pending) | None => {}
        }
    }

    info!("quitting with high score {}", high_score.best());
    Ok(())
}

fn starts_session(previous: GameStatus, current: GameStatus) -> bool {
    matches!(previous, GameStatus::Idle | GameStatus::GameOver) && current == GameStatus::Playing
}

fn start_palette_request(prompt: String) -> PaletteRequest {
    match GeminiPalette::from_env() {
        Ok(generator) => PaletteRequest::spawn(Box::new(generator), prompt),
        Err(error) => {
            warn!("theme generation unavailable: {error}");
            PaletteRequest::failed(prompt)
        }
    }
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));
}
