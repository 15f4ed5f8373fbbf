use std::time::Duration;

use ratatui::symbols::border;

/// Default side length of the square board.
pub const GRID_SIZE: u16 = 20;

/// Smallest board accepted from the command line.
pub const MIN_GRID_SIZE: u16 = 8;

/// Largest board accepted from the command line.
pub const MAX_GRID_SIZE: u16 = 40;

/// Number of segments in a freshly reset snake.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Tick interval at the start of every session, in milliseconds.
pub const BASE_TICK_INTERVAL_MS: f64 = 150.0;

/// The tick interval never drops below this, in milliseconds.
pub const MIN_TICK_INTERVAL_MS: f64 = 50.0;

/// Multiplier applied to the tick interval each time food is eaten.
pub const SPEED_UP_FACTOR: f64 = 0.98;

/// Score granted per food.
pub const POINTS_PER_FOOD: u32 = 10;

/// Random draws attempted before food placement enumerates free cells.
pub const FOOD_SAMPLE_ATTEMPTS: usize = 256;

/// Minimum drag length, in grid cells, recognised as a swipe.
pub const SWIPE_THRESHOLD_CELLS: i32 = 2;

/// Terminal columns used to draw one grid cell.
pub const CELL_WIDTH: u16 = 2;

/// Redraw cadence while no tick is pending.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Fixed key under which the high score is persisted.
pub const HIGH_SCORE_KEY: &str = "snake-high-score";

/// Directory name used under the platform data and config directories.
pub const APP_DIR_NAME: &str = "grid-snake";

/// Board border with rounded corners.
pub const BORDER_BOARD: border::Set = border::ROUNDED;

/// Glyph pair drawn for snake segments and food.
pub const GLYPH_CELL_SOLID: &str = "██";

/// Glyph pair drawn for the food cell.
pub const GLYPH_FOOD: &str = "◖◗";

/// Glyph pair drawn for an empty cell.
pub const GLYPH_CELL_EMPTY: &str = " ·";
