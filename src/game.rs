use std::time::Duration;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::collision::{self, Collision};
use crate::config::{BASE_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS, POINTS_PER_FOOD, SPEED_UP_FACTOR};
use crate::direction_buffer::DirectionBuffer;
use crate::food;
use crate::grid::{Grid, Point};
use crate::input::{Direction, GameInput};
use crate::snake::Snake;

/// Lifecycle of one session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Idle,
    Playing,
    Paused,
    GameOver,
}

/// Why the last session ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EndReason {
    WallCollision,
    SelfCollision,
    /// The snake filled every cell; no food could be placed.
    BoardFull,
}

impl EndReason {
    fn from_collision(collision: Collision) -> Option<Self> {
        match collision {
            Collision::None => None,
            Collision::Wall => Some(Self::WallCollision),
            Collision::SelfHit => Some(Self::SelfCollision),
        }
    }
}

/// What a single [`GameState::step`] call did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The session was not playing; nothing changed.
    Skipped,
    Moved,
    Ate,
    Collided(Collision),
    BoardFull,
}

/// Read-only view handed to the render collaborator.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub snake: &'a Snake,
    pub food: Option<Point>,
    pub grid_size: u16,
    pub status: GameStatus,
    pub score: u32,
    pub end_reason: Option<EndReason>,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    snake: Snake,
    /// `None` only once the snake covers the whole board.
    pub food: Option<Point>,
    pub score: u32,
    pub status: GameStatus,
    pub end_reason: Option<EndReason>,
    pub tick_count: u64,
    speed_ms: f64,
    buffer: DirectionBuffer,
    grid: Grid,
    rng: StdRng,
}

impl GameState {
    /// Creates an idle session with entropy-seeded food placement.
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        Self::with_rng(grid, StdRng::from_entropy())
    }

    /// Creates a deterministic idle session for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(grid: Grid, seed: u64) -> Self {
        Self::with_rng(grid, StdRng::seed_from_u64(seed))
    }

    fn with_rng(grid: Grid, rng: StdRng) -> Self {
        let snake = Snake::initial(grid);
        let mut state = Self {
            buffer: DirectionBuffer::new(snake.direction()),
            snake,
            food: None,
            score: 0,
            status: GameStatus::Idle,
            end_reason: None,
            tick_count: 0,
            speed_ms: BASE_TICK_INTERVAL_MS,
            grid,
            rng,
        };
        state.food = state.spawn_food();
        state
    }

    /// Starts a fresh session: initial snake heading up, score zero, base
    /// speed, new food, status [`GameStatus::Playing`].
    pub fn reset(&mut self) {
        self.snake = Snake::initial(self.grid);
        self.buffer.reset(self.snake.direction());
        self.score = 0;
        self.speed_ms = BASE_TICK_INTERVAL_MS;
        self.tick_count = 0;
        self.end_reason = None;
        self.food = self.spawn_food();
        self.set_status(GameStatus::Playing);

        info!(
            "new session on {0}x{0} board, food at {1:?}",
            self.grid.size(),
            self.food
        );
    }

    /// Buffers a direction change for the next tick. Ignored unless playing.
    pub fn request_direction(&mut self, direction: Direction) {
        if self.status == GameStatus::Playing {
            self.buffer.request(direction);
        }
    }

    /// Advances the session by one cell.
    pub fn step(&mut self) -> TickOutcome {
        if self.status != GameStatus::Playing {
            return TickOutcome::Skipped;
        }

        self.tick_count += 1;

        let direction = self.buffer.peek();
        self.snake.set_direction(direction);
        let candidate = self.snake.head().translated(direction);

        let collision = collision::detect(self.grid, candidate, self.snake.segments());
        if let Some(reason) = EndReason::from_collision(collision) {
            debug!("collision at {candidate:?}: {collision:?}");
            self.end(reason);
            return TickOutcome::Collided(collision);
        }

        let ate = self.food == Some(candidate);
        self.snake.advance(candidate, ate);
        if !ate {
            return TickOutcome::Moved;
        }

        self.score += POINTS_PER_FOOD;
        self.speed_ms = (self.speed_ms * SPEED_UP_FACTOR).max(MIN_TICK_INTERVAL_MS);
        debug!(
            "food eaten, score {} length {} interval {:.2}ms",
            self.score,
            self.snake.len(),
            self.speed_ms
        );

        self.food = self.spawn_food();
        if self.food.is_none() {
            self.end(EndReason::BoardFull);
            return TickOutcome::BoardFull;
        }

        TickOutcome::Ate
    }

    /// Switches between playing and paused; no effect in other states.
    pub fn toggle_pause(&mut self) {
        match self.status {
            GameStatus::Playing => self.set_status(GameStatus::Paused),
            GameStatus::Paused => self.set_status(GameStatus::Playing),
            GameStatus::Idle | GameStatus::GameOver => {}
        }
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => self.request_direction(direction),
            GameInput::Pause => self.toggle_pause(),
            GameInput::Start => match self.status {
                GameStatus::Idle | GameStatus::GameOver => self.reset(),
                GameStatus::Paused => self.toggle_pause(),
                GameStatus::Playing => {}
            },
            GameInput::Confirm => match self.status {
                GameStatus::Idle | GameStatus::GameOver => self.reset(),
                GameStatus::Playing | GameStatus::Paused => self.toggle_pause(),
            },
            GameInput::CycleTheme | GameInput::Quit => {}
        }
    }

    /// Returns the view the renderer draws from.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            snake: &self.snake,
            food: self.food,
            grid_size: self.grid.size(),
            status: self.status,
            score: self.score,
            end_reason: self.end_reason,
        }
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Replaces the snake and aligns the pending direction with its heading.
    pub fn set_snake(&mut self, snake: Snake) {
        self.buffer.reset(snake.direction());
        self.snake = snake;
    }

    /// Direction that the next tick will apply.
    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.buffer.peek()
    }

    #[must_use]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Current tick interval in milliseconds.
    #[must_use]
    pub fn speed_ms(&self) -> f64 {
        self.speed_ms
    }

    /// Current tick interval.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(self.speed_ms / 1000.0)
    }

    fn spawn_food(&mut self) -> Option<Point> {
        match food::place(&mut self.rng, self.grid, self.snake.segments()) {
            Ok(point) => Some(point),
            Err(error) => {
                warn!("cannot place food: {error}");
                None
            }
        }
    }

    fn end(&mut self, reason: EndReason) {
        self.end_reason = Some(reason);
        self.set_status(GameStatus::GameOver);
        info!(
            "session over ({reason:?}) after {} ticks, score {}",
            self.tick_count, self.score
        );
    }

    fn set_status(&mut self, status: GameStatus) {
        if self.status != status {
            debug!("status {:?} -> {status:?}", self.status);
            self.status = status;
        }
    }
}
