use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::config::{CELL_WIDTH, SWIPE_THRESHOLD_CELLS};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit step `(dx, dy)` on the board, `y` growing downward.
    #[must_use]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// High-level input events consumed by the game loop.
///
/// `Direction`, `Pause` and `Start` reach the engine; `Confirm` is the
/// space-bar action that starts a new game or toggles pause depending on
/// status. `CycleTheme` and `Quit` are handled by the front-end.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Pause,
    Start,
    Confirm,
    CycleTheme,
    Quit,
}

/// Maps one key press to a game input, ignoring releases and repeats of
/// non-directional keys.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c' | 'C')).then_some(GameInput::Quit);
    }

    let direction = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => Some(Direction::Right),
        _ => None,
    };
    if let Some(direction) = direction {
        return Some(GameInput::Direction(direction));
    }

    if key.kind == KeyEventKind::Repeat {
        return None;
    }

    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter => Some(GameInput::Confirm),
        KeyCode::Char('p' | 'P') | KeyCode::Esc => Some(GameInput::Pause),
        KeyCode::Char('r' | 'R') => Some(GameInput::Start),
        KeyCode::Char('t' | 'T') => Some(GameInput::CycleTheme),
        KeyCode::Char('q' | 'Q') => Some(GameInput::Quit),
        _ => None,
    }
}

/// Recognises a left-button drag as a directional swipe.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwipeTracker {
    start: Option<(u16, u16)>,
}

impl SwipeTracker {
    /// Records where a drag begins, in terminal cells.
    pub fn begin(&mut self, column: u16, row: u16) {
        self.start = Some((column, row));
    }

    /// Finishes a drag; returns the swipe direction if it was long enough.
    ///
    /// The dominant axis wins. Horizontal distance is measured in grid
    /// cells, so one cell spans [`CELL_WIDTH`] columns.
    pub fn end(&mut self, column: u16, row: u16) -> Option<Direction> {
        let (start_column, start_row) = self.start.take()?;

        let dx = (i32::from(column) - i32::from(start_column)) / i32::from(CELL_WIDTH);
        let dy = i32::from(row) - i32::from(start_row);

        if dx.abs() > dy.abs() {
            (dx.abs() >= SWIPE_THRESHOLD_CELLS).then(|| {
                if dx > 0 {
                    Direction::Right
                } else {
                    Direction::Left
                }
            })
        } else {
            (dy.abs() >= SWIPE_THRESHOLD_CELLS).then(|| {
                if dy > 0 {
                    Direction::Down
                } else {
                    Direction::Up
                }
            })
        }
    }
}

/// Input behaviour chosen at startup.
#[derive(Debug, Clone, Copy)]
pub struct InputConfig {
    pub enable_mouse: bool,
}

/// Polls the terminal for keyboard and swipe input.
#[derive(Debug)]
pub struct InputHandler {
    config: InputConfig,
    swipe: SwipeTracker,
}

impl InputHandler {
    #[must_use]
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            swipe: SwipeTracker::default(),
        }
    }

    /// Waits up to `timeout` for one event and translates it.
    ///
    /// Returns `Ok(None)` on timeout or for events that carry no game input.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        Ok(match event::read()? {
            Event::Key(key) => map_key(key),
            Event::Mouse(mouse) if self.config.enable_mouse => self.handle_mouse(mouse),
            _ => None,
        })
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<GameInput> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.swipe.begin(mouse.column, mouse.row);
                None
            }
            MouseEventKind::Up(MouseButton::Left) => self
                .swipe
                .end(mouse.column, mouse.row)
                .map(GameInput::Direction),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

    use super::{map_key, Direction, GameInput, SwipeTracker};

    const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn opposite_is_an_involution() {
        for direction in ALL {
            assert_eq!(direction.opposite().opposite(), direction);
            assert_ne!(direction.opposite(), direction);
        }
    }

    #[test]
    fn offsets_of_opposites_cancel() {
        for direction in ALL {
            let (dx, dy) = direction.offset();
            let (ox, oy) = direction.opposite().offset();
            assert_eq!((dx + ox, dy + oy), (0, 0));
            assert_eq!(dx.abs() + dy.abs(), 1);
        }
    }

    #[test]
    fn arrow_and_wasd_keys_map_to_directions() {
        let press = |code| KeyEvent::new(code, KeyModifiers::NONE);

        assert_eq!(
            map_key(press(KeyCode::Up)),
            Some(GameInput::Direction(Direction::Up))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('a'))),
            Some(GameInput::Direction(Direction::Left))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('D'))),
            Some(GameInput::Direction(Direction::Right))
        );
        assert_eq!(map_key(press(KeyCode::Char(' '))), Some(GameInput::Confirm));
        assert_eq!(map_key(press(KeyCode::Char('q'))), Some(GameInput::Quit));
        assert_eq!(map_key(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut key = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;

        assert_eq!(map_key(key), None);
    }

    #[test]
    fn ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);

        assert_eq!(map_key(key), Some(GameInput::Quit));
    }

    #[test]
    fn swipe_uses_dominant_axis() {
        let mut swipe = SwipeTracker::default();

        swipe.begin(10, 10);
        assert_eq!(swipe.end(20, 11), Some(Direction::Right));

        swipe.begin(10, 10);
        assert_eq!(swipe.end(11, 4), Some(Direction::Up));
    }

    #[test]
    fn short_swipe_is_ignored() {
        let mut swipe = SwipeTracker::default();

        swipe.begin(10, 10);
        assert_eq!(swipe.end(12, 10), None);

        // Release without a press is not a swipe either.
        assert_eq!(swipe.end(30, 30), None);
    }
}
