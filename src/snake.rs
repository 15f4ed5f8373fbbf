use std::collections::VecDeque;

use crate::config::INITIAL_SNAKE_LENGTH;
use crate::grid::{Grid, Point};
use crate::input::Direction;

/// Ordered snake body, head first, plus the committed heading.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Point>,
    direction: Direction,
}

impl Snake {
    /// Creates the starting snake: head at the board centre, heading up,
    /// with the remaining segments trailing straight below it.
    ///
    /// On the default 20×20 board this is `[(10,10), (10,11), (10,12)]`.
    #[must_use]
    pub fn initial(grid: Grid) -> Self {
        let centre = i32::from(grid.size() / 2);
        let direction = Direction::Up;
        let trailing = direction.opposite();

        let mut body = VecDeque::with_capacity(INITIAL_SNAKE_LENGTH);
        let mut segment = Point::new(centre, centre);
        for _ in 0..INITIAL_SNAKE_LENGTH {
            body.push_back(segment);
            segment = segment.translated(trailing);
        }

        Self { body, direction }
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Point>, direction: Direction) -> Self {
        debug_assert!(!segments.is_empty());

        Self {
            body: VecDeque::from(segments),
            direction,
        }
    }

    /// Prepends `head`; the tail is dropped unless `grow` is set.
    pub fn advance(&mut self, head: Point, grow: bool) {
        self.body.push_front(head);
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Records the heading used for the latest move.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Point {
        self.body[0]
    }

    /// Returns the tail position.
    #[must_use]
    pub fn tail(&self) -> Point {
        self.body[self.body.len() - 1]
    }

    /// Returns true if any segment occupies `point`.
    #[must_use]
    pub fn occupies(&self, point: Point) -> bool {
        self.body.contains(&point)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the committed heading.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Point> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::Snake;
    use crate::grid::{Grid, Point};
    use crate::input::Direction;

    #[test]
    fn initial_snake_matches_default_layout() {
        let snake = Snake::initial(Grid::default());
        let segments: Vec<Point> = snake.segments().copied().collect();

        assert_eq!(
            segments,
            vec![Point::new(10, 10), Point::new(10, 11), Point::new(10, 12)]
        );
        assert_eq!(snake.direction(), Direction::Up);
    }

    #[test]
    fn initial_snake_is_centred_on_small_boards() {
        let snake = Snake::initial(Grid::new(8));

        assert_eq!(snake.head(), Point::new(4, 4));
        assert_eq!(snake.tail(), Point::new(4, 6));
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn advance_without_growth_keeps_length() {
        let mut snake = Snake::initial(Grid::default());

        snake.advance(Point::new(10, 9), false);

        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Point::new(10, 9));
        assert_eq!(snake.tail(), Point::new(10, 11));
    }

    #[test]
    fn snake_growth_keeps_previous_tail() {
        let mut snake = Snake::initial(Grid::default());

        snake.advance(Point::new(10, 9), true);

        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Point::new(10, 12));
        assert!(snake.occupies(Point::new(10, 11)));
    }
}
