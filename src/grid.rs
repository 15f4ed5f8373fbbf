use crate::config::GRID_SIZE;
use crate::input::Direction;

/// Cell coordinate on the board; `y` grows downward.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring cell one step in `direction`.
    ///
    /// The result may lie outside the board; callers check it with
    /// [`Grid::is_in_bounds`].
    #[must_use]
    pub fn translated(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Fixed square board of `size` × `size` cells.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Grid {
    size: u16,
}

impl Grid {
    #[must_use]
    pub const fn new(size: u16) -> Self {
        Self { size }
    }

    /// Side length in cells.
    #[must_use]
    pub fn size(self) -> u16 {
        self.size
    }

    /// Returns true iff `0 <= x < size` and `0 <= y < size`.
    #[must_use]
    pub fn is_in_bounds(self, point: Point) -> bool {
        let size = i32::from(self.size);
        (0..size).contains(&point.x) && (0..size).contains(&point.y)
    }

    /// Returns the total number of cells on the board.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.size) * usize::from(self.size)
    }

    /// Iterates every cell in row-major order.
    pub fn cells(self) -> impl Iterator<Item = Point> {
        let size = i32::from(self.size);
        (0..size).flat_map(move |y| (0..size).map(move |x| Point { x, y }))
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(GRID_SIZE)
    }
}
