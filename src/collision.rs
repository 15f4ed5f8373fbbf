use crate::grid::{Grid, Point};

/// Outcome of testing a candidate head position.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Collision {
    None,
    Wall,
    SelfHit,
}

impl Collision {
    #[must_use]
    pub fn is_fatal(self) -> bool {
        self != Self::None
    }
}

/// Classifies `candidate` against the board edges and the pre-move body.
///
/// `body` must still contain the current tail. Moving onto the tail cell is
/// reported as [`Collision::SelfHit`] even though the tail would vacate it
/// on the same tick.
#[must_use]
pub fn detect<'a, I>(grid: Grid, candidate: Point, body: I) -> Collision
where
    I: IntoIterator<Item = &'a Point>,
{
    if !grid.is_in_bounds(candidate) {
        return Collision::Wall;
    }

    if body.into_iter().any(|segment| *segment == candidate) {
        return Collision::SelfHit;
    }

    Collision::None
}
