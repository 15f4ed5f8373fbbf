use std::collections::HashSet;

use log::debug;
use rand::Rng;
use thiserror::Error;

use crate::config::FOOD_SAMPLE_ATTEMPTS;
use crate::grid::{Grid, Point};

/// Food placement failure.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum PlacementError {
    /// Every cell on the board is excluded.
    #[error("no free cell left on the {size}x{size} board")]
    BoardFull { size: u16 },
}

/// Picks a uniformly random board cell not contained in `exclude`.
///
/// Uses rejection sampling first; after [`FOOD_SAMPLE_ATTEMPTS`] misses it
/// draws from the explicit list of free cells instead, so a crowded board
/// never loops unbounded. Fails with [`PlacementError::BoardFull`] when no
/// cell is free.
pub fn place<'a, R, I>(rng: &mut R, grid: Grid, exclude: I) -> Result<Point, PlacementError>
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = &'a Point>,
{
    let occupied: HashSet<Point> = exclude
        .into_iter()
        .copied()
        .filter(|point| grid.is_in_bounds(*point))
        .collect();

    if occupied.len() >= grid.total_cells() {
        return Err(PlacementError::BoardFull { size: grid.size() });
    }

    let size = i32::from(grid.size());
    for _ in 0..FOOD_SAMPLE_ATTEMPTS {
        let candidate = Point::new(rng.gen_range(0..size), rng.gen_range(0..size));
        if !occupied.contains(&candidate) {
            return Ok(candidate);
        }
    }

    debug!(
        "food sampling missed {FOOD_SAMPLE_ATTEMPTS} times with {} of {} cells occupied",
        occupied.len(),
        grid.total_cells()
    );

    let free: Vec<Point> = grid
        .cells()
        .filter(|cell| !occupied.contains(cell))
        .collect();
    let index = rng.gen_range(0..free.len());
    Ok(free[index])
}
