use rand::Rng;
use tracing::warn;

use crate::config::GridSize;
use crate::error::GameError;
use crate::snake::Position;

/// The single active food item on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Spawns food on a cell for which `is_occupied` is false.
    pub fn spawn<R, F>(
        rng: &mut R,
        bounds: GridSize,
        retries: u32,
        is_occupied: F,
    ) -> Result<Self, GameError>
    where
        R: Rng + ?Sized,
        F: Fn(Position) -> bool,
    {
        spawn_position(rng, bounds, retries, is_occupied).map(Self::new)
    }

    /// Moves this food to a fresh free cell and returns the new position.
    pub fn relocate<R, F>(
        &mut self,
        rng: &mut R,
        bounds: GridSize,
        retries: u32,
        is_occupied: F,
    ) -> Result<Position, GameError>
    where
        R: Rng + ?Sized,
        F: Fn(Position) -> bool,
    {
        self.position = spawn_position(rng, bounds, retries, is_occupied)?;
        Ok(self.position)
    }
}

/// Samples uniformly random cells until one is free.
///
/// After `retries` misses the board is scanned for the remaining free cells
/// and one of them is picked, so a nearly full board still terminates.
/// Returns [`GameError::GridFull`] only when no free cell exists.
pub fn spawn_position<R, F>(
    rng: &mut R,
    bounds: GridSize,
    retries: u32,
    is_occupied: F,
) -> Result<Position, GameError>
where
    R: Rng + ?Sized,
    F: Fn(Position) -> bool,
{
    if bounds.width == 0 || bounds.height == 0 {
        return Err(GameError::InvariantViolation("grid must have at least one cell"));
    }

    for _ in 0..retries {
        let candidate = Position::new(
            rng.gen_range(0..i32::from(bounds.width)),
            rng.gen_range(0..i32::from(bounds.height)),
        );
        if !is_occupied(candidate) {
            return Ok(candidate);
        }
    }

    warn!(
        retries,
        width = bounds.width,
        height = bounds.height,
        "random placement exhausted, scanning for free cells"
    );

    let mut candidates = Vec::new();
    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let position = Position::new(x, y);
            if !is_occupied(position) {
                candidates.push(position);
            }
        }
    }

    if candidates.is_empty() {
        return Err(GameError::GridFull {
            width: bounds.width,
            height: bounds.height,
        });
    }

    let index = rng.gen_range(0..candidates.len());
    Ok(candidates[index])
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::config::GridSize;
    use crate::error::GameError;
    use crate::snake::{Position, Snake};

    use super::{spawn_position, Food};

    #[test]
    fn food_spawn_never_overlaps_snake_or_walls() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = Snake::from_segments(vec![
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(2, 0),
        ])
        .expect("non-empty body");
        let walls: HashSet<Position> = [Position::new(3, 3), Position::new(5, 1)].into();
        let bounds = GridSize {
            width: 8,
            height: 6,
        };

        for _ in 0..200 {
            let food = Food::spawn(&mut rng, bounds, 1_000, |position| {
                snake.occupies(position) || walls.contains(&position)
            })
            .expect("board has free cells");
            assert!(!snake.occupies(food.position));
            assert!(!walls.contains(&food.position));
            assert!(food.position.is_within_bounds(bounds));
        }
    }

    #[test]
    fn last_free_cell_is_found_after_retries_run_out() {
        let mut rng = StdRng::seed_from_u64(11);
        let bounds = GridSize {
            width: 4,
            height: 4,
        };
        let free = Position::new(2, 3);

        let position = spawn_position(&mut rng, bounds, 0, |position| position != free)
            .expect("one cell is free");

        assert_eq!(position, free);
    }

    #[test]
    fn full_grid_reports_grid_full() {
        let mut rng = StdRng::seed_from_u64(3);
        let bounds = GridSize {
            width: 3,
            height: 2,
        };

        assert_eq!(
            spawn_position(&mut rng, bounds, 50, |_| true),
            Err(GameError::GridFull {
                width: 3,
                height: 2
            })
        );
    }

    #[test]
    fn relocate_updates_position() {
        let mut rng = StdRng::seed_from_u64(5);
        let bounds = GridSize {
            width: 2,
            height: 1,
        };
        let mut food = Food::new(Position::new(0, 0));

        let moved_to = food
            .relocate(&mut rng, bounds, 100, |position| position == Position::new(0, 0))
            .expect("one cell is free");

        assert_eq!(moved_to, Position::new(1, 0));
        assert_eq!(food.position, moved_to);
    }
}
