//! Stateless head-overlap checks.

use crate::snake::Snake;
use crate::walls::WallSet;

/// Returns true if the head overlaps any non-head segment.
#[must_use]
pub fn self_collision(snake: &Snake) -> bool {
    snake.occupies_excluding_head(snake.head())
}

/// Returns true if the head sits on a wall cell.
#[must_use]
pub fn wall_collision(snake: &Snake, walls: &WallSet) -> bool {
    walls.contains(snake.head())
}
