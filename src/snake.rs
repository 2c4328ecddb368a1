use std::collections::vec_deque::{self, VecDeque};

use crate::config::GridSize;
use crate::error::GameError;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns this position wrapped into bounds on both axes.
    #[must_use]
    pub fn wrapped(self, bounds: GridSize) -> Self {
        Self {
            x: self.x.rem_euclid(i32::from(bounds.width)),
            y: self.y.rem_euclid(i32::from(bounds.height)),
        }
    }

    /// Returns the neighbouring cell in `direction`, wrapped toroidally.
    #[must_use]
    pub fn step(self, direction: Direction, bounds: GridSize) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
        .wrapped(bounds)
    }
}

/// Segmented snake body, head first.
///
/// The body is never empty: both constructors guarantee at least one segment
/// and [`Snake::advance`] always pushes before it pops.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Creates a one-cell snake at `start`.
    #[must_use]
    pub fn new(start: Position) -> Self {
        let mut body = VecDeque::new();
        body.push_front(start);
        Self { body }
    }

    /// Creates a snake from explicit body segments (front is head).
    pub fn from_segments(segments: Vec<Position>) -> Result<Self, GameError> {
        if segments.is_empty() {
            return Err(GameError::InvariantViolation("snake body must not be empty"));
        }

        Ok(Self {
            body: VecDeque::from(segments),
        })
    }

    /// Pushes `new_head` and drops the tail unless `grow` is set.
    ///
    /// `new_head` must already be wrapped into the grid.
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        debug_assert!(!self.is_empty());
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        match self.body.front() {
            Some(head) => *head,
            None => unreachable!("snake body must always contain at least one segment"),
        }
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns true if a non-head segment occupies `position`.
    #[must_use]
    pub fn occupies_excluding_head(&self, position: Position) -> bool {
        self.body.iter().skip(1).any(|segment| *segment == position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false for a constructed snake.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> vec_deque::Iter<'_, Position> {
        self.body.iter()
    }
}
