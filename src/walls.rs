use rand::Rng;

use crate::config::GridSize;
use crate::error::GameError;
use crate::food::spawn_position;
use crate::snake::Position;

/// Static obstacle cells. Replaced wholesale on every regeneration.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct WallSet {
    cells: Vec<Position>,
}

impl WallSet {
    /// Creates an empty wall set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a wall set from explicit cells.
    #[must_use]
    pub fn from_cells(cells: Vec<Position>) -> Self {
        Self { cells }
    }

    /// Replaces all walls with `count` distinct cells avoiding `is_excluded`.
    ///
    /// On failure the previous walls are left untouched.
    pub fn regenerate<R, F>(
        &mut self,
        rng: &mut R,
        bounds: GridSize,
        count: usize,
        retries: u32,
        is_excluded: F,
    ) -> Result<(), GameError>
    where
        R: Rng + ?Sized,
        F: Fn(Position) -> bool,
    {
        let mut cells: Vec<Position> = Vec::new();
        for _ in 0..count {
            let cell = spawn_position(rng, bounds, retries, |position| {
                is_excluded(position) || cells.contains(&position)
            })?;
            cells.push(cell);
        }

        self.cells = cells;
        Ok(())
    }

    /// Returns true when `position` is a wall.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.cells.contains(&position)
    }

    /// Returns the wall cells in placement order.
    #[must_use]
    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }
}
