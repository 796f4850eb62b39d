use std::collections::HashSet;

use crate::snake::Position;

/// Static obstacle cells in placement order.
#[derive(Debug, Clone, Default)]
pub struct Obstacles {
    cells: Vec<Position>,
    index: HashSet<Position>,
}

impl Obstacles {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an obstacle. Returns `false` if the cell already holds one.
    pub fn insert(&mut self, position: Position) -> bool {
        if !self.index.insert(position) {
            return false;
        }

        self.cells.push(position);
        true
    }

    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.index.contains(&position)
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
        self.index.clear();
    }

    /// Iterates obstacles oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.cells.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Position] {
        &self.cells
    }
}

impl FromIterator<Position> for Obstacles {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        let mut obstacles = Self::new();
        for position in iter {
            obstacles.insert(position);
        }
        obstacles
    }
}
