use std::collections::{HashSet, VecDeque};

use crate::config::GridSize;
use crate::input::{direction_change_is_valid, Direction};

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
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
            x: wrap_axis(self.x, i32::from(bounds.width)),
            y: wrap_axis(self.y, i32::from(bounds.height)),
        }
    }

    /// Returns the neighbouring cell one step along `direction`, unwrapped.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Reduces `value` into `[0, upper_bound)`.
#[must_use]
pub fn wrap_axis(value: i32, upper_bound: i32) -> i32 {
    value.rem_euclid(upper_bound)
}

/// Snake body with current and queued heading.
///
/// The ordered body and the membership index are updated together on every
/// push and pop, so `occupies` stays O(1).
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    cells: HashSet<Position>,
    direction: Direction,
    queued_direction: Direction,
}

impl Snake {
    /// Creates a one-cell snake at `start` with the provided direction.
    #[must_use]
    pub fn new(start: Position, direction: Direction) -> Self {
        Self::from_segments(vec![start], direction)
    }

    /// Creates a straight snake of `length` cells whose body trails behind
    /// `head`, opposite to `direction`.
    #[must_use]
    pub fn straight(head: Position, direction: Direction, length: u16) -> Self {
        let trailing = direction.opposite();
        let mut segments = Vec::with_capacity(usize::from(length));
        let mut cursor = head;
        for _ in 0..length.max(1) {
            segments.push(cursor);
            cursor = cursor.step(trailing);
        }

        Self::from_segments(segments, direction)
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics if `segments` is empty; a snake always has a head.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        assert!(!segments.is_empty(), "a snake needs at least one segment");

        let cells = segments.iter().copied().collect();
        Self {
            body: VecDeque::from(segments),
            cells,
            direction,
            queued_direction: direction,
        }
    }

    /// Queues a heading for the next tick.
    ///
    /// Returns `false`, leaving the queue untouched, when `direction` would
    /// reverse the heading the snake is currently moving in.
    pub fn queue_direction(&mut self, direction: Direction) -> bool {
        if !direction_change_is_valid(self.direction, direction) {
            return false;
        }

        self.queued_direction = direction;
        true
    }

    /// Makes the queued heading current and returns it.
    pub fn commit_direction(&mut self) -> Direction {
        self.direction = self.queued_direction;
        self.direction
    }

    /// Returns the unwrapped head position one step along the current heading.
    #[must_use]
    pub fn next_head_position(&self) -> Position {
        self.head().step(self.direction)
    }

    /// Adds a new head segment.
    pub fn push_head(&mut self, position: Position) {
        self.body.push_front(position);
        self.cells.insert(position);
    }

    /// Removes and returns the tail segment, keeping at least one segment.
    pub fn pop_tail(&mut self) -> Option<Position> {
        if self.body.len() <= 1 {
            return None;
        }

        let tail = self.body.pop_back()?;
        self.cells.remove(&tail);
        Some(tail)
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns the last segment.
    #[must_use]
    pub fn tail(&self) -> Position {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.cells.contains(&position)
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

    /// Returns true when no two segments share a cell.
    #[must_use]
    pub fn is_self_disjoint(&self) -> bool {
        self.cells.len() == self.body.len()
    }

    /// Returns the heading applied on the last tick.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the heading the next tick will apply.
    #[must_use]
    pub fn queued_direction(&self) -> Direction {
        self.queued_direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &Position> + ExactSizeIterator {
        self.body.iter()
    }
}
