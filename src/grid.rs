use std::collections::HashSet;

use rand::Rng;

use crate::config::GridSize;
use crate::input::Direction;
use crate::obstacles::Obstacles;
use crate::snake::{Position, Snake};

/// Collects every cell that must not receive a new spawn.
#[must_use]
pub fn occupied(snake: &Snake, obstacles: &Obstacles, extra: &[Position]) -> HashSet<Position> {
    snake
        .segments()
        .chain(obstacles.iter())
        .chain(extra.iter())
        .copied()
        .collect()
}

/// Picks a uniformly random cell outside `occupied`.
///
/// Free cells are enumerated in row-major order before sampling so every
/// free cell has the same probability. Returns `None` when the grid is full.
#[must_use]
pub fn random_free_tile<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    occupied: &HashSet<Position>,
) -> Option<Position> {
    let mut candidates = Vec::with_capacity(bounds.total_cells().saturating_sub(occupied.len()));

    for y in 0..i32::from(bounds.height) {
        for x in 0..i32::from(bounds.width) {
            let position = Position { x, y };
            if !occupied.contains(&position) {
                candidates.push(position);
            }
        }
    }

    if candidates.is_empty() {
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}

/// Returns the dominant axis of the shortest wrap-aware step from `from` to `to`.
///
/// Ties, including `from == to`, resolve to the horizontal axis.
#[must_use]
pub fn direction_between(from: Position, to: Position, bounds: GridSize) -> Direction {
    let dx = shortest_offset(to.x - from.x, i32::from(bounds.width));
    let dy = shortest_offset(to.y - from.y, i32::from(bounds.height));

    if dx.abs() >= dy.abs() {
        if dx < 0 { Direction::Left } else { Direction::Right }
    } else if dy < 0 {
        Direction::Up
    } else {
        Direction::Down
    }
}

fn shortest_offset(delta: i32, size: i32) -> i32 {
    if size <= 0 {
        return delta;
    }

    let half = size / 2;
    let delta = delta.rem_euclid(size);
    if delta > half { delta - size } else { delta }
}
