//! Noise fill and cellular-automata smoothing for cave-shaped terrain.

use crate::types::{Pos, TileKind};

use super::grid::TileGrid;
use super::seed::SeededRng;

pub(super) const WALL_PROBABILITY: f64 = 0.5;
pub(super) const SMOOTHING_PASSES: usize = 4;
pub(super) const WALL_NEIGHBOUR_THRESHOLD: usize = 5;

/// Row-major coin flips. Border cells are walls and consume no randomness.
pub(super) fn synthesize_noise(rng: &mut SeededRng, width: usize, height: usize) -> TileGrid {
    let mut grid = TileGrid::filled(width, height, TileKind::Wall);
    for y in 0..height {
        for x in 0..width {
            if grid.is_border_cell(x, y) {
                continue;
            }
            let tile =
                if rng.next_bool(WALL_PROBABILITY) { TileKind::Wall } else { TileKind::Floor };
            grid.set(Pos { y: y as i32, x: x as i32 }, tile);
        }
    }
    grid
}

pub(super) fn smooth(grid: &TileGrid, passes: usize) -> TileGrid {
    let mut current = grid.clone();
    for _ in 0..passes {
        current = smoothing_pass(&current);
    }
    current
}

fn smoothing_pass(snapshot: &TileGrid) -> TileGrid {
    let mut next = snapshot.clone();
    for y in 1..snapshot.height().saturating_sub(1) {
        for x in 1..snapshot.width().saturating_sub(1) {
            let pos = Pos { y: y as i32, x: x as i32 };
            let tile = if wall_neighbour_count(snapshot, pos) >= WALL_NEIGHBOUR_THRESHOLD {
                TileKind::Wall
            } else {
                TileKind::Floor
            };
            next.set(pos, tile);
        }
    }
    next
}

fn wall_neighbour_count(grid: &TileGrid, pos: Pos) -> usize {
    let mut count = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dy == 0 && dx == 0 {
                continue;
            }
            if grid.tile_at(pos.offset((dy, dx))) == TileKind::Wall {
                count += 1;
            }
        }
    }
    count
}
