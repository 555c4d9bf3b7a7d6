//! Player-start and stairs placement over a connected grid.

use crate::types::{Pos, TileKind};

use super::grid::TileGrid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Edge {
    Top,
    Bottom,
}

/// First floor-like tile scanning rows inward from `edge`, each row centre-out
/// (right offset before left). Falls back to the grid centre.
pub(super) fn edge_scan(grid: &TileGrid, edge: Edge) -> Pos {
    let height = grid.height();
    let rows: Box<dyn Iterator<Item = usize>> = match edge {
        Edge::Top => Box::new(0..height),
        Edge::Bottom => Box::new((0..height).rev()),
    };

    for y in rows {
        if let Some(pos) = scan_row_from_center(grid, y) {
            return pos;
        }
    }

    grid.center()
}

fn scan_row_from_center(grid: &TileGrid, y: usize) -> Option<Pos> {
    let center = (grid.width() / 2) as i32;
    let y = y as i32;

    let at_center = Pos { y, x: center };
    if grid.tile_at(at_center).is_floor_like() {
        return Some(at_center);
    }

    for offset in 1..=grid.width() as i32 {
        for x in [center + offset, center - offset] {
            let pos = Pos { y, x };
            if grid.in_bounds(pos) && grid.tile_at(pos).is_floor_like() {
                return Some(pos);
            }
        }
    }

    None
}

pub(super) fn place_player_start(grid: &TileGrid) -> Pos {
    edge_scan(grid, Edge::Bottom)
}

pub(super) fn minimum_stairs_distance(grid: &TileGrid) -> u32 {
    (grid.width() / 2) as u32
}

/// Picks the stairs tile and stamps it onto the grid.
pub(super) fn place_stairs(grid: &mut TileGrid, player_start: Pos) -> Pos {
    let minimum_distance = minimum_stairs_distance(grid);
    let stairs = far_tile_closest_to_top(grid, player_start, minimum_distance)
        .unwrap_or_else(|| edge_scan(grid, Edge::Top));
    grid.set(stairs, TileKind::StairsDown);
    stairs
}

fn far_tile_closest_to_top(
    grid: &TileGrid,
    player_start: Pos,
    minimum_distance: u32,
) -> Option<Pos> {
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let pos = Pos { y: y as i32, x: x as i32 };
            if grid.tile_at(pos).is_floor_like()
                && pos.manhattan(player_start) >= minimum_distance
            {
                return Some(pos);
            }
        }
    }
    None
}
