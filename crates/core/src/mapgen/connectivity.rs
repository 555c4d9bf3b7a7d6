//! Flood-fill region partitioning and orphan-pocket removal.

use crate::types::{CARDINALS, Pos, TileKind};

use super::grid::TileGrid;

/// What `enforce_single_region` had to do to reach one connected region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum RegionRepair {
    KeptLargest { region_count: usize, kept_tiles: usize },
    CarvedCorridor { row: usize },
}

/// Floor-like regions in row-major discovery order, each listed in fill order.
pub(super) fn find_regions(grid: &TileGrid) -> Vec<Vec<Pos>> {
    let mut visited = vec![false; grid.width() * grid.height()];
    let mut regions = Vec::new();

    for index in 0..visited.len() {
        if visited[index] || !grid.tiles()[index].is_floor_like() {
            continue;
        }
        regions.push(flood_fill(grid, grid.pos_at(index), &mut visited));
    }

    regions
}

fn flood_fill(grid: &TileGrid, start: Pos, visited: &mut [bool]) -> Vec<Pos> {
    let mut region = Vec::new();
    let mut stack = vec![start];
    visited[grid.index(start)] = true;

    while let Some(pos) = stack.pop() {
        region.push(pos);
        for step in CARDINALS {
            let next = pos.offset(step);
            if !grid.in_bounds(next) || !grid.tile_at(next).is_floor_like() {
                continue;
            }
            let next_index = grid.index(next);
            if visited[next_index] {
                continue;
            }
            visited[next_index] = true;
            stack.push(next);
        }
    }

    region
}

pub(super) fn enforce_single_region(grid: &mut TileGrid) -> RegionRepair {
    let regions = find_regions(grid);

    let mut largest: Option<usize> = None;
    for (index, region) in regions.iter().enumerate() {
        let replace = match largest {
            None => true,
            Some(best) => region.len() > regions[best].len(),
        };
        if replace {
            largest = Some(index);
        }
    }

    let Some(largest) = largest else {
        return carve_emergency_corridor(grid);
    };

    for (index, region) in regions.iter().enumerate() {
        if index == largest {
            continue;
        }
        for &pos in region {
            grid.set(pos, TileKind::Wall);
        }
    }

    RegionRepair::KeptLargest { region_count: regions.len(), kept_tiles: regions[largest].len() }
}

fn carve_emergency_corridor(grid: &mut TileGrid) -> RegionRepair {
    let row = grid.height() / 2;
    for x in 1..grid.width().saturating_sub(1) {
        grid.set(Pos { y: row as i32, x: x as i32 }, TileKind::Floor);
    }
    RegionRepair::CarvedCorridor { row }
}
