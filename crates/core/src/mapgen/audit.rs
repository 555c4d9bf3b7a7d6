//! Structural checks over a finished floor. An empty report means every
//! placement and tile invariant holds.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::biome::BiomeConfig;
use crate::types::{CARDINALS, FloorKind, Pos, TileKind};

use super::anchors::minimum_stairs_distance;
use super::connectivity::find_regions;
use super::grid::TileGrid;
use super::model::FloorData;
use super::patches::{MAX_PATCH_COUNT, MAX_PATCH_SIZE, MIN_PATCH_COUNT, MIN_PATCH_SIZE};
use super::spawns::{MIN_DISTANCE_FROM_START, MIN_TRAINER_SPACING};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("tile buffer holds {len} tiles for a {width}x{height} map")]
    MalformedGrid { width: usize, height: usize, len: usize },
    #[error("border tile {pos:?} is {found:?}, expected {expected:?}")]
    BorderBreached { pos: Pos, found: TileKind, expected: TileKind },
    #[error("walkable tiles split into {regions} regions")]
    Disconnected { regions: usize },
    #[error("{anchor} at {pos:?} is not walkable")]
    AnchorBlocked { anchor: &'static str, pos: Pos },
    #[error("stairs are {distance} tiles from the start, need {required}")]
    StairsTooClose { distance: u32, required: u32 },
    #[error("trainers at {first:?} and {second:?} are only {distance} apart")]
    TrainersTooClose { first: Pos, second: Pos, distance: u32 },
    #[error("item at {pos:?} is only {distance} tiles from the start")]
    ItemTooClose { pos: Pos, distance: u32 },
    #[error("{count} grass patches, expected 2..=5")]
    PatchCount { count: usize },
    #[error("grass patch {index} has {size} tiles, expected 3..=8")]
    PatchSize { index: usize, size: usize },
    #[error("grass patch {index} is not one connected tall-grass cluster")]
    PatchMalformed { index: usize },
    #[error("starter item at {pos:?} is not a walkable neighbour of the start")]
    StarterMisplaced { pos: Pos },
    #[error("battle tile indices disagree with the tall grass on the grid")]
    BattleIndexMismatch,
    #[error("{what} count {count} exceeds the biome maximum {max}")]
    TooMany { what: &'static str, count: usize, max: u32 },
    #[error("{what} count {count} is below the biome minimum {min}")]
    TooFew { what: &'static str, count: usize, min: u32 },
    #[error("{width}x{height} is outside the biome floor size range")]
    SizeOutOfRange { width: usize, height: usize },
}

pub fn audit_floor(floor: &FloorData, biome: Option<&BiomeConfig>) -> Vec<Violation> {
    let render = &floor.render_map;
    let Some(grid) = TileGrid::from_tiles(render.width, render.height, render.tiles.clone())
    else {
        return vec![Violation::MalformedGrid {
            width: render.width,
            height: render.height,
            len: render.tiles.len(),
        }];
    };

    let mut violations = Vec::new();
    check_border(&grid, floor.kind, &mut violations);
    check_connectivity(&grid, floor, &mut violations);
    check_spacing(floor, &mut violations);
    check_patches(&grid, floor, &mut violations);
    check_export_indices(&grid, floor, &mut violations);
    if let Some(biome) = biome {
        check_biome_bounds(floor, biome, &mut violations);
    }
    violations
}

fn check_border(grid: &TileGrid, kind: FloorKind, violations: &mut Vec<Violation>) {
    let expected = kind.border_tile();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if !grid.is_border_cell(x, y) {
                continue;
            }
            let pos = Pos { y: y as i32, x: x as i32 };
            let found = grid.tile_at(pos);
            if found != expected {
                violations.push(Violation::BorderBreached { pos, found, expected });
            }
        }
    }
}

fn check_connectivity(grid: &TileGrid, floor: &FloorData, violations: &mut Vec<Violation>) {
    let regions = find_regions(grid).len();
    if regions != 1 {
        violations.push(Violation::Disconnected { regions });
    }
    for (anchor, pos) in [("player start", floor.player_start), ("stairs", floor.stairs)] {
        if !grid.tile_at(pos).is_floor_like() {
            violations.push(Violation::AnchorBlocked { anchor, pos });
        }
    }

    // Legendary rooms anchor their exit next to the entry on purpose.
    if floor.kind != FloorKind::LegendaryRoom {
        let required = minimum_stairs_distance(grid);
        let distance = floor.stairs.manhattan(floor.player_start);
        if distance < required {
            violations.push(Violation::StairsTooClose { distance, required });
        }
    }

    if let Some(pos) = floor.starter_item {
        let tile = grid.tile_at(pos);
        if pos.manhattan(floor.player_start) != 1
            || !tile.is_floor_like()
            || tile == TileKind::StairsDown
        {
            violations.push(Violation::StarterMisplaced { pos });
        }
    }
}

fn check_spacing(floor: &FloorData, violations: &mut Vec<Violation>) {
    for (index, &first) in floor.trainers.iter().enumerate() {
        for &second in &floor.trainers[index + 1..] {
            let distance = first.manhattan(second);
            if distance < MIN_TRAINER_SPACING {
                violations.push(Violation::TrainersTooClose { first, second, distance });
            }
        }
    }
    for &pos in &floor.items {
        let distance = pos.manhattan(floor.player_start);
        if distance < MIN_DISTANCE_FROM_START {
            violations.push(Violation::ItemTooClose { pos, distance });
        }
    }
}

fn check_patches(grid: &TileGrid, floor: &FloorData, violations: &mut Vec<Violation>) {
    let count = floor.grass_patches.len();
    let count_range = MIN_PATCH_COUNT as usize..=MAX_PATCH_COUNT as usize;
    if floor.kind == FloorKind::Procedural && !count_range.contains(&count) {
        violations.push(Violation::PatchCount { count });
    }

    let size_range = MIN_PATCH_SIZE as usize..=MAX_PATCH_SIZE as usize;
    for (index, patch) in floor.grass_patches.iter().enumerate() {
        if !size_range.contains(&patch.len()) {
            violations.push(Violation::PatchSize { index, size: patch.len() });
        }
        let all_grass = patch.iter().all(|&pos| grid.tile_at(pos) == TileKind::TallGrass);
        if !all_grass || !is_single_cluster(patch) {
            violations.push(Violation::PatchMalformed { index });
        }
    }
}

fn is_single_cluster(patch: &[Pos]) -> bool {
    let Some(&first) = patch.first() else {
        return false;
    };
    let members: BTreeSet<Pos> = patch.iter().copied().collect();
    let mut reached = BTreeSet::from([first]);
    let mut stack = vec![first];
    while let Some(pos) = stack.pop() {
        for step in CARDINALS {
            let next = pos.offset(step);
            if members.contains(&next) && reached.insert(next) {
                stack.push(next);
            }
        }
    }
    reached.len() == members.len()
}

fn check_export_indices(grid: &TileGrid, floor: &FloorData, violations: &mut Vec<Violation>) {
    let grass = grid.indices_where(TileKind::is_encounter);
    let render_battle: Vec<usize> = floor.render_map.battle_tiles.iter().copied().collect();
    let gameplay = &floor.gameplay_map;
    if render_battle != grass
        || gameplay.encounters != grass
        || gameplay.collision != grid.indices_where(TileKind::is_collision)
        || gameplay.hazards != grid.indices_where(TileKind::is_hazard)
    {
        violations.push(Violation::BattleIndexMismatch);
    }
}

fn check_biome_bounds(floor: &FloorData, biome: &BiomeConfig, violations: &mut Vec<Violation>) {
    if floor.kind != FloorKind::Procedural {
        return;
    }
    for (what, count, max) in [
        ("trainer", floor.trainers.len(), biome.trainer_count.max),
        ("item", floor.items.len(), biome.item_count.max),
    ] {
        if count > max as usize {
            violations.push(Violation::TooMany { what, count, max });
        }
    }
    // Trainers may legitimately run short of their minimum; items may not.
    let (count, min) = (floor.items.len(), biome.item_count.min);
    if count < min as usize {
        violations.push(Violation::TooFew { what: "item", count, min });
    }
    let (width, height) = (floor.width(), floor.height());
    if !biome.floor_size.contains(width as u32) || !biome.floor_size.contains(height as u32) {
        violations.push(Violation::SizeOutOfRange { width, height });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::generator::{FloorGenerator, fallback_floor};

    #[test]
    fn generated_floor_passes_audit() {
        let biome = BiomeConfig::default();
        let floor = FloorGenerator::new().generate("audit", 2, &biome);
        assert_eq!(audit_floor(&floor, Some(&biome)), Vec::new());
    }

    #[test]
    fn missing_items_are_reported_against_the_biome_minimum() {
        let biome = BiomeConfig::default();
        let mut floor = FloorGenerator::new().generate("audit", 2, &biome);
        assert_eq!(floor.kind, FloorKind::Procedural);
        floor.items.clear();

        let violations = audit_floor(&floor, Some(&biome));
        assert!(violations.contains(&Violation::TooFew {
            what: "item",
            count: 0,
            min: biome.item_count.min,
        }));
    }

    #[test]
    fn fallback_floor_passes_audit() {
        let floor = fallback_floor(1, &BiomeConfig::default());
        assert_eq!(audit_floor(&floor, None), Vec::new());
    }

    #[test]
    fn breached_border_is_reported() {
        let mut floor = fallback_floor(2, &BiomeConfig::default());
        floor.render_map.tiles[3] = TileKind::Floor;
        let violations = audit_floor(&floor, None);
        assert!(violations.contains(&Violation::BorderBreached {
            pos: Pos::new(0, 3),
            found: TileKind::Floor,
            expected: TileKind::Wall,
        }));
    }

    #[test]
    fn crowded_trainers_and_stale_battle_tiles_are_reported() {
        let mut floor = fallback_floor(2, &BiomeConfig::default());
        floor.trainers = vec![Pos::new(3, 3), Pos::new(3, 5)];
        floor.render_map.battle_tiles.insert(44);

        let violations = audit_floor(&floor, None);
        assert!(violations.contains(&Violation::TrainersTooClose {
            first: Pos::new(3, 3),
            second: Pos::new(3, 5),
            distance: 2,
        }));
        assert!(violations.contains(&Violation::BattleIndexMismatch));
    }

    #[test]
    fn split_regions_are_reported() {
        let mut floor = fallback_floor(2, &BiomeConfig::default());
        for x in 1..9 {
            floor.render_map.tiles[5 * 10 + x] = TileKind::Wall;
        }
        let violations = audit_floor(&floor, None);
        assert!(violations.contains(&Violation::Disconnected { regions: 2 }));
    }

    #[test]
    fn malformed_buffer_short_circuits() {
        let mut floor = fallback_floor(2, &BiomeConfig::default());
        floor.render_map.tiles.pop();
        assert_eq!(audit_floor(&floor, None), vec![Violation::MalformedGrid {
            width: 10,
            height: 10,
            len: 99,
        }]);
    }
}
