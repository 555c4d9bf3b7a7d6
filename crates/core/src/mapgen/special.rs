//! Fixed-layout rest and boss floors. No terrain synthesis, only stamped rooms.

use crate::biome::LevelRange;
use crate::types::{FloorKind, Pos, TileKind};

use super::export::{PlacedFeatures, assemble_floor};
use super::generator::floor_map_id;
use super::grid::TileGrid;
use super::model::{FloorData, MapMetadata, NpcPlacement, NpcRole};
use super::roster::{BOSS_NAMES, HEALER_NAMES, MERCHANT_NAMES, pick_name};
use super::seed::{SeededRng, derive_floor_seed};

pub const REST_FLOOR_SIZE: usize = 10;
pub const BOSS_FLOOR_SIZE: usize = 15;

const REST_START: Pos = Pos::new(8, 5);
const REST_STAIRS: Pos = Pos::new(1, 5);
const HEALER_POS: Pos = Pos::new(3, 2);
const MERCHANT_POS: Pos = Pos::new(3, 7);

const BOSS_START: Pos = Pos::new(13, 7);
const BOSS_STAIRS: Pos = Pos::new(1, 7);

pub fn generate_rest_floor(floor_number: u32, seed: &str) -> FloorData {
    let mut rng = SeededRng::from_seed_str(&derive_floor_seed(seed, floor_number));
    let grid = stamp_room(REST_FLOOR_SIZE, FloorKind::Rest, TileKind::RestFloor, REST_STAIRS);

    let mut metadata = MapMetadata::new(
        floor_map_id(floor_number),
        format!("Rest Stop {floor_number}"),
        REST_START,
    );
    metadata.ambient_track = "rest_stop_theme".to_string();
    metadata.npcs = vec![
        NpcPlacement {
            name: pick_name(&mut rng, HEALER_NAMES),
            role: NpcRole::Healer,
            pos: HEALER_POS,
            encounter: None,
        },
        NpcPlacement {
            name: pick_name(&mut rng, MERCHANT_NAMES),
            role: NpcRole::Merchant,
            pos: MERCHANT_POS,
            encounter: None,
        },
    ];

    let features = PlacedFeatures::anchors_only(REST_START, REST_STAIRS);
    assemble_floor(&grid, metadata, FloorKind::Rest, floor_number, features)
}

pub fn generate_boss_floor(floor_number: u32, seed: &str) -> FloorData {
    let mut rng = SeededRng::from_seed_str(&derive_floor_seed(seed, floor_number));
    let grid = stamp_room(BOSS_FLOOR_SIZE, FloorKind::Boss, TileKind::Floor, BOSS_STAIRS);
    let boss_pos = grid.center();

    let mut metadata = MapMetadata::new(
        floor_map_id(floor_number),
        format!("Boss Floor {floor_number}"),
        BOSS_START,
    );
    metadata.ambient_track = "boss_battle_theme".to_string();
    let boss_level = boss_level(floor_number);
    metadata.level_range = LevelRange { min: boss_level, max: boss_level };
    metadata.npcs = vec![NpcPlacement {
        name: pick_name(&mut rng, BOSS_NAMES),
        role: NpcRole::Boss,
        pos: boss_pos,
        encounter: None,
    }];

    let mut features = PlacedFeatures::anchors_only(BOSS_START, BOSS_STAIRS);
    features.trainers.push(boss_pos);
    assemble_floor(&grid, metadata, FloorKind::Boss, floor_number, features)
}

fn boss_level(floor_number: u32) -> u8 {
    (10 + floor_number.saturating_mul(3)).min(100) as u8
}

fn stamp_room(size: usize, kind: FloorKind, interior: TileKind, stairs: Pos) -> TileGrid {
    let mut grid = TileGrid::bordered(size, size, kind.border_tile(), interior);
    grid.set(stairs, TileKind::StairsDown);
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_floor_layout() {
        let floor = generate_rest_floor(5, "calm");

        assert_eq!(floor.kind, FloorKind::Rest);
        assert_eq!((floor.width(), floor.height()), (10, 10));
        assert_eq!(floor.map_id(), 1005);
        assert_eq!(floor.tile_at(Pos::new(4, 4)), TileKind::RestFloor);
        assert_eq!(floor.tile_at(floor.stairs), TileKind::StairsDown);
        assert_eq!(floor.npcs().len(), 2);
        assert!(floor.trainers.is_empty());
        assert!(floor.items.is_empty());
        assert!(floor.gameplay_map.encounters.is_empty());
    }

    #[test]
    fn boss_floor_has_gate_border_and_central_boss() {
        let floor = generate_boss_floor(10, "final");

        assert_eq!(floor.kind, FloorKind::Boss);
        assert_eq!((floor.width(), floor.height()), (15, 15));
        assert_eq!(floor.tile_at(Pos::new(0, 0)), TileKind::BossGate);
        assert_eq!(floor.tile_at(Pos::new(14, 7)), TileKind::BossGate);
        assert_eq!(floor.trainers, vec![Pos::new(7, 7)]);
        assert_eq!(floor.npcs()[0].role, NpcRole::Boss);
        assert_eq!(floor.render_map.metadata.level_range, LevelRange { min: 40, max: 40 });
    }

    #[test]
    fn roster_names_follow_the_seed() {
        let a = generate_rest_floor(3, "same");
        let b = generate_rest_floor(3, "same");
        assert_eq!(a.npcs(), b.npcs());
        assert!(HEALER_NAMES.contains(&a.npcs()[0].name.as_str()));
        assert!(MERCHANT_NAMES.contains(&a.npcs()[1].name.as_str()));
    }
}
