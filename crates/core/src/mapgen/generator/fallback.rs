//! Fixed safe floor substituted whenever the procedural pipeline gives up.

use crate::biome::BiomeConfig;
use crate::types::{FloorKind, Pos, TileKind};

use super::super::export::{PlacedFeatures, assemble_floor};
use super::super::grid::TileGrid;
use super::super::model::{FloorData, ItemPlacement};
use super::super::spawns::place_starter_item;
use super::pipeline::biome_metadata;

pub const FALLBACK_SIZE: usize = 10;
pub const FALLBACK_START: Pos = Pos::new(8, 1);
pub const FALLBACK_STAIRS: Pos = Pos::new(1, 8);

/// Open bordered room with start and stairs in opposite corners. Uses no randomness.
pub fn fallback_floor(floor_number: u32, biome: &BiomeConfig) -> FloorData {
    let mut grid =
        TileGrid::bordered(FALLBACK_SIZE, FALLBACK_SIZE, TileKind::Wall, TileKind::Floor);
    grid.set(FALLBACK_STAIRS, TileKind::StairsDown);

    let mut metadata = biome_metadata(floor_number, biome, FALLBACK_START);
    let mut features = PlacedFeatures::anchors_only(FALLBACK_START, FALLBACK_STAIRS);
    if floor_number == 1 {
        features.starter_item = place_starter_item(&grid, FALLBACK_START);
    }
    if let Some(pos) = features.starter_item {
        metadata.items.push(ItemPlacement { pos, starter: true });
    }

    assemble_floor(&grid, metadata, FloorKind::Fallback, floor_number, features)
}
