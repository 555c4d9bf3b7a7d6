//! Builders turning a finished grid into the renderable and gameplay exports.
//!
//! Both exports recompute their index sets from the grid itself, never from
//! placement bookkeeping, so they always agree on tile semantics.

use std::collections::BTreeSet;

use crate::types::{FloorKind, Pos, TileKind};

use super::grid::TileGrid;
use super::model::{FloorData, GameplayMap, MapMetadata, RenderMap};

pub fn build_render_map(grid: &TileGrid, metadata: &MapMetadata) -> RenderMap {
    let battle_tiles: BTreeSet<usize> =
        grid.indices_where(|tile| tile == TileKind::TallGrass).into_iter().collect();

    RenderMap {
        width: grid.width(),
        height: grid.height(),
        tiles: grid.tiles().to_vec(),
        battle_tiles,
        metadata: metadata.clone(),
    }
}

pub fn build_gameplay_map(grid: &TileGrid, metadata: &MapMetadata) -> GameplayMap {
    GameplayMap {
        width: grid.width(),
        height: grid.height(),
        collision: grid.indices_where(TileKind::is_collision),
        hazards: grid.indices_where(TileKind::is_hazard),
        encounters: grid.indices_where(TileKind::is_encounter),
        metadata: metadata.clone(),
    }
}

/// Coordinates the pipeline settled on, carried alongside the exports.
pub(super) struct PlacedFeatures {
    pub(super) player_start: Pos,
    pub(super) stairs: Pos,
    pub(super) starter_item: Option<Pos>,
    pub(super) trainers: Vec<Pos>,
    pub(super) items: Vec<Pos>,
    pub(super) grass_patches: Vec<Vec<Pos>>,
}

impl PlacedFeatures {
    pub(super) fn anchors_only(player_start: Pos, stairs: Pos) -> Self {
        Self {
            player_start,
            stairs,
            starter_item: None,
            trainers: Vec::new(),
            items: Vec::new(),
            grass_patches: Vec::new(),
        }
    }
}

pub(super) fn assemble_floor(
    grid: &TileGrid,
    metadata: MapMetadata,
    kind: FloorKind,
    floor_number: u32,
    features: PlacedFeatures,
) -> FloorData {
    FloorData {
        kind,
        floor_number,
        render_map: build_render_map(grid, &metadata),
        gameplay_map: build_gameplay_map(grid, &metadata),
        player_start: features.player_start,
        stairs: features.stairs,
        starter_item: features.starter_item,
        trainers: features.trainers,
        items: features.items,
        grass_patches: features.grass_patches,
    }
}
