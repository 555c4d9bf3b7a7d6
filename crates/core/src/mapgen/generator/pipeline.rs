//! Floor-construction pipeline that composes mapgen subsystems.

use std::time::{Duration, Instant};

use crate::biome::{BiomeConfig, CountRange};
use crate::error::{GenerationFailure, Phase};
use crate::types::{FloorKind, Pos};

use super::super::anchors::{minimum_stairs_distance, place_player_start, place_stairs};
use super::super::connectivity::{RegionRepair, enforce_single_region};
use super::super::export::{PlacedFeatures, assemble_floor};
use super::super::model::{FloorData, ItemPlacement, MapMetadata, NpcPlacement, NpcRole};
use super::super::patches::{PatchContext, grow_grass_patches};
use super::super::roster::{TRAINER_NAMES, pick_name};
use super::super::seed::SeededRng;
use super::super::spawns::{SpawnContext, place_items, place_starter_item, place_trainers};
use super::super::terrain::{SMOOTHING_PASSES, smooth, synthesize_noise};
use super::{floor_map_id, floor_name};

pub(super) struct PipelineInput<'a> {
    pub(super) floor_seed: &'a str,
    pub(super) floor_number: u32,
    pub(super) biome: &'a BiomeConfig,
    pub(super) budget: Duration,
    pub(super) started: Instant,
}

impl PipelineInput<'_> {
    fn check_budget(&self, phase: Phase) -> Result<(), GenerationFailure> {
        let elapsed = self.started.elapsed();
        log::debug!("{} finished after {elapsed:?}", phase.label());
        if elapsed >= self.budget {
            return Err(GenerationFailure::Timeout { phase, elapsed, budget: self.budget });
        }
        Ok(())
    }
}

pub(super) fn run(input: &PipelineInput<'_>) -> Result<FloorData, GenerationFailure> {
    let mut rng = SeededRng::from_seed_str(input.floor_seed);
    let (width, height) = draw_dimensions(&mut rng, input.biome.floor_size);

    let noise = synthesize_noise(&mut rng, width, height);
    let mut grid = smooth(&noise, SMOOTHING_PASSES);
    input.check_budget(Phase::Smoothing)?;

    match enforce_single_region(&mut grid) {
        RegionRepair::KeptLargest { region_count, kept_tiles } => log::debug!(
            "floor {} {width}x{height}: kept {kept_tiles} tiles of {region_count} regions",
            input.floor_number
        ),
        RegionRepair::CarvedCorridor { row } => log::warn!(
            "floor {} {width}x{height}: no open tiles, carved corridor on row {row}",
            input.floor_number
        ),
    }
    input.check_budget(Phase::Connectivity)?;

    let player_start = place_player_start(&grid);
    if !grid.tile_at(player_start).is_floor_like() {
        return Err(GenerationFailure::NoPlayerStart);
    }
    let stairs = place_stairs(&mut grid, player_start);
    let required = minimum_stairs_distance(&grid);
    let distance = stairs.manhattan(player_start);
    if distance < required {
        return Err(GenerationFailure::StairsTooClose { distance, required });
    }

    let grass_patches = grow_grass_patches(&mut PatchContext {
        grid: &mut grid,
        rng: &mut rng,
        player_start,
        stairs,
    });
    let spawn_context = SpawnContext { grid: &grid, player_start };
    let trainers = place_trainers(&spawn_context, &mut rng, input.biome.trainer_count);
    let items = place_items(&spawn_context, &mut rng, input.biome.item_count);
    let starter_item =
        if input.floor_number == 1 { place_starter_item(&grid, player_start) } else { None };

    let metadata = floor_metadata(&mut FloorMetadataContext {
        rng: &mut rng,
        floor_number: input.floor_number,
        biome: input.biome,
        player_start,
        trainers: &trainers,
        items: &items,
        starter_item,
    });

    log::debug!(
        "floor {} assembled in {:?}: {} patches, {} trainers, {} items",
        input.floor_number,
        input.started.elapsed(),
        grass_patches.len(),
        trainers.len(),
        items.len()
    );

    let features =
        PlacedFeatures { player_start, stairs, starter_item, trainers, items, grass_patches };
    Ok(assemble_floor(&grid, metadata, FloorKind::Procedural, input.floor_number, features))
}

fn draw_dimensions(rng: &mut SeededRng, floor_size: CountRange) -> (usize, usize) {
    let width = rng.next_count(floor_size.min, floor_size.max) as usize;
    let height = rng.next_count(floor_size.min, floor_size.max) as usize;
    (width, height)
}

struct FloorMetadataContext<'a> {
    rng: &'a mut SeededRng,
    floor_number: u32,
    biome: &'a BiomeConfig,
    player_start: Pos,
    trainers: &'a [Pos],
    items: &'a [Pos],
    starter_item: Option<Pos>,
}

fn floor_metadata(context: &mut FloorMetadataContext<'_>) -> MapMetadata {
    let mut metadata = biome_metadata(context.floor_number, context.biome, context.player_start);

    for &pos in context.trainers {
        metadata.npcs.push(NpcPlacement {
            name: pick_name(context.rng, TRAINER_NAMES),
            role: NpcRole::Trainer,
            pos,
            encounter: None,
        });
    }
    if let Some(pos) = context.starter_item {
        metadata.items.push(ItemPlacement { pos, starter: true });
    }
    metadata.items.extend(context.items.iter().map(|&pos| ItemPlacement { pos, starter: false }));

    metadata
}

/// Map id, name, and biome tables shared by procedural and fallback floors.
pub(super) fn biome_metadata(
    floor_number: u32,
    biome: &BiomeConfig,
    player_start: Pos,
) -> MapMetadata {
    let mut metadata =
        MapMetadata::new(floor_map_id(floor_number), floor_name(floor_number), player_start);
    metadata.monster_ids = biome.monster_ids.clone();
    metadata.level_range = biome.level_range;
    metadata.ambient_track = biome.ambient_track.clone();
    metadata
}
