//! Organic tall-grass clusters grown by shuffled breadth-first expansion.

use std::collections::VecDeque;

use crate::types::{CARDINALS, Pos, TileKind};

use super::grid::TileGrid;
use super::seed::SeededRng;

pub(super) const MIN_PATCH_COUNT: i32 = 2;
pub(super) const MAX_PATCH_COUNT: i32 = 5;
pub(super) const MIN_PATCH_SIZE: i32 = 3;
pub(super) const MAX_PATCH_SIZE: i32 = 8;

pub(super) struct PatchContext<'a> {
    pub(super) grid: &'a mut TileGrid,
    pub(super) rng: &'a mut SeededRng,
    pub(super) player_start: Pos,
    pub(super) stairs: Pos,
}

pub(super) fn grow_grass_patches(context: &mut PatchContext<'_>) -> Vec<Vec<Pos>> {
    let target_count = context.rng.next_int(MIN_PATCH_COUNT, MAX_PATCH_COUNT) as usize;
    let shuffled = context.rng.shuffle(&context.grid.interior_positions_of(TileKind::Floor));

    let mut claimed = vec![false; context.grid.width() * context.grid.height()];
    let mut patches = Vec::with_capacity(target_count);

    for seed in shuffled {
        if patches.len() >= target_count {
            break;
        }
        if !accepts(context, &claimed, seed) {
            continue;
        }

        let target_size = context.rng.next_int(MIN_PATCH_SIZE, MAX_PATCH_SIZE) as usize;
        let patch = grow_patch(context, &mut claimed, seed, target_size);
        if patch.len() < MIN_PATCH_SIZE as usize {
            for &pos in &patch {
                context.grid.set(pos, TileKind::Floor);
                let index = context.grid.index(pos);
                claimed[index] = false;
            }
            continue;
        }
        patches.push(patch);
    }

    if patches.len() < target_count {
        log::trace!("placed {} of {target_count} grass patches", patches.len());
    }
    patches
}

fn grow_patch(
    context: &mut PatchContext<'_>,
    claimed: &mut [bool],
    seed: Pos,
    target_size: usize,
) -> Vec<Pos> {
    let mut patch = vec![seed];
    claim(context.grid, claimed, seed);

    let mut open = VecDeque::from([seed]);
    while let Some(pos) = open.pop_front() {
        if patch.len() >= target_size {
            break;
        }
        for step in context.rng.shuffle(&CARDINALS) {
            if patch.len() >= target_size {
                break;
            }
            let next = pos.offset(step);
            if !accepts(context, claimed, next) {
                continue;
            }
            claim(context.grid, claimed, next);
            patch.push(next);
            open.push_back(next);
        }
    }

    patch
}

fn accepts(context: &PatchContext<'_>, claimed: &[bool], pos: Pos) -> bool {
    context.grid.is_interior(pos)
        && pos != context.player_start
        && pos != context.stairs
        && !claimed[context.grid.index(pos)]
        && context.grid.tile_at(pos) == TileKind::Floor
}

fn claim(grid: &mut TileGrid, claimed: &mut [bool], pos: Pos) {
    claimed[grid.index(pos)] = true;
    grid.set(pos, TileKind::TallGrass);
}
