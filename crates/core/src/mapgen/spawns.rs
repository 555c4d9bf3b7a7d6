//! Trainer, item, and starter-item placement rules for generated floors.

use crate::biome::CountRange;
use crate::types::{CARDINALS, Pos, TileKind};

use super::grid::TileGrid;
use super::seed::SeededRng;

pub(super) const MIN_TRAINER_SPACING: u32 = 5;
pub(super) const MIN_DISTANCE_FROM_START: u32 = 3;
pub(super) const LINE_OF_SIGHT_RUN: usize = 3;

pub(super) struct SpawnContext<'a> {
    pub(super) grid: &'a TileGrid,
    pub(super) player_start: Pos,
}

impl SpawnContext<'_> {
    /// Interior open floor at least `MIN_DISTANCE_FROM_START` away from the start.
    fn distant_open_floor(&self) -> Vec<Pos> {
        self.grid
            .interior_positions_of(TileKind::Floor)
            .into_iter()
            .filter(|pos| pos.manhattan(self.player_start) >= MIN_DISTANCE_FROM_START)
            .collect()
    }
}

pub(super) fn place_trainers(
    context: &SpawnContext<'_>,
    rng: &mut SeededRng,
    range: CountRange,
) -> Vec<Pos> {
    let target = draw_count(rng, range);
    let candidates = rng.shuffle(&context.distant_open_floor());

    let mut trainers: Vec<Pos> = Vec::with_capacity(target);
    for candidate in candidates {
        if trainers.len() >= target {
            break;
        }
        let spaced =
            trainers.iter().all(|trainer| trainer.manhattan(candidate) >= MIN_TRAINER_SPACING);
        if spaced && has_line_of_sight(context.grid, candidate) {
            trainers.push(candidate);
        }
    }

    if trainers.len() < target {
        log::trace!("placed {} of {target} trainers", trainers.len());
    }
    trainers
}

/// True when at least one cardinal ray crosses `LINE_OF_SIGHT_RUN` non-wall tiles.
pub(super) fn has_line_of_sight(grid: &TileGrid, origin: Pos) -> bool {
    CARDINALS.iter().any(|&step| {
        let mut run = 0;
        let mut pos = origin.offset(step);
        while !grid.tile_at(pos).is_collision() {
            run += 1;
            if run >= LINE_OF_SIGHT_RUN {
                return true;
            }
            pos = pos.offset(step);
        }
        false
    })
}

pub(super) fn place_items(
    context: &SpawnContext<'_>,
    rng: &mut SeededRng,
    range: CountRange,
) -> Vec<Pos> {
    let target = draw_count(rng, range);
    let candidates = rng.shuffle(&context.distant_open_floor());
    if candidates.len() < target {
        log::trace!("only {} item tiles for {target} items", candidates.len());
    }
    candidates.into_iter().take(target).collect()
}

/// First walkable, non-stairs neighbour of the start in up, left, right, down order.
pub(super) fn place_starter_item(grid: &TileGrid, player_start: Pos) -> Option<Pos> {
    CARDINALS.iter().map(|&step| player_start.offset(step)).find(|&pos| {
        let tile = grid.tile_at(pos);
        tile.is_floor_like() && tile != TileKind::StairsDown
    })
}

fn draw_count(rng: &mut SeededRng, range: CountRange) -> usize {
    rng.next_count(range.min, range.max) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trainers_keep_spacing_and_distance_from_start() {
        let grid = TileGrid::bordered(30, 30, TileKind::Wall, TileKind::Floor);
        let context = SpawnContext { grid: &grid, player_start: Pos { y: 28, x: 15 } };
        let mut rng = SeededRng::from_seed_str("trainers");
        let trainers = place_trainers(&context, &mut rng, CountRange { min: 4, max: 6 });

        assert!((4..=6).contains(&trainers.len()), "trainer count {}", trainers.len());
        for (index, trainer) in trainers.iter().enumerate() {
            assert!(trainer.manhattan(context.player_start) >= 3);
            for other in &trainers[index + 1..] {
                assert!(trainer.manhattan(*other) >= 5, "{trainer:?} too close to {other:?}");
            }
        }
    }

    #[test]
    fn trainers_degrade_gracefully_when_space_runs_out() {
        let grid = TileGrid::bordered(9, 9, TileKind::Wall, TileKind::Floor);
        let context = SpawnContext { grid: &grid, player_start: Pos { y: 7, x: 4 } };
        let mut rng = SeededRng::from_seed_str("crowded");
        let trainers = place_trainers(&context, &mut rng, CountRange { min: 20, max: 20 });
        assert!(trainers.len() < 20);
        assert!(!trainers.is_empty());
    }

    #[test]
    fn line_of_sight_needs_three_open_tiles_in_one_direction() {
        let mut grid = TileGrid::filled(9, 9, TileKind::Wall);
        let origin = Pos { y: 4, x: 4 };
        grid.set(origin, TileKind::Floor);
        grid.set(Pos { y: 4, x: 5 }, TileKind::Floor);
        grid.set(Pos { y: 4, x: 6 }, TileKind::Floor);
        assert!(!has_line_of_sight(&grid, origin));

        grid.set(Pos { y: 4, x: 7 }, TileKind::TallGrass);
        assert!(has_line_of_sight(&grid, origin));
    }

    #[test]
    fn line_of_sight_runs_over_hazards() {
        let mut grid = TileGrid::filled(9, 9, TileKind::Wall);
        let origin = Pos { y: 4, x: 1 };
        grid.set(origin, TileKind::Floor);
        grid.set(Pos { y: 4, x: 2 }, TileKind::Water);
        grid.set(Pos { y: 4, x: 3 }, TileKind::Lava);
        assert!(!has_line_of_sight(&grid, origin));

        grid.set(Pos { y: 4, x: 4 }, TileKind::Water);
        assert!(has_line_of_sight(&grid, origin));
    }

    #[test]
    fn items_stay_away_from_start_and_hit_the_requested_count() {
        let grid = TileGrid::bordered(20, 20, TileKind::Wall, TileKind::Floor);
        let context = SpawnContext { grid: &grid, player_start: Pos { y: 18, x: 10 } };
        let mut rng = SeededRng::from_seed_str("items");
        let items = place_items(&context, &mut rng, CountRange { min: 3, max: 3 });

        assert_eq!(items.len(), 3);
        for item in items {
            assert!(item.manhattan(context.player_start) >= 3);
            assert_eq!(grid.tile_at(item), TileKind::Floor);
        }
    }

    #[test]
    fn starter_item_sits_next_to_the_start() {
        let mut grid = TileGrid::filled(5, 5, TileKind::Wall);
        let start = Pos { y: 2, x: 2 };
        grid.set(start, TileKind::Floor);
        assert_eq!(place_starter_item(&grid, start), None);

        grid.set(Pos { y: 1, x: 2 }, TileKind::StairsDown);
        grid.set(Pos { y: 2, x: 3 }, TileKind::Floor);
        assert_eq!(place_starter_item(&grid, start), Some(Pos { y: 2, x: 3 }));
    }
}
