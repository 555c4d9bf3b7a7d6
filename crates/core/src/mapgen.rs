//! Procedural floor generation split into coherent submodules.

pub mod audit;
pub mod legendary;
pub mod model;
pub mod special;

mod anchors;
mod connectivity;
mod export;
mod generator;
mod grid;
mod patches;
mod roster;
mod seed;
mod spawns;
mod terrain;

pub use audit::{Violation, audit_floor};
pub use export::{build_gameplay_map, build_render_map};
pub use generator::{DEFAULT_BUDGET, FloorGenerator, fallback_floor, floor_map_id, floor_name};
pub use grid::TileGrid;
pub use legendary::{LegendaryRoom, LegendaryRoomRequest, generate_legendary_room};
pub use model::{
    EncounterScript, FloorData, GameplayMap, ItemPlacement, Jonction, MapMetadata, NpcPlacement,
    NpcRole, RenderMap,
};
pub use seed::{SeededRng, derive_floor_seed};
pub use special::{generate_boss_floor, generate_rest_floor};

use crate::biome::BiomeConfig;

/// Generates floor `floor_number` of run `seed` under the default budget.
pub fn generate_floor(seed: &str, floor_number: u32, biome: &BiomeConfig) -> FloorData {
    FloorGenerator::new().generate(seed, floor_number, biome)
}

#[cfg(test)]
mod tests {
    use super::{FloorGenerator, generate_floor};
    use crate::biome::BiomeConfig;

    #[test]
    fn generate_floor_matches_floor_generator_output() {
        let biome = BiomeConfig::default();
        let from_helper = generate_floor("granite", 2, &biome);
        let from_generator = FloorGenerator::new().generate("granite", 2, &biome);
        assert_eq!(from_helper, from_generator);
    }
}
