pub mod biome;
pub mod error;
pub mod mapgen;
pub mod types;

pub use biome::{BiomeConfig, CountRange, LevelRange};
pub use error::{GenerationFailure, Phase, PortalError};
pub use mapgen::{
    FloorData, FloorGenerator, LegendaryRoom, LegendaryRoomRequest, audit_floor,
    generate_boss_floor, generate_floor, generate_legendary_room, generate_rest_floor,
};
pub use types::*;
