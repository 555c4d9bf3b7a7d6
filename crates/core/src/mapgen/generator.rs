//! Floor generation orchestration: the timed pipeline plus the fallback floor.

mod fallback;
mod pipeline;

use std::time::{Duration, Instant};

use crate::biome::BiomeConfig;
use crate::error::GenerationFailure;

use super::model::FloorData;
use super::seed::derive_floor_seed;

pub use fallback::fallback_floor;

pub const DEFAULT_BUDGET: Duration = Duration::from_millis(500);
pub const FLOOR_MAP_ID_BASE: u32 = 1000;

pub fn floor_map_id(floor_number: u32) -> u32 {
    FLOOR_MAP_ID_BASE + floor_number
}

pub fn floor_name(floor_number: u32) -> String {
    format!("Floor {floor_number}")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FloorGenerator {
    budget: Duration,
}

impl Default for FloorGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl FloorGenerator {
    pub fn new() -> Self {
        Self { budget: DEFAULT_BUDGET }
    }

    pub fn with_budget(budget: Duration) -> Self {
        Self { budget }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Never fails: any internal failure is replaced by the fallback floor.
    pub fn generate(&self, run_seed: &str, floor_number: u32, biome: &BiomeConfig) -> FloorData {
        match self.try_generate(run_seed, floor_number, biome) {
            Ok(floor) => floor,
            Err(failure) => {
                log::warn!(
                    "floor {floor_number} of run {run_seed:?} replaced by fallback: {failure}"
                );
                fallback_floor(floor_number, biome)
            }
        }
    }

    pub fn try_generate(
        &self,
        run_seed: &str,
        floor_number: u32,
        biome: &BiomeConfig,
    ) -> Result<FloorData, GenerationFailure> {
        biome.validate()?;
        let floor_seed = derive_floor_seed(run_seed, floor_number);
        pipeline::run(&pipeline::PipelineInput {
            floor_seed: &floor_seed,
            floor_number,
            biome,
            budget: self.budget,
            started: Instant::now(),
        })
    }
}
