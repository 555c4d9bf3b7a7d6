//! Read-only biome configuration consumed by the procedural pipeline.

use serde::{Deserialize, Serialize};

use crate::error::GenerationFailure;

pub const MIN_FLOOR_SIZE: u32 = 10;
pub const MAX_FLOOR_SIZE: u32 = 128;
pub const MAX_SPAWN_COUNT: u32 = 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRange {
    pub min: u8,
    pub max: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiomeConfig {
    pub name: String,
    pub monster_ids: Vec<u32>,
    pub level_range: LevelRange,
    pub ambient_track: String,
    pub trainer_count: CountRange,
    pub item_count: CountRange,
    pub floor_size: CountRange,
}

impl BiomeConfig {
    pub fn validate(&self) -> Result<(), GenerationFailure> {
        check_range("trainer_count", self.trainer_count)?;
        check_range("item_count", self.item_count)?;
        check_range("floor_size", self.floor_size)?;
        if self.level_range.min > self.level_range.max {
            return Err(GenerationFailure::InvalidBiome(format!(
                "level_range {}..={} is reversed",
                self.level_range.min, self.level_range.max
            )));
        }
        let spawn_ranges = [("trainer_count", self.trainer_count), ("item_count", self.item_count)];
        for (field, range) in spawn_ranges {
            if range.max > MAX_SPAWN_COUNT {
                return Err(GenerationFailure::InvalidBiome(format!(
                    "{field} {}..={} exceeds {MAX_SPAWN_COUNT}",
                    range.min, range.max
                )));
            }
        }
        if self.floor_size.min < MIN_FLOOR_SIZE || self.floor_size.max > MAX_FLOOR_SIZE {
            return Err(GenerationFailure::InvalidBiome(format!(
                "floor_size {}..={} must stay within {MIN_FLOOR_SIZE}..={MAX_FLOOR_SIZE}",
                self.floor_size.min, self.floor_size.max
            )));
        }
        Ok(())
    }
}

impl Default for BiomeConfig {
    fn default() -> Self {
        Self {
            name: "Mossy Cavern".to_string(),
            monster_ids: vec![10, 13, 16, 19, 41, 74],
            level_range: LevelRange { min: 3, max: 8 },
            ambient_track: "cavern_ambience".to_string(),
            trainer_count: CountRange::new(2, 4),
            item_count: CountRange::new(2, 5),
            floor_size: CountRange::new(30, 40),
        }
    }
}

fn check_range(field: &str, range: CountRange) -> Result<(), GenerationFailure> {
    if range.min > range.max {
        return Err(GenerationFailure::InvalidBiome(format!(
            "{field} {}..={} is reversed",
            range.min, range.max
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_biome_is_valid() {
        assert_eq!(BiomeConfig::default().validate(), Ok(()));
    }

    #[test]
    fn reversed_ranges_are_rejected() {
        let biome = BiomeConfig { item_count: CountRange::new(5, 2), ..BiomeConfig::default() };
        let err = biome.validate().expect_err("reversed item range must fail");
        assert!(err.to_string().contains("item_count"), "unexpected message: {err}");
    }

    #[test]
    fn tiny_floors_are_rejected() {
        let biome = BiomeConfig { floor_size: CountRange::new(4, 6), ..BiomeConfig::default() };
        assert!(matches!(biome.validate(), Err(GenerationFailure::InvalidBiome(_))));
    }

    #[test]
    fn oversized_spawn_counts_are_rejected() {
        let trainers =
            BiomeConfig { trainer_count: CountRange::new(0, u32::MAX), ..BiomeConfig::default() };
        let err = trainers.validate().expect_err("unbounded trainer range must fail");
        assert!(err.to_string().contains("trainer_count"), "unexpected message: {err}");

        let items = BiomeConfig {
            item_count: CountRange::new(3_000_000_000, 3_000_000_000),
            ..BiomeConfig::default()
        };
        assert!(matches!(items.validate(), Err(GenerationFailure::InvalidBiome(_))));

        let at_cap = BiomeConfig {
            item_count: CountRange::new(0, MAX_SPAWN_COUNT),
            ..BiomeConfig::default()
        };
        assert_eq!(at_cap.validate(), Ok(()));
    }

    #[test]
    fn biome_round_trips_through_json() {
        let biome = BiomeConfig::default();
        let json = serde_json::to_string(&biome).expect("biome should serialize");
        let decoded: BiomeConfig = serde_json::from_str(&json).expect("biome should deserialize");
        assert_eq!(decoded, biome);
    }
}
