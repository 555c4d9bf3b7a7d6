use std::collections::BTreeSet;

use floorgen::{
    BiomeConfig, FloorGenerator, LegendaryRoomRequest, Pos, generate_boss_floor, generate_floor,
    generate_legendary_room, generate_rest_floor,
};
use proptest::prelude::*;
use xxhash_rust::xxh3::xxh3_64;

fn fingerprint(seed: &str, floor: u32) -> u64 {
    xxh3_64(&generate_floor(seed, floor, &BiomeConfig::default()).canonical_bytes())
}

#[test]
fn test_identical_inputs_produce_identical_floors() {
    let biome = BiomeConfig::default();
    let first = generate_floor("test-seed-123", 1, &biome);
    let second = generate_floor("test-seed-123", 1, &biome);

    assert_eq!(first, second);
    assert_eq!(first.canonical_bytes(), second.canonical_bytes());
}

#[test]
fn test_fresh_generators_agree_with_each_other() {
    let biome = BiomeConfig::default();
    let a = FloorGenerator::new().generate("granite", 9, &biome);
    let b = FloorGenerator::default().generate("granite", 9, &biome);
    assert_eq!(xxh3_64(&a.canonical_bytes()), xxh3_64(&b.canonical_bytes()));
}

#[test]
fn test_different_seeds_produce_different_floors() {
    assert_ne!(fingerprint("test-seed-123", 1), fingerprint("different-seed", 1));
}

#[test]
fn test_consecutive_floors_of_a_run_differ() {
    let fingerprints: BTreeSet<u64> =
        (1..=10).map(|floor| fingerprint("long-run", floor)).collect();
    assert_eq!(fingerprints.len(), 10, "every floor of a run should be distinct");
}

#[test]
fn test_fixed_floors_are_deterministic() {
    assert_eq!(generate_rest_floor(5, "calm"), generate_rest_floor(5, "calm"));
    assert_eq!(generate_boss_floor(10, "final"), generate_boss_floor(10, "final"));

    let request = LegendaryRoomRequest {
        floor_number: 6,
        legendary_id: 243,
        host_map_id: 1006,
        host_return_pos: Pos::new(10, 4),
        portal_pos: Pos::new(10, 5),
        already_encountered: false,
    };
    assert_eq!(generate_legendary_room(&request), generate_legendary_room(&request));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]
    #[test]
    fn prop_generation_is_a_pure_function_of_its_inputs(
        seed in "[a-z0-9-]{1,16}",
        floor in 1_u32..=60,
    ) {
        let biome = BiomeConfig::default();
        let first = generate_floor(&seed, floor, &biome);
        let second = generate_floor(&seed, floor, &biome);
        prop_assert_eq!(first.canonical_bytes(), second.canonical_bytes());
    }
}
