use anyhow::{Result, bail};
use clap::Parser;
use floorgen::{BiomeConfig, FloorKind, audit_floor, generate_floor};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of runs to generate
    #[arg(short, long, default_value_t = 200)]
    runs: u32,
    /// Floors generated per run
    #[arg(short, long, default_value_t = 10)]
    floors: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!(
        "Starting floor fuzz on seed {} for {} runs of {} floors...",
        args.seed, args.runs, args.floors
    );
    let biome = BiomeConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let mut generated = 0_u32;
    let mut fallbacks = 0_u32;
    let mut failures = 0_u32;
    for _ in 0..args.runs {
        let run_seed = format!("{:016x}", rng.next_u64());
        for floor_number in 1..=args.floors {
            let floor = generate_floor(&run_seed, floor_number, &biome);
            generated += 1;
            if floor.kind == FloorKind::Fallback {
                fallbacks += 1;
                log::info!("run {run_seed} floor {floor_number} fell back");
            }
            for violation in audit_floor(&floor, Some(&biome)) {
                failures += 1;
                println!("run {run_seed} floor {floor_number}: {violation}");
            }
        }
    }

    println!("Generated {generated} floors, {fallbacks} fallbacks, {failures} violations.");
    if failures > 0 {
        bail!("{failures} invariant violations found");
    }
    println!("Fuzzing completed successfully.");
    Ok(())
}
