use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use floorgen::{
    BiomeConfig, FloorData, FloorGenerator, LegendaryRoomRequest, Pos, audit_floor,
    generate_boss_floor, generate_legendary_room, generate_rest_floor, mapgen::floor_map_id,
};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FloorChoice {
    Normal,
    Rest,
    Boss,
    Legendary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Ascii,
    Json,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run seed; floors are derived from it
    #[arg(short, long, default_value = "floorgen")]
    seed: String,
    #[arg(short, long, default_value_t = 1)]
    floor: u32,
    #[arg(short, long, value_enum, default_value_t = FloorChoice::Normal)]
    kind: FloorChoice,
    /// Biome file (.toml or .json); the built-in cave biome otherwise
    #[arg(short, long)]
    biome: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Ascii)]
    format: OutputFormat,
    #[arg(long, default_value_t = 500)]
    budget_ms: u64,
    /// Species placed in the legendary room
    #[arg(long, default_value_t = 150)]
    legendary_id: u32,
}

#[derive(Serialize)]
struct Report<'a> {
    seed: &'a str,
    floor: &'a FloorData,
    violations: Vec<String>,
}

fn load_biome(path: &Path) -> Result<BiomeConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read biome file: {}", path.display()))?;
    let biome: BiomeConfig = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&text)
            .with_context(|| format!("Failed to parse TOML biome: {}", path.display()))?,
        Some("json") => serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse JSON biome: {}", path.display()))?,
        _ => bail!("Unsupported biome file extension: {}", path.display()),
    };
    biome.validate().with_context(|| format!("Invalid biome in {}", path.display()))?;
    Ok(biome)
}

fn build_floor(args: &Args, biome: &BiomeConfig) -> FloorData {
    match args.kind {
        FloorChoice::Normal => FloorGenerator::with_budget(Duration::from_millis(args.budget_ms))
            .generate(&args.seed, args.floor, biome),
        FloorChoice::Rest => generate_rest_floor(args.floor, &args.seed),
        FloorChoice::Boss => generate_boss_floor(args.floor, &args.seed),
        FloorChoice::Legendary => {
            let request = LegendaryRoomRequest {
                floor_number: args.floor,
                legendary_id: args.legendary_id,
                host_map_id: floor_map_id(args.floor),
                host_return_pos: Pos::new(1, 1),
                portal_pos: Pos::new(1, 2),
                already_encountered: false,
            };
            generate_legendary_room(&request).side_room
        }
    }
}

fn render_ascii(floor: &FloorData) -> String {
    let mut out = String::with_capacity((floor.width() + 1) * floor.height());
    for y in 0..floor.height() {
        for x in 0..floor.width() {
            let pos = Pos::new(y as i32, x as i32);
            let glyph = if pos == floor.player_start {
                '@'
            } else if floor.trainers.contains(&pos) {
                'T'
            } else if floor.npcs().iter().any(|npc| npc.pos == pos) {
                'N'
            } else if floor.starter_item == Some(pos) || floor.items.contains(&pos) {
                '*'
            } else {
                floor.tile_at(pos).glyph()
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let biome = match &args.biome {
        Some(path) => load_biome(path)?,
        None => BiomeConfig::default(),
    };
    let floor = build_floor(&args, &biome);
    let violations: Vec<String> =
        audit_floor(&floor, Some(&biome)).iter().map(ToString::to_string).collect();

    match args.format {
        OutputFormat::Ascii => {
            println!("{} (map {}, {:?})", floor.name(), floor.map_id(), floor.kind);
            print!("{}", render_ascii(&floor));
            println!(
                "Start: {:?}  Stairs: {:?}  Trainers: {}  Items: {}  Patches: {}",
                floor.player_start,
                floor.stairs,
                floor.trainers.len(),
                floor.items.len(),
                floor.grass_patches.len()
            );
            for violation in &violations {
                println!("Violation: {violation}");
            }
        }
        OutputFormat::Json => {
            let report = Report { seed: &args.seed, floor: &floor, violations };
            let json = serde_json::to_string_pretty(&report)
                .with_context(|| "Failed to serialize floor report")?;
            println!("{json}");
        }
    }

    Ok(())
}
