//! Command-line wrapper around the layout generator.
//!
//! Parses a parameter set, runs one generation call, and prints the
//! resulting dungeon record as JSON on stdout. Persistence, rendering, and
//! enrichment all live in other services; this binary only hands the
//! document off.

use clap::Parser;
use delve::{Difficulty, DungeonComposer, GenerationParams};
use rand::{rngs::StdRng, Rng, SeedableRng};

#[derive(Parser, Debug)]
#[command(name = "delve", version, about = "Procedural dungeon layout generator")]
struct Args {
    /// Grid width in cells
    #[arg(long, default_value_t = delve::config::DEFAULT_GRID_WIDTH)]
    width: u32,

    /// Grid height in cells
    #[arg(long, default_value_t = delve::config::DEFAULT_GRID_HEIGHT)]
    height: u32,

    /// Number of levels to generate
    #[arg(long, default_value_t = 1)]
    levels: u32,

    /// Minimum room dimension in cells
    #[arg(long)]
    min_room_size: Option<u32>,

    /// Maximum room dimension in cells
    #[arg(long)]
    max_room_size: Option<u32>,

    /// Fraction of partition leaves converted to rooms (0.0 to 1.0)
    #[arg(long)]
    density: Option<f64>,

    /// Fraction of extra loop corridors (0.0 to 1.0)
    #[arg(long)]
    extra_connections: Option<f64>,

    /// Probability that a door is secret (0.0 to 1.0)
    #[arg(long)]
    secret_doors: Option<f64>,

    /// Free-text theme, e.g. "sunken temple"
    #[arg(long)]
    theme: Option<String>,

    /// Difficulty rating: easy, medium, hard, or deadly
    #[arg(long, default_value = "medium")]
    difficulty: Difficulty,

    /// Tiling mode tag carried through to the output
    #[arg(long, default_value = "square")]
    tile_type: String,

    /// Seed for reproducible layouts; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> delve::DelveResult<()> {
    env_logger::init();
    let args = Args::parse();

    let params = GenerationParams {
        grid_width: args.width,
        grid_height: args.height,
        num_levels: Some(args.levels),
        min_room_size: args.min_room_size,
        max_room_size: args.max_room_size,
        room_density: args.density,
        extra_connections_ratio: args.extra_connections,
        secret_door_ratio: args.secret_doors,
        theme: args.theme,
        difficulty: Some(args.difficulty),
        tile_type: Some(args.tile_type),
    };

    let seed = args.seed.unwrap_or_else(|| StdRng::from_entropy().gen());
    log::info!("generating with seed {seed}");

    let dungeon = DungeonComposer::new().generate_with_seed(&params, seed)?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&dungeon)?
    } else {
        serde_json::to_string(&dungeon)?
    };
    println!("{json}");

    Ok(())
}
