use clap::Parser;
use tracing_subscriber::EnvFilter;

use ground_generator::ascii::{self, AsciiMode};
use ground_generator::export;
use ground_generator::{DistanceMetric, GeneratorConfig, GroundGenerator};

#[derive(Parser, Debug)]
#[command(name = "ground_generator")]
#[command(about = "Generate a single connected landmass from noise")]
struct Args {
    /// JSON config file; command-line values override it
    #[arg(short, long)]
    config: Option<String>,

    /// Width of the grid in tiles (max 255)
    #[arg(short = 'W', long)]
    width: Option<u8>,

    /// Height of the grid in tiles (max 255)
    #[arg(short = 'H', long)]
    height: Option<u8>,

    /// World units per tile
    #[arg(short, long)]
    tile_size: Option<u8>,

    /// Noise seed (uses random seed if neither this nor a config file sets one)
    #[arg(short, long, allow_negative_numbers = true)]
    seed: Option<i32>,

    /// Noise scale
    #[arg(long)]
    scale: Option<f32>,

    /// Distance metric used to pair islands (manhattan or euclidean)
    #[arg(long)]
    metric: Option<DistanceMetric>,

    /// Tile resource path passed through to the JSON export
    #[arg(long)]
    tile_scene: Option<String>,

    /// Skip printing the ASCII map
    #[arg(long)]
    quiet: bool,

    /// Mark corridor paths in the ASCII map
    #[arg(long)]
    show_corridors: bool,

    /// Use 24-bit colour for the ASCII map
    #[arg(long)]
    color: bool,

    /// Export the ground to a PNG file
    #[arg(long)]
    export_png: Option<String>,

    /// Pixels per tile in the PNG export
    #[arg(long, default_value = "8")]
    png_scale: u32,

    /// Export tile placements to a JSON file
    #[arg(long)]
    export_json: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = match args.config {
        Some(ref path) => match GeneratorConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
        None => GeneratorConfig {
            noise_seed: rand::random(),
            ..GeneratorConfig::default()
        },
    };

    if let Some(width) = args.width {
        config.dungeon_width = width;
    }
    if let Some(height) = args.height {
        config.dungeon_height = height;
    }
    if let Some(tile_size) = args.tile_size {
        config.tile_size = tile_size;
    }
    if let Some(seed) = args.seed {
        config.noise_seed = seed;
    }
    if let Some(scale) = args.scale {
        config.noise_scale = scale;
    }
    if let Some(metric) = args.metric {
        config.distance_metric = metric;
    }
    if let Some(ref tile_scene) = args.tile_scene {
        config.tile_scene_path = tile_scene.clone();
    }
    if let Err(e) = config.validate() {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    println!("Generating ground with seed: {}", config.noise_seed);
    println!(
        "Grid size: {}x{} (scale {}, {} distance)",
        config.dungeon_width, config.dungeon_height, config.noise_scale, config.distance_metric
    );

    let generator = GroundGenerator::new(config);
    let ground = generator.generate();
    let stats = ground.stats;

    println!("Found {} islands ({} boundary tiles)", stats.islands, stats.boundary_tiles);
    println!("Carved {} corridors adding {} tiles", ground.corridors.len(), stats.corridor_tiles);
    let total = generator.config().tile_count().max(1);
    let land_pct = 100.0 * stats.land_tiles() as f64 / total as f64;
    println!("Land: {} tiles ({:.1}%)", stats.land_tiles(), land_pct);

    if !args.quiet {
        let mode = if args.show_corridors { AsciiMode::Corridors } else { AsciiMode::Occupancy };
        println!();
        println!("{} map:", mode.name());
        if args.color {
            print!("{}", ascii::render_colored_ascii_map(&ground, mode));
        } else {
            ascii::print_ascii_map(&ground, mode);
        }
        print!("{}", ascii::legend());
    }

    if let Some(ref path) = args.export_png {
        match export::export_png(&ground, path, args.png_scale, args.show_corridors) {
            Ok(()) => println!("Exported PNG to: {}", path),
            Err(e) => eprintln!("Failed to export PNG: {}", e),
        }
    }

    if let Some(ref path) = args.export_json {
        match export::export_json(generator.config(), &ground, path) {
            Ok(()) => println!("Exported tiles to: {}", path),
            Err(e) => eprintln!("Failed to export tiles: {}", e),
        }
    }
}
