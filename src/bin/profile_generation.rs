//! Profiling tool: times each generation phase on noise and on white-noise grids,
//! which produce far more islands than smooth noise does.

use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

use ground_generator::connector::connect;
use ground_generator::island_graph::IslandGraph;
use ground_generator::islands::IslandTracker;
use ground_generator::tilemap::Tilemap;
use ground_generator::{Cell, DistanceMetric, NoiseField, SimplexField};

struct PhaseTimes {
    scan: Duration,
    graph: Duration,
    connect: Duration,
    islands: usize,
    boundary: usize,
}

fn profile(width: u8, height: u8, field: &impl NoiseField, metric: DistanceMetric) -> PhaseTimes {
    let start = Instant::now();
    let mut scan = IslandTracker::scan(width, height, field);
    let scan_time = start.elapsed();

    let islands = scan.islands.len();
    let boundary = scan.islands.iter().map(|i| i.boundary.len()).sum();

    let (graph_time, connect_time) = if islands > 1 {
        let start = Instant::now();
        let graph = IslandGraph::build(&scan.islands, metric);
        let graph_time = start.elapsed();

        let start = Instant::now();
        connect(graph, &mut scan.occupancy);
        (graph_time, start.elapsed())
    } else {
        (Duration::ZERO, Duration::ZERO)
    };

    PhaseTimes {
        scan: scan_time,
        graph: graph_time,
        connect: connect_time,
        islands,
        boundary,
    }
}

fn report(label: &str, times: &PhaseTimes) {
    let total = times.scan + times.graph + times.connect;
    let pct = |d: Duration| 100.0 * d.as_secs_f64() / total.as_secs_f64().max(f64::EPSILON);
    println!("{label}: {} islands, {} boundary tiles", times.islands, times.boundary);
    println!("  Island scan:    {:>8.2}% ({:?})", pct(times.scan), times.scan);
    println!("  Distance table: {:>8.2}% ({:?})", pct(times.graph), times.graph);
    println!("  Connect:        {:>8.2}% ({:?})", pct(times.connect), times.connect);
    println!("  TOTAL:          {:>8}  {:?}", "100%", total);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let seed = 1337u64;

    println!("=== Performance Profiling ===");
    println!();

    for (width, height) in [(80u8, 45u8), (160, 90), (255, 255)] {
        println!("Grid {}x{} ({} tiles)", width, height, width as usize * height as usize);
        let field = SimplexField::from_seed(seed as i32, 20.0);
        report("Simplex noise", &profile(width, height, &field, DistanceMetric::Manhattan));
        println!();
    }

    // Scattered specks: hundreds of single-tile islands. The distance table is
    // quadratic in the island count, so keep these grids small.
    for (width, height) in [(32u8, 32u8), (80, 45)] {
        println!("Grid {}x{} ({} tiles)", width, height, width as usize * height as usize);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut values = Tilemap::new_with(width as usize, height as usize, 0.0f64);
        for (_, _, v) in values.iter_mut() {
            *v = if rng.gen_bool(0.2) { 1.0 } else { -1.0 };
        }
        let specks = |c: Cell| *values.get(c.x as usize, c.y as usize);
        report("White noise", &profile(width, height, &specks, DistanceMetric::Manhattan));
        println!();
    }
}
