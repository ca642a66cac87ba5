//! Ground generation
//!
//! Noise -> islands -> distance table -> corridors. The result is an occupancy
//! grid in which all land is one 4-connected landmass, plus the mapping from
//! tiles to world positions that a host needs to place them.

use serde::Serialize;

use crate::cell::Cell;
use crate::config::GeneratorConfig;
use crate::connectivity::is_connected;
use crate::connector::{connect, Corridor};
use crate::island_graph::{DistanceMetric, IslandGraph};
use crate::islands::IslandTracker;
use crate::noise_field::{NoiseField, SimplexField};
use crate::tilemap::Tilemap;

/// Counters collected while generating.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GenerationStats {
    /// Land tiles straight from the noise.
    pub noise_land_tiles: usize,
    /// Islands found before connecting.
    pub islands: usize,
    /// Boundary tiles searched by the distance table.
    pub boundary_tiles: usize,
    /// Void tiles turned into land by corridors.
    pub corridor_tiles: usize,
}

impl GenerationStats {
    pub fn land_tiles(&self) -> usize {
        self.noise_land_tiles + self.corridor_tiles
    }
}

/// A finished ground layout.
#[derive(Clone, Debug)]
pub struct Ground {
    pub width: u8,
    pub height: u8,
    pub tile_size: u8,
    pub occupancy: Tilemap<bool>,
    /// Corridors in the order they were carved.
    pub corridors: Vec<Corridor>,
    pub stats: GenerationStats,
}

/// Where a single ground tile goes in the host's world.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TilePlacement {
    pub cell: Cell,
    pub position: [f32; 2],
    pub name: String,
}

/// Receives finished tiles. Instantiating and attaching them is up to the host.
pub trait TileSpawner {
    fn spawn(&mut self, tile: &TilePlacement);
}

impl TileSpawner for Vec<TilePlacement> {
    fn spawn(&mut self, tile: &TilePlacement) {
        self.push(tile.clone());
    }
}

/// World position of a tile, with the grid centred on the origin:
/// `(x, y) * tile_size - (width, height) * tile_size / 2`.
pub fn world_position(cell: Cell, width: u8, height: u8, tile_size: u8) -> [f32; 2] {
    let size = tile_size as f32;
    let top_left = [width as f32 * size / -2.0, height as f32 * size / -2.0];
    [top_left[0] + cell.x as f32 * size, top_left[1] + cell.y as f32 * size]
}

impl Ground {
    pub fn is_land(&self, cell: Cell) -> bool {
        self.occupancy.is_set(cell.x as i32, cell.y as i32)
    }

    /// Land tiles by increasing x, then y.
    pub fn land_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.width)
            .flat_map(move |x| (0..self.height).map(move |y| Cell::new(x, y)))
            .filter(move |&cell| self.is_land(cell))
    }

    pub fn placements(&self) -> impl Iterator<Item = TilePlacement> + '_ {
        self.land_cells().map(move |cell| TilePlacement {
            cell,
            position: world_position(cell, self.width, self.height, self.tile_size),
            name: format!("Ground Tile ({}, {})", cell.x, cell.y),
        })
    }

    /// Hand every land tile to `spawner`. Returns the number of tiles spawned.
    pub fn spawn_into(&self, spawner: &mut impl TileSpawner) -> usize {
        let mut spawned = 0;
        for tile in self.placements() {
            spawner.spawn(&tile);
            spawned += 1;
        }
        spawned
    }
}

/// Generate an occupancy grid from any noise field.
///
/// Zero-sized grids come back empty; with zero or one island the corridor
/// phase is skipped.
pub fn generate_ground(
    width: u8,
    height: u8,
    field: &impl NoiseField,
    metric: DistanceMetric,
) -> (Tilemap<bool>, Vec<Corridor>, GenerationStats) {
    if width == 0 || height == 0 {
        tracing::debug!(
            target: "ground_generator::generator",
            width,
            height,
            "generator.empty_grid"
        );
        return (
            Tilemap::new_with(width as usize, height as usize, false),
            Vec::new(),
            GenerationStats::default(),
        );
    }

    let scan = IslandTracker::scan(width, height, field);
    let mut occupancy = scan.occupancy;
    let mut stats = GenerationStats {
        noise_land_tiles: occupancy.count_matching(&true),
        islands: scan.islands.len(),
        boundary_tiles: scan.islands.iter().map(|island| island.boundary.len()).sum(),
        corridor_tiles: 0,
    };

    let corridors = if scan.islands.len() > 1 {
        let graph = IslandGraph::build(&scan.islands, metric);
        connect(graph, &mut occupancy)
    } else {
        Vec::new()
    };

    stats.corridor_tiles = occupancy.count_matching(&true) - stats.noise_land_tiles;
    debug_assert!(is_connected(&occupancy), "generated ground is not one landmass");

    tracing::info!(
        target: "ground_generator::generator",
        width,
        height,
        islands = stats.islands,
        boundary_tiles = stats.boundary_tiles,
        land_tiles = stats.land_tiles(),
        corridors = corridors.len(),
        corridor_tiles = stats.corridor_tiles,
        "generator.ground.complete"
    );

    (occupancy, corridors, stats)
}

/// Builds connected ground from a [`GeneratorConfig`]. Every call starts from scratch.
#[derive(Clone, Debug, Default)]
pub struct GroundGenerator {
    config: GeneratorConfig,
}

impl GroundGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate with OpenSimplex noise seeded and scaled from the config.
    pub fn generate(&self) -> Ground {
        let field = SimplexField::from_seed(self.config.noise_seed, self.config.noise_scale);
        self.generate_with(&field)
    }

    /// Generate with an injected noise field.
    pub fn generate_with(&self, field: &impl NoiseField) -> Ground {
        let config = &self.config;
        let (occupancy, corridors, stats) = generate_ground(
            config.dungeon_width,
            config.dungeon_height,
            field,
            config.distance_metric,
        );

        Ground {
            width: config.dungeon_width,
            height: config.dungeon_height,
            tile_size: config.tile_size,
            occupancy,
            corridors,
            stats,
        }
    }
}
