//! Connected ground generation
//!
//! Classifies a tile grid into land and void from a noise field, finds the
//! separate landmasses and joins them with L-shaped corridors until all land
//! is one 4-connected region.

pub mod ascii;
pub mod cell;
pub mod config;
pub mod connectivity;
pub mod connector;
pub mod export;
pub mod generator;
pub mod island_graph;
pub mod islands;
pub mod noise_field;
pub mod tilemap;

pub use cell::{Cell, Direction};
pub use config::{ConfigError, GeneratorConfig};
pub use generator::{
    generate_ground, world_position, GenerationStats, Ground, GroundGenerator, TilePlacement,
    TileSpawner,
};
pub use island_graph::DistanceMetric;
pub use noise_field::{NoiseField, SimplexField};
