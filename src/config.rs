//! Generator configuration.
//!
//! Plain values with defaults; optionally loaded from a JSON file where any
//! missing field falls back to its default.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::island_graph::DistanceMetric;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Grid width in tiles.
    pub dungeon_width: u8,
    /// Grid height in tiles.
    pub dungeon_height: u8,
    /// World units per tile, used only when placing tiles.
    pub tile_size: u8,
    pub noise_seed: i32,
    pub noise_scale: f32,
    /// Resource the host instantiates per ground tile. Opaque to the generator.
    pub tile_scene_path: String,
    pub distance_metric: DistanceMetric,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            dungeon_width: 80,
            dungeon_height: 45,
            tile_size: 8,
            noise_seed: 2,
            noise_scale: 20.0,
            tile_scene_path: String::new(),
            distance_metric: DistanceMetric::Manhattan,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse generator config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read generator config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("noise scale must be finite, got {0}")]
    InvalidNoiseScale(f32),
}

impl GeneratorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GeneratorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&contents)?;
        tracing::debug!(
            target: "ground_generator::config",
            path = %path.display(),
            width = config.dungeon_width,
            height = config.dungeon_height,
            "config.loaded"
        );
        Ok(config)
    }

    /// Zero-sized grids are accepted (they generate nothing); only a
    /// non-finite noise scale is rejected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.noise_scale.is_finite() {
            return Err(ConfigError::InvalidNoiseScale(self.noise_scale));
        }
        Ok(())
    }

    pub fn tile_count(&self) -> usize {
        self.dungeon_width as usize * self.dungeon_height as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.dungeon_width, 80);
        assert_eq!(config.dungeon_height, 45);
        assert_eq!(config.tile_size, 8);
        assert_eq!(config.noise_seed, 2);
        assert_eq!(config.noise_scale, 20.0);
        assert_eq!(config.tile_scene_path, "");
        assert_eq!(config.distance_metric, DistanceMetric::Manhattan);
        assert_eq!(config.tile_count(), 3600);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GeneratorConfig::from_json_str(
            r#"{ "dungeon_width": 30, "noise_seed": -7, "distance_metric": "euclidean" }"#,
        )
        .unwrap();
        assert_eq!(config.dungeon_width, 30);
        assert_eq!(config.dungeon_height, 45);
        assert_eq!(config.noise_seed, -7);
        assert_eq!(config.distance_metric, DistanceMetric::Euclidean);
    }

    #[test]
    fn test_rejects_out_of_range_width() {
        let err = GeneratorConfig::from_json_str(r#"{ "dungeon_width": 300 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_zero_sized_grid_is_valid() {
        let config = GeneratorConfig::from_json_str(r#"{ "dungeon_width": 0 }"#).unwrap();
        assert_eq!(config.tile_count(), 0);
    }

    #[test]
    fn test_rejects_non_finite_scale() {
        let config = GeneratorConfig {
            noise_scale: f32::INFINITY,
            ..GeneratorConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidNoiseScale(_))));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = GeneratorConfig::load("/definitely/not/here.json").unwrap_err();
        match err {
            ConfigError::Read { path, .. } => {
                assert_eq!(path, PathBuf::from("/definitely/not/here.json"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
