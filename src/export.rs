//! File exports for generated ground: a PNG preview and a JSON tile list that
//! a host engine can instantiate from.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use image::{ImageBuffer, Rgb, RgbImage};
use serde::Serialize;
use thiserror::Error;

use crate::ascii::{tile_color, CORRIDOR_CHAR, LAND_CHAR, VOID_CHAR};
use crate::config::GeneratorConfig;
use crate::connector::Corridor;
use crate::generator::{GenerationStats, Ground, TilePlacement};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("failed to serialise ground: {0}")]
    Json(#[from] serde_json::Error),
}

/// Export the occupancy as a PNG, `pixels_per_tile` pixels square per tile.
/// Corridor paths are highlighted when `show_corridors` is set.
pub fn export_png(
    ground: &Ground,
    path: impl AsRef<Path>,
    pixels_per_tile: u32,
    show_corridors: bool,
) -> Result<(), ExportError> {
    let img = render_image(ground, pixels_per_tile, show_corridors);
    img.save(path.as_ref())?;
    tracing::debug!(
        target: "ground_generator::export",
        path = %path.as_ref().display(),
        width = img.width(),
        height = img.height(),
        "export.png.written"
    );
    Ok(())
}

pub fn render_image(ground: &Ground, pixels_per_tile: u32, show_corridors: bool) -> RgbImage {
    let scale = pixels_per_tile.max(1);
    let mut img: RgbImage =
        ImageBuffer::new(ground.width as u32 * scale, ground.height as u32 * scale);

    let corridor_tiles: Vec<bool> = {
        let mut mask = vec![false; ground.width as usize * ground.height as usize];
        if show_corridors {
            for cell in ground.corridors.iter().flat_map(Corridor::cells) {
                mask[cell.y as usize * ground.width as usize + cell.x as usize] = true;
            }
        }
        mask
    };

    for (x, y, &land) in ground.occupancy.iter() {
        let ch = if corridor_tiles[y * ground.width as usize + x] {
            CORRIDOR_CHAR
        } else if land {
            LAND_CHAR
        } else {
            VOID_CHAR
        };
        let (r, g, b) = tile_color(ch);
        for py in 0..scale {
            for px in 0..scale {
                img.put_pixel(x as u32 * scale + px, y as u32 * scale + py, Rgb([r, g, b]));
            }
        }
    }

    img
}

/// Everything a host needs to rebuild the ground.
#[derive(Serialize)]
pub struct GroundDocument<'a> {
    pub config: &'a GeneratorConfig,
    pub stats: GenerationStats,
    pub corridors: &'a [Corridor],
    pub tiles: Vec<TilePlacement>,
}

impl<'a> GroundDocument<'a> {
    pub fn new(config: &'a GeneratorConfig, ground: &'a Ground) -> Self {
        Self {
            config,
            stats: ground.stats,
            corridors: &ground.corridors,
            tiles: ground.placements().collect(),
        }
    }
}

pub fn write_json(document: &GroundDocument<'_>, writer: impl Write) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, document)?;
    Ok(())
}

pub fn export_json(
    config: &GeneratorConfig,
    ground: &Ground,
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    let document = GroundDocument::new(config, ground);
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    write_json(&document, &mut writer)?;
    writer.flush()?;
    tracing::debug!(
        target: "ground_generator::export",
        path = %path.as_ref().display(),
        tiles = document.tiles.len(),
        "export.json.written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::generator::GroundGenerator;

    fn small_config() -> GeneratorConfig {
        GeneratorConfig {
            dungeon_width: 6,
            dungeon_height: 4,
            tile_size: 16,
            tile_scene_path: "res://tiles/ground.tscn".to_string(),
            ..GeneratorConfig::default()
        }
    }

    fn corner_islands(c: Cell) -> f64 {
        if (c.x == 0 && c.y == 0) || (c.x == 5 && c.y == 3) { 1.0 } else { -1.0 }
    }

    #[test]
    fn test_render_image_scales_tiles() {
        let ground = GroundGenerator::new(small_config()).generate_with(&corner_islands);
        let img = render_image(&ground, 3, false);
        assert_eq!(img.dimensions(), (18, 12));

        let (r, g, b) = tile_color(LAND_CHAR);
        assert_eq!(img.get_pixel(0, 0), &Rgb([r, g, b]));
        assert_eq!(img.get_pixel(2, 2), &Rgb([r, g, b]));
        let (r, g, b) = tile_color(VOID_CHAR);
        assert_eq!(img.get_pixel(3, 3 * 3), &Rgb([r, g, b]));
    }

    #[test]
    fn test_json_document_lists_every_tile() {
        let config = small_config();
        let ground = GroundGenerator::new(config.clone()).generate_with(&corner_islands);

        let mut buffer = Vec::new();
        write_json(&GroundDocument::new(&config, &ground), &mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

        let tiles = value["tiles"].as_array().unwrap();
        assert_eq!(tiles.len(), ground.stats.land_tiles());
        assert_eq!(tiles[0]["name"], "Ground Tile (0, 0)");
        assert_eq!(tiles[0]["position"][0], -48.0);
        assert_eq!(value["config"]["tile_scene_path"], "res://tiles/ground.tscn");
        assert_eq!(value["corridors"].as_array().unwrap().len(), 1);
    }
}
