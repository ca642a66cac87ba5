//! ASCII rendering for generated ground
//!
//! One character per tile, one line per row.

use std::collections::HashSet;

use crate::cell::Cell;
use crate::generator::Ground;

pub const LAND_CHAR: char = '#';
pub const VOID_CHAR: char = '.';
pub const CORRIDOR_CHAR: char = '+';

/// ASCII rendering modes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AsciiMode {
    /// Land and void only
    Occupancy,
    /// Corridor paths drawn over the occupancy
    Corridors,
}

impl AsciiMode {
    pub fn name(&self) -> &'static str {
        match self {
            AsciiMode::Occupancy => "Occupancy",
            AsciiMode::Corridors => "Corridors",
        }
    }
}

fn corridor_cells(ground: &Ground) -> HashSet<Cell> {
    ground.corridors.iter().flat_map(|c| c.cells()).collect()
}

fn tile_char(ground: &Ground, cell: Cell, corridors: &HashSet<Cell>) -> char {
    if corridors.contains(&cell) {
        CORRIDOR_CHAR
    } else if ground.is_land(cell) {
        LAND_CHAR
    } else {
        VOID_CHAR
    }
}

/// Render the ground to a string.
pub fn render_ascii_map(ground: &Ground, mode: AsciiMode) -> String {
    let width = ground.width as usize;
    let height = ground.height as usize;
    let mut result = String::with_capacity((width + 1) * height);

    let corridors = match mode {
        AsciiMode::Occupancy => HashSet::new(),
        AsciiMode::Corridors => corridor_cells(ground),
    };

    for y in 0..ground.height {
        for x in 0..ground.width {
            result.push(tile_char(ground, Cell::new(x, y), &corridors));
        }
        result.push('\n');
    }

    result
}

/// Print ASCII map to stdout
pub fn print_ascii_map(ground: &Ground, mode: AsciiMode) {
    print!("{}", render_ascii_map(ground, mode));
}

pub fn legend() -> String {
    format!(
        "{LAND_CHAR} land   {VOID_CHAR} void   {CORRIDOR_CHAR} corridor\n"
    )
}

// ============================================================================
// COLORIZED ASCII RENDERING
// ============================================================================

pub fn tile_color(ch: char) -> (u8, u8, u8) {
    match ch {
        LAND_CHAR => (120, 170, 90),
        CORRIDOR_CHAR => (210, 170, 90),
        _ => (30, 30, 40),
    }
}

pub fn ansi_colored_char(ch: char, fg: (u8, u8, u8), bg: (u8, u8, u8)) -> String {
    format!(
        "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m{}\x1b[0m",
        fg.0, fg.1, fg.2, bg.0, bg.1, bg.2, ch
    )
}

/// Render with 24-bit ANSI colours (background carries the tile colour).
pub fn render_colored_ascii_map(ground: &Ground, mode: AsciiMode) -> String {
    let plain = render_ascii_map(ground, mode);
    let mut result = String::with_capacity(plain.len() * 20);

    for ch in plain.chars() {
        if ch == '\n' {
            result.push('\n');
            continue;
        }
        let bg = tile_color(ch);
        let fg = (bg.0 / 2, bg.1 / 2, bg.2 / 2);
        result.push_str(&ansi_colored_char(ch, fg, bg));
    }

    result
}
