//! Noise sources that decide which tiles are land.
//!
//! Only the sign of a sample matters: a tile is land when its sample is
//! zero or positive and void otherwise.

use noise::{NoiseFn, OpenSimplex};

use crate::cell::Cell;

/// Base frequency applied on top of the configured scale, so that the default
/// scale of 20 samples the noise 0.2 units apart and yields blobby landmasses.
pub const BASE_FREQUENCY: f64 = 0.01;

/// A deterministic scalar field over the grid.
pub trait NoiseField {
    fn sample(&self, cell: Cell) -> f64;
}

impl<F> NoiseField for F
where
    F: Fn(Cell) -> f64,
{
    fn sample(&self, cell: Cell) -> f64 {
        self(cell)
    }
}

/// Land iff the sample is `>= 0`. Exact zero counts as land, NaN as void.
pub fn is_land(value: f64) -> bool {
    value >= 0.0
}

/// Adapts any 2D `noise` generator into a [`NoiseField`] sampled at
/// `(x, y) * scale * BASE_FREQUENCY`.
#[derive(Clone, Debug)]
pub struct ScaledNoise<N> {
    noise: N,
    scale: f64,
}

impl<N: NoiseFn<f64, 2>> ScaledNoise<N> {
    pub fn new(noise: N, scale: f64) -> Self {
        Self { noise, scale }
    }
}

impl<N: NoiseFn<f64, 2>> NoiseField for ScaledNoise<N> {
    fn sample(&self, cell: Cell) -> f64 {
        let step = self.scale * BASE_FREQUENCY;
        self.noise.get([cell.x as f64 * step, cell.y as f64 * step])
    }
}

/// The default ground noise: smooth OpenSimplex.
pub type SimplexField = ScaledNoise<OpenSimplex>;

impl SimplexField {
    /// Seeds are signed to match the configuration; negative seeds keep their bit pattern.
    pub fn from_seed(seed: i32, scale: f32) -> Self {
        ScaledNoise::new(OpenSimplex::new(seed as u32), scale as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_land_threshold_is_inclusive() {
        assert!(is_land(0.0));
        assert!(is_land(-0.0));
        assert!(is_land(0.25));
        assert!(!is_land(-1e-9));
        assert!(!is_land(f64::NAN));
    }

    #[test]
    fn test_closure_field() {
        let field = |cell: Cell| cell.x as f64 - 2.0;
        assert!(!is_land(field.sample(Cell::new(1, 0))));
        assert!(is_land(field.sample(Cell::new(2, 7))));
    }

    #[test]
    fn test_simplex_field_is_deterministic() {
        let a = SimplexField::from_seed(2, 20.0);
        let b = SimplexField::from_seed(2, 20.0);
        for x in 0..16 {
            for y in 0..16 {
                let cell = Cell::new(x, y);
                assert_eq!(a.sample(cell).to_bits(), b.sample(cell).to_bits());
            }
        }
    }

    #[test]
    fn test_simplex_field_has_land_and_void() {
        let field = SimplexField::from_seed(2, 20.0);
        let samples: Vec<f64> = (0..80u8)
            .flat_map(|x| (0..45u8).map(move |y| Cell::new(x, y)))
            .map(|cell| field.sample(cell))
            .collect();
        assert!(samples.iter().any(|&v| is_land(v)));
        assert!(samples.iter().any(|&v| !is_land(v)));
    }
}
