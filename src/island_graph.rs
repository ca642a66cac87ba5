//! All-pairs island distances
//!
//! For every pair of islands, finds the closest pair of boundary tiles. Only
//! boundary sets are searched, never the full occupancy grid.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::islands::Island;

/// How the gap between two tiles is measured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// Sum of absolute coordinate differences. Matches the axis-aligned corridors.
    #[default]
    Manhattan,
    /// Straight-line distance. Changes which pair wins a tie.
    Euclidean,
}

impl DistanceMetric {
    /// Comparison key between two tiles: the Manhattan distance, or the
    /// squared Euclidean distance (same ordering, stays integral).
    pub fn measure(self, a: Cell, b: Cell) -> u32 {
        match self {
            DistanceMetric::Manhattan => a.manhattan(b) as u32,
            DistanceMetric::Euclidean => a.squared_distance(b),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DistanceMetric::Manhattan => "manhattan",
            DistanceMetric::Euclidean => "euclidean",
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistanceMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "manhattan" => Ok(DistanceMetric::Manhattan),
            "euclidean" => Ok(DistanceMetric::Euclidean),
            other => Err(format!(
                "unknown distance metric '{other}' (expected manhattan or euclidean)"
            )),
        }
    }
}

/// Symmetric distance table between islands plus the tiles that realise each distance.
#[derive(Clone, Debug)]
pub struct IslandGraph {
    pub(crate) metric: DistanceMetric,
    /// `distances[i][j]`: closest gap between islands i and j. Diagonal is unused.
    pub(crate) distances: Vec<Vec<u32>>,
    /// `closest[i][j]`: the boundary tile of island i nearest to island j.
    pub(crate) closest: Vec<Vec<Cell>>,
}

impl IslandGraph {
    pub fn build(islands: &[Island], metric: DistanceMetric) -> Self {
        let count = islands.len();
        let mut distances = vec![vec![0u32; count]; count];
        let mut closest = vec![vec![Cell::default(); count]; count];

        for i in 0..count {
            for j in (i + 1)..count {
                let (distance, near_i, near_j) =
                    closest_pair(&islands[i].boundary, &islands[j].boundary, metric);
                distances[i][j] = distance;
                distances[j][i] = distance;
                closest[i][j] = near_i;
                closest[j][i] = near_j;
            }
        }

        let graph = Self { metric, distances, closest };
        debug_assert!(graph.is_symmetric(), "island distance table is not symmetric");

        tracing::debug!(
            target: "ground_generator::island_graph",
            islands = count,
            boundary_tiles = islands.iter().map(|i| i.boundary.len()).sum::<usize>(),
            metric = metric.name(),
            "island_graph.build.complete"
        );

        graph
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    pub fn distance(&self, i: usize, j: usize) -> u32 {
        self.distances[i][j]
    }

    /// The tile of island `i` closest to island `j`.
    pub fn closest_point(&self, i: usize, j: usize) -> Cell {
        self.closest[i][j]
    }

    /// `(tile on i, tile on j)` realising `distance(i, j)`.
    pub fn closest_pair(&self, i: usize, j: usize) -> (Cell, Cell) {
        (self.closest[i][j], self.closest[j][i])
    }

    pub fn is_symmetric(&self) -> bool {
        let n = self.len();
        (0..n).all(|i| {
            self.distances[i].len() == n
                && (0..n).all(|j| {
                    i == j
                        || (self.distances[i][j] == self.distances[j][i]
                            && self.metric.measure(self.closest[i][j], self.closest[j][i])
                                == self.distances[i][j])
                })
        })
    }
}

/// Closest pair of tiles between two boundary sets. The first pair found in
/// set order wins a tie.
fn closest_pair(
    a: &BTreeSet<Cell>,
    b: &BTreeSet<Cell>,
    metric: DistanceMetric,
) -> (u32, Cell, Cell) {
    let mut best = (u32::MAX, Cell::default(), Cell::default());
    for &from in a {
        for &to in b {
            let distance = metric.measure(from, to);
            if distance < best.0 {
                best = (distance, from, to);
            }
        }
    }
    best
}
