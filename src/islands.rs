//! Island discovery
//!
//! Scans the grid once, column by column, deciding land/void per tile and
//! labelling connected landmasses as it goes. Landmasses that turn out to touch
//! are merged through a disjoint-set forest, so a label written early may be
//! stale and must be resolved through [`IslandTracker::find`].
//!
//! Alongside the labels each island keeps its boundary: the land tiles not yet
//! proven interior. Interior tiles are never the closest point between two
//! islands, so dropping them keeps the all-pairs search small.

use std::collections::BTreeSet;

use crate::cell::{Cell, Direction};
use crate::noise_field::{is_land, NoiseField};
use crate::tilemap::Tilemap;

/// Island label handed out during the scan (labels are never reused).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IslandId(pub u16);

impl IslandId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// A surviving landmass after the scan.
#[derive(Clone, Debug)]
pub struct Island {
    pub id: IslandId,
    pub tile_count: usize,
    pub boundary: BTreeSet<Cell>,
}

/// Result of a full grid scan.
#[derive(Clone, Debug)]
pub struct IslandScan {
    pub occupancy: Tilemap<bool>,
    /// Surviving islands in ascending id order.
    pub islands: Vec<Island>,
    /// Final island of every land tile.
    pub labels: Tilemap<Option<IslandId>>,
}

/// Incremental connected-component tracker for a column-major scan.
pub struct IslandTracker {
    occupancy: Tilemap<bool>,
    labels: Tilemap<Option<IslandId>>,
    parent: Vec<u16>,
    tile_counts: Vec<usize>,
    boundaries: Vec<BTreeSet<Cell>>,
    live: usize,
}

impl IslandTracker {
    pub fn new(width: u8, height: u8) -> Self {
        let (w, h) = (width as usize, height as usize);
        Self {
            occupancy: Tilemap::new_with(w, h, false),
            labels: Tilemap::new_with(w, h, None),
            parent: Vec::new(),
            tile_counts: Vec::new(),
            boundaries: Vec::new(),
            live: 0,
        }
    }

    /// Scan every tile by increasing x, then increasing y, and return the
    /// occupancy together with the surviving islands.
    pub fn scan(width: u8, height: u8, field: &impl NoiseField) -> IslandScan {
        let mut tracker = Self::new(width, height);
        for x in 0..width {
            for y in 0..height {
                let cell = Cell::new(x, y);
                if is_land(field.sample(cell)) {
                    tracker.add_land(cell);
                }
            }
        }
        tracker.finish()
    }

    /// Number of islands currently alive.
    pub fn island_count(&self) -> usize {
        self.live
    }

    fn is_land_cell(&self, cell: Cell) -> bool {
        self.occupancy.is_set(cell.x as i32, cell.y as i32)
    }

    /// Mark `cell` as land. Cells must arrive in scan order so that the left
    /// and upper neighbours are already settled.
    pub fn add_land(&mut self, cell: Cell) {
        let (x, y) = cell.as_usize();
        self.occupancy.set(x, y, true);

        let left = cell.step(Direction::Left).filter(|&c| self.is_land_cell(c));
        let up = cell.step(Direction::Up).filter(|&c| self.is_land_cell(c));

        let id = match (left, up) {
            (None, None) => self.new_island(cell),
            (Some(left), up) => {
                let left_root = self.root_of(left);
                self.attach(cell, left_root);
                // The left tile now has all four neighbours settled.
                self.prune_if_interior(left, left_root);

                match up {
                    Some(up) => {
                        let up_root = self.root_of(up);
                        if up_root == left_root {
                            left_root
                        } else {
                            self.union(left_root, up_root)
                        }
                    }
                    None => left_root,
                }
            }
            (None, Some(up)) => {
                let up_root = self.root_of(up);
                self.attach(cell, up_root);
                up_root
            }
        };

        self.labels.set(x, y, Some(id));
    }

    /// Resolve a possibly stale label to its current island, compressing the path.
    pub fn find(&mut self, id: IslandId) -> IslandId {
        let mut root = id.0;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }

        let mut node = id.0;
        while self.parent[node as usize] != root {
            let next = self.parent[node as usize];
            self.parent[node as usize] = root;
            node = next;
        }

        IslandId(root)
    }

    fn root_of(&mut self, cell: Cell) -> IslandId {
        let (x, y) = cell.as_usize();
        let label = (*self.labels.get(x, y)).expect("land tile scanned without an island label");
        self.find(label)
    }

    fn new_island(&mut self, cell: Cell) -> IslandId {
        assert!(self.parent.len() < u16::MAX as usize, "island labels exhausted");
        let id = IslandId(self.parent.len() as u16);
        self.parent.push(id.0);
        self.tile_counts.push(1);
        self.boundaries.push(BTreeSet::from([cell]));
        self.live += 1;
        id
    }

    fn attach(&mut self, cell: Cell, root: IslandId) {
        self.tile_counts[root.index()] += 1;
        self.boundaries[root.index()].insert(cell);
    }

    fn prune_if_interior(&mut self, cell: Cell, root: IslandId) {
        let interior = Direction::ALL.iter().all(|&dir| {
            let (nx, ny) = cell.offset_signed(dir);
            self.occupancy.is_set(nx, ny)
        });
        if interior {
            self.boundaries[root.index()].remove(&cell);
        }
    }

    /// Merge two distinct roots. The island with the smaller boundary is
    /// absorbed into the larger one; on a tie `b` is absorbed into `a`.
    fn union(&mut self, a: IslandId, b: IslandId) -> IslandId {
        debug_assert_ne!(a, b);
        let a_len = self.boundaries[a.index()].len();
        let b_len = self.boundaries[b.index()].len();
        let (absorbed, keeper) = if a_len < b_len {
            (a, b)
        } else {
            (b, a)
        };

        self.parent[absorbed.index()] = keeper.0;
        let moved = std::mem::take(&mut self.boundaries[absorbed.index()]);
        self.boundaries[keeper.index()].extend(moved);
        let count = std::mem::take(&mut self.tile_counts[absorbed.index()]);
        self.tile_counts[keeper.index()] += count;
        self.live -= 1;

        keeper
    }

    /// Resolve all labels and hand out the surviving islands.
    pub fn finish(mut self) -> IslandScan {
        let width = self.labels.width;
        let height = self.labels.height;
        let mut labels = Tilemap::new_with(width, height, None);
        for y in 0..height {
            for x in 0..width {
                if let Some(id) = *self.labels.get(x, y) {
                    let root = self.find(id);
                    labels.set(x, y, Some(root));
                }
            }
        }

        let mut islands = Vec::with_capacity(self.live);
        for index in 0..self.parent.len() {
            if self.parent[index] as usize != index {
                continue;
            }
            let boundary = std::mem::take(&mut self.boundaries[index]);
            debug_assert!(!boundary.is_empty(), "island {index} has no boundary");
            debug_assert!(
                boundary.iter().all(|c| *self.occupancy.get(c.x as usize, c.y as usize)),
                "island {index} has a boundary tile that is not land"
            );
            islands.push(Island {
                id: IslandId(index as u16),
                tile_count: self.tile_counts[index],
                boundary,
            });
        }
        debug_assert_eq!(islands.len(), self.live);

        tracing::debug!(
            target: "ground_generator::islands",
            islands = islands.len(),
            labels_issued = self.parent.len(),
            "islands.scan.complete"
        );

        IslandScan {
            occupancy: self.occupancy,
            islands,
            labels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectivity::count_land_components;

    /// Field that is land exactly where `rows` has a `#` (rows are indexed by y).
    fn field_from(rows: &'static [&'static str]) -> impl Fn(Cell) -> f64 {
        move |cell: Cell| {
            let row = rows[cell.y as usize].as_bytes();
            if row[cell.x as usize] == b'#' { 1.0 } else { -1.0 }
        }
    }

    fn scan_rows(rows: &'static [&'static str]) -> IslandScan {
        let width = rows[0].len() as u8;
        let height = rows.len() as u8;
        IslandTracker::scan(width, height, &field_from(rows))
    }

    #[test]
    fn test_all_void() {
        let scan = IslandTracker::scan(12, 7, &|_: Cell| -0.5);
        assert!(scan.islands.is_empty());
        assert_eq!(scan.occupancy.count_matching(&true), 0);
    }

    #[test]
    fn test_all_land_boundary_is_outer_ring() {
        let (w, h) = (9u8, 6u8);
        let scan = IslandTracker::scan(w, h, &|_: Cell| 0.0);
        assert_eq!(scan.islands.len(), 1);

        let island = &scan.islands[0];
        assert_eq!(island.tile_count, w as usize * h as usize);

        let ring: BTreeSet<Cell> = (0..w)
            .flat_map(|x| (0..h).map(move |y| Cell::new(x, y)))
            .filter(|c| c.x == 0 || c.y == 0 || c.x == w - 1 || c.y == h - 1)
            .collect();
        assert_eq!(island.boundary, ring);
    }

    #[test]
    fn test_separate_islands_in_scan_order() {
        let scan = scan_rows(&[
            "##...",
            "##..#",
            "....#",
        ]);
        assert_eq!(scan.islands.len(), 2);
        assert!(scan.islands[0].boundary.contains(&Cell::new(0, 0)));
        assert_eq!(scan.islands[0].tile_count, 4);
        assert_eq!(scan.islands[1].tile_count, 2);
        assert!(scan.islands[1].boundary.contains(&Cell::new(4, 2)));
    }

    #[test]
    fn test_u_shape_merges() {
        // Both arms are discovered as separate islands and joined by the bottom row.
        let scan = scan_rows(&[
            "#...#",
            "#...#",
            "#####",
        ]);
        assert_eq!(scan.islands.len(), 1);
        assert_eq!(scan.islands[0].tile_count, 9);
        assert_eq!(scan.islands[0].boundary.len(), 9);

        let root = scan.islands[0].id;
        for (_, _, label) in scan.labels.iter().filter(|(_, _, l)| l.is_some()) {
            assert_eq!(*label, Some(root));
        }
    }

    #[test]
    fn test_interior_tiles_are_pruned() {
        let scan = scan_rows(&[
            ".....",
            ".###.",
            ".###.",
            ".###.",
            ".....",
        ]);
        assert_eq!(scan.islands.len(), 1);
        let boundary = &scan.islands[0].boundary;
        assert!(!boundary.contains(&Cell::new(2, 2)));
        assert_eq!(boundary.len(), 8);
    }

    #[test]
    fn test_pruning_waits_for_later_neighbours() {
        // (1, 1) has land on three sides and void below, so it stays a boundary tile.
        let scan = scan_rows(&[
            "###",
            "###",
            "#.#",
        ]);
        assert_eq!(scan.islands.len(), 1);
        assert!(scan.islands[0].boundary.contains(&Cell::new(1, 1)));
    }

    #[test]
    fn test_find_resolves_transitive_merges() {
        // Added out of scan order on purpose: only the left/up rule matters here.
        let mut tracker = IslandTracker::new(5, 3);
        // Three separate columns first...
        for cell in [Cell::new(0, 0), Cell::new(2, 0), Cell::new(4, 0)] {
            tracker.add_land(cell);
        }
        assert_eq!(tracker.island_count(), 3);
        // ...then a bottom row that chains them together.
        for x in 0..5 {
            tracker.add_land(Cell::new(x, 1));
        }
        assert_eq!(tracker.island_count(), 1);

        let a = tracker.find(IslandId(0));
        let b = tracker.find(IslandId(1));
        let c = tracker.find(IslandId(2));
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_labels_match_flood_fill() {
        use rand::{Rng, SeedableRng};
        use rand_chacha::ChaCha8Rng;

        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..20 {
            let (w, h) = (rng.gen_range(1..40u8), rng.gen_range(1..40u8));
            let mut values = Tilemap::new_with(w as usize, h as usize, 0.0f64);
            for (_, _, v) in values.iter_mut() {
                *v = rng.gen_range(-1.0..1.0);
            }
            let field = |c: Cell| *values.get(c.x as usize, c.y as usize);
            let scan = IslandTracker::scan(w, h, &field);

            assert_eq!(scan.islands.len(), count_land_components(&scan.occupancy));

            // Neighbouring land tiles always share a final label.
            for (x, y, label) in scan.labels.iter() {
                if let Some(label) = label {
                    for (nx, ny) in scan.labels.neighbors(x, y) {
                        if let Some(other) = scan.labels.get(nx, ny) {
                            assert_eq!(label, other);
                        }
                    }
                }
            }

            let total: usize = scan.islands.iter().map(|i| i.tile_count).sum();
            assert_eq!(total, scan.occupancy.count_matching(&true));
        }
    }

    #[test]
    fn test_boundaries_are_exactly_the_edge_tiles() {
        use rand::{Rng, SeedableRng};
        use rand_chacha::ChaCha8Rng;

        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..60 {
            let (w, h) = (rng.gen_range(1..48u8), rng.gen_range(1..48u8));
            let land_bias: f64 = rng.gen_range(-0.5..0.5);
            let mut values = Tilemap::new_with(w as usize, h as usize, 0.0f64);
            for (_, _, v) in values.iter_mut() {
                *v = rng.gen_range(-1.0..1.0) + land_bias;
            }
            let field = |c: Cell| *values.get(c.x as usize, c.y as usize);
            let scan = IslandTracker::scan(w, h, &field);

            // Land with at least one void or out-of-grid neighbour.
            let mut expected = BTreeSet::new();
            for x in 0..w {
                for y in 0..h {
                    let cell = Cell::new(x, y);
                    let (cx, cy) = (x as i32, y as i32);
                    if !scan.occupancy.is_set(cx, cy) {
                        continue;
                    }
                    let on_edge = Direction::ALL.iter().any(|&dir| {
                        let (nx, ny) = cell.offset_signed(dir);
                        !scan.occupancy.is_set(nx, ny)
                    });
                    if on_edge {
                        expected.insert(cell);
                    }
                }
            }

            let mut seen = BTreeSet::new();
            for island in &scan.islands {
                for &cell in &island.boundary {
                    assert!(seen.insert(cell), "{cell} is in two boundary sets");
                    assert_eq!(*scan.labels.get(cell.x as usize, cell.y as usize), Some(island.id));
                }
            }
            assert_eq!(seen, expected, "{w}x{h} boundary mismatch");
        }
    }
}
