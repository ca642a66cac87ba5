//! Greedy island connection
//!
//! Island 0 stands for everything connected so far. Each step picks the island
//! nearest to it, carves an L-shaped corridor between the two closest tiles and
//! folds the absorbed island's distances into row 0 (Prim-style relaxation).
//! After `K - 1` steps only island 0 is left.

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::island_graph::IslandGraph;
use crate::tilemap::Tilemap;

/// An axis-aligned L between two tiles: along the row of `start` to the column
/// of `end`, then along that column to `end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corridor {
    /// Tile on the already connected side.
    pub start: Cell,
    /// Tile on the island being absorbed.
    pub end: Cell,
}

impl Corridor {
    pub fn new(start: Cell, end: Cell) -> Self {
        Self { start, end }
    }

    /// Every tile the corridor covers. The corner tile appears in both legs.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let (start, end) = (self.start, self.end);
        let row = (start.x.min(end.x)..=start.x.max(end.x)).map(move |x| Cell::new(x, start.y));
        let column = (start.y.min(end.y)..=start.y.max(end.y)).map(move |y| Cell::new(end.x, y));
        row.chain(column)
    }
}

/// Force every corridor tile to land. Returns how many tiles were void before.
pub fn carve_corridor(corridor: &Corridor, occupancy: &mut Tilemap<bool>) -> usize {
    let mut carved = 0;
    for cell in corridor.cells() {
        let tile = occupancy.get_mut(cell.x as usize, cell.y as usize);
        if !*tile {
            *tile = true;
            carved += 1;
        }
    }
    carved
}

/// Connect every island in `graph` to island 0, carving into `occupancy`.
///
/// Panics when the graph holds fewer than two islands; callers skip the
/// connection phase in that case.
pub fn connect(mut graph: IslandGraph, occupancy: &mut Tilemap<bool>) -> Vec<Corridor> {
    assert!(graph.len() >= 2, "connect needs at least two islands, got {}", graph.len());

    let steps = graph.len() - 1;
    let mut corridors = Vec::with_capacity(steps);

    for step in 0..steps {
        let chosen = nearest_to_root(&graph);
        let (start, end) = graph.closest_pair(0, chosen);
        let corridor = Corridor::new(start, end);
        let carved = carve_corridor(&corridor, occupancy);

        tracing::trace!(
            target: "ground_generator::connector",
            step,
            chosen,
            distance = graph.distance(0, chosen),
            start = %start,
            end = %end,
            carved,
            "connector.corridor"
        );

        absorb(&mut graph, chosen);
        corridors.push(corridor);
    }

    debug_assert_eq!(graph.len(), 1);
    corridors
}

/// Index (never 0) of the island closest to island 0. Ties go to the lowest index.
fn nearest_to_root(graph: &IslandGraph) -> usize {
    let mut chosen = 1;
    for index in 2..graph.len() {
        if graph.distances[0][index] < graph.distances[0][chosen] {
            chosen = index;
        }
    }
    chosen
}

/// Fold island `chosen` into island 0 and drop its row and column.
fn absorb(graph: &mut IslandGraph, chosen: usize) {
    debug_assert!(chosen != 0 && chosen < graph.len());

    for other in 1..graph.len() {
        if other == chosen {
            continue;
        }
        let via_chosen = graph.distances[chosen][other];
        if via_chosen < graph.distances[0][other] {
            graph.distances[0][other] = via_chosen;
            graph.distances[other][0] = via_chosen;
            graph.closest[0][other] = graph.closest[chosen][other];
            graph.closest[other][0] = graph.closest[other][chosen];
        }
    }

    graph.distances.remove(chosen);
    graph.closest.remove(chosen);
    for row in graph.distances.iter_mut() {
        row.remove(chosen);
    }
    for row in graph.closest.iter_mut() {
        row.remove(chosen);
    }

    debug_assert!(graph.is_symmetric(), "island distance table lost symmetry after a merge");
}
