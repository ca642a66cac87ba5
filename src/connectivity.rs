//! Flood-fill connectivity checks on occupancy grids.

use std::collections::VecDeque;

use crate::tilemap::Tilemap;

/// Count connected land components under 4-directional adjacency.
pub fn count_land_components(occupancy: &Tilemap<bool>) -> usize {
    let width = occupancy.width;
    let height = occupancy.height;
    let mut visited = Tilemap::new_with(width, height, false);
    let mut components = 0;
    let mut queue = VecDeque::new();

    for y in 0..height {
        for x in 0..width {
            if !*occupancy.get(x, y) || *visited.get(x, y) {
                continue;
            }

            components += 1;
            visited.set(x, y, true);
            queue.push_back((x, y));

            while let Some((cx, cy)) = queue.pop_front() {
                for (nx, ny) in occupancy.neighbors(cx, cy) {
                    if *occupancy.get(nx, ny) && !*visited.get(nx, ny) {
                        visited.set(nx, ny, true);
                        queue.push_back((nx, ny));
                    }
                }
            }
        }
    }

    components
}

/// True when every land tile can reach every other through land (vacuously
/// true for grids without land).
pub fn is_connected(occupancy: &Tilemap<bool>) -> bool {
    count_land_components(occupancy) <= 1
}
