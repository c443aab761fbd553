//! Winter freeze: water freezes outward from every water edge, a bounded
//! number of rings deep into the water body.

use std::collections::{HashSet, VecDeque};

use crate::coords::Cell;
use crate::terrain::TerrainGrid;

/// Water stops freezing this many rings out from an edge.
pub const MAX_FREEZE_DEPTH: u32 = 7;

/// Compute the set of cells that freeze over, reading the pre-season grid.
///
/// Seeding is deliberately two-phase: every water edge enters the frozen
/// set at depth 1, and each edge's adjacent water cells are seeded at
/// depth 2 before the uniform BFS runs. A cell is visited at most once, so
/// its first-reached (minimal) depth is the one that counts, and the
/// result is the same whatever order the edge set is iterated in.
pub fn freeze_set(grid: &TerrainGrid) -> HashSet<Cell> {
    let mut visited: HashSet<Cell> = grid.water_edges().clone();
    let mut queue: VecDeque<(Cell, u32)> = VecDeque::new();

    for &edge in grid.water_edges() {
        queue.push_back((edge, 1));
        for n in water_neighbors(grid, edge) {
            if visited.insert(n) {
                queue.push_back((n, 2));
            }
        }
    }

    while let Some((cell, depth)) = queue.pop_front() {
        if depth < MAX_FREEZE_DEPTH {
            for n in water_neighbors(grid, cell) {
                if visited.insert(n) {
                    queue.push_back((n, depth + 1));
                }
            }
        }
    }

    visited
}

/// Adjacent still-liquid water cells; off-grid neighbors are absent.
fn water_neighbors(grid: &TerrainGrid, cell: Cell) -> Vec<Cell> {
    cell.moore()
        .filter(|&n| grid.in_bounds(n) && grid.class_unchecked(n).is_water())
        .collect()
}
