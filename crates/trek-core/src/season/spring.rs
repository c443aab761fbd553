//! Spring flood: low-lying land near water turns to mud. The flood level
//! is the elevation of the originating water edge and is carried with the
//! expansion, never re-read from the cells it passes through.

use std::collections::{HashSet, VecDeque};

use crate::coords::Cell;
use crate::terrain::class::TerrainClass;
use crate::terrain::TerrainGrid;

/// The flood reaches at most this many rings from the water's edge.
pub const MAX_MUD_DEPTH: u32 = 15;

/// Compute the set of land cells submerged in spring, reading the
/// pre-season grid. Water itself never becomes mud, and neither do
/// out-of-bounds cells. A cell floods when its elevation is at most one
/// unit above the carried flood level; a cell already claimed by one
/// edge's flood is never re-examined by another's.
pub fn mud_set(grid: &TerrainGrid) -> HashSet<Cell> {
    let mut visited: HashSet<Cell> = HashSet::new();
    let mut queue: VecDeque<(Cell, u32, f64)> = VecDeque::new();

    for &edge in grid.water_edges() {
        let level = grid.elevation_unchecked(edge);
        for n in floodable_neighbors(grid, edge, level) {
            if visited.insert(n) {
                queue.push_back((n, 2, level));
            }
        }
    }

    while let Some((cell, depth, level)) = queue.pop_front() {
        if depth <= MAX_MUD_DEPTH {
            for n in floodable_neighbors(grid, cell, level) {
                if visited.insert(n) {
                    queue.push_back((n, depth + 1, level));
                }
            }
        }
    }

    visited
}

/// Adjacent cells the flood can claim: in bounds, not water, not
/// out-of-bounds terrain, and no more than one unit above the flood level.
fn floodable_neighbors(grid: &TerrainGrid, cell: Cell, level: f64) -> Vec<Cell> {
    cell.moore()
        .filter(|&n| {
            if !grid.in_bounds(n) {
                return false;
            }
            let class = grid.class_unchecked(n);
            class != TerrainClass::LakeSwampMarsh
                && class != TerrainClass::OutOfBounds
                && grid.elevation_unchecked(n) <= level + 1.0
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::class::TerrainClass::*;
    use crate::terrain::elevation::ElevationGrid;

    #[test]
    fn flood_level_is_carried_not_recomputed() {
        // water(el 0) | land(el 0.5) | land(el 1.5)
        // The second land cell is within one unit of its *neighbor* but not
        // of the flood level, so it stays dry.
        let grid = TerrainGrid::from_classes(
            3,
            1,
            vec![LakeSwampMarsh, OpenLand, OpenLand],
            ElevationGrid::from_rows(3, 1, vec![0.0, 0.5, 1.5]),
        );
        let mud = mud_set(&grid);
        assert!(mud.contains(&Cell::new(1, 0)));
        assert!(!mud.contains(&Cell::new(2, 0)));
    }

    #[test]
    fn water_and_out_of_bounds_never_flood() {
        let grid = TerrainGrid::from_classes(
            4,
            1,
            vec![OpenLand, LakeSwampMarsh, LakeSwampMarsh, OutOfBounds],
            ElevationGrid::flat(4, 1, 0.0),
        );
        let mud = mud_set(&grid);
        assert!(mud.contains(&Cell::new(0, 0)));
        assert!(!mud.contains(&Cell::new(1, 0)));
        assert!(!mud.contains(&Cell::new(2, 0)));
        assert!(!mud.contains(&Cell::new(3, 0)));
    }

    #[test]
    fn flood_stops_at_the_depth_bound() {
        // One edge at x=0, flat land stretching right. The cell at x=k is
        // seeded k rings out at depth k+1, and expansion only runs from
        // cells at depth <= 15, so x=15 is the last cell to flood.
        let mut rows = vec![OpenLand; 20];
        rows[0] = LakeSwampMarsh;
        let grid = TerrainGrid::from_classes(20, 1, rows, ElevationGrid::flat(20, 1, 0.0));
        let mud = mud_set(&grid);
        for x in 1..=15 {
            assert!(mud.contains(&Cell::new(x, 0)), "x={x} floods");
        }
        for x in 16..20 {
            assert!(!mud.contains(&Cell::new(x, 0)), "x={x} stays dry");
        }
    }

    #[test]
    fn set_computation_is_idempotent() {
        let grid = TerrainGrid::from_classes(
            3,
            3,
            vec![
                LakeSwampMarsh,
                OpenLand,
                OpenLand,
                OpenLand,
                OpenLand,
                RoughMeadow,
                OpenLand,
                RoughMeadow,
                LakeSwampMarsh,
            ],
            ElevationGrid::from_rows(3, 3, vec![0.0, 0.2, 0.9, 0.4, 0.6, 1.4, 2.5, 0.3, 0.0]),
        );
        assert_eq!(mud_set(&grid), mud_set(&grid));
    }

    #[test]
    fn applying_spring_reclassifies_the_set() {
        use crate::season::Season;
        let mut grid = TerrainGrid::from_classes(
            3,
            1,
            vec![LakeSwampMarsh, OpenLand, OpenLand],
            ElevationGrid::from_rows(3, 1, vec![0.0, 0.5, 5.0]),
        );
        grid.apply_season(Season::Spring);
        assert_eq!(grid.class_at(Cell::new(0, 0)).unwrap(), LakeSwampMarsh);
        assert_eq!(grid.class_at(Cell::new(1, 0)).unwrap(), Mud);
        assert_eq!(grid.class_at(Cell::new(2, 0)).unwrap(), OpenLand);
    }
}
