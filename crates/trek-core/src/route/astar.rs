//! The per-leg A* search and its cost model.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::coords::Cell;

use super::Router;

/// Anisotropic weights on the squared coordinate differences. Grid cells
/// are not square on the ground; these are tuning constants, not physics.
pub const X_SCALE: f64 = 10.29;
pub const Y_SCALE: f64 = 7.55;

/// One routed leg between two consecutive waypoints. Empty when the
/// frontier exhausted without reaching the goal.
pub(super) struct Leg {
    pub cells: Vec<Cell>,
    pub cost: f64,
    pub distance: f64,
}

/// Frontier entry ordered by f-score, min-first. The heap tolerates
/// duplicate entries for a cell; superseded ones are skipped on pop.
struct OpenNode {
    f: f64,
    cell: Cell,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.cell == other.cell
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, we want the smallest f.
        other.f.total_cmp(&self.f)
    }
}

impl<'a> Router<'a> {
    /// Straight-line displacement between two cells, combining the
    /// anisotropic horizontal scales with the elevation difference.
    pub fn displacement(&self, a: Cell, b: Cell) -> f64 {
        let dx = (a.x - b.x) as f64;
        let dy = (a.y - b.y) as f64;
        let de = self.grid.elevation_unchecked(a) - self.grid.elevation_unchecked(b);
        (X_SCALE * dx * dx + Y_SCALE * dy * dy + de * de).sqrt()
    }

    /// Time to step from `a` onto `b`: displacement over the *destination*
    /// cell's speed. Near-zero speeds make this huge but never infinite.
    pub fn step_cost(&self, a: Cell, b: Cell) -> f64 {
        self.displacement(a, b) / self.grid.class_unchecked(b).speed()
    }

    /// Estimated remaining time from `a` to `goal`: displacement over the
    /// *current* cell's speed. Known deviation from textbook A*: when the
    /// current cell is slower than the terrain ahead this can overestimate,
    /// so strict admissibility is not guaranteed. Preserved as the defined
    /// algorithm rather than tightened.
    pub fn heuristic(&self, a: Cell, goal: Cell) -> f64 {
        self.displacement(a, goal) / self.grid.class_unchecked(a).speed()
    }

    /// A* over the 8-connected grid from `start` to `goal`. The first
    /// extraction of `goal` ends the search; an exhausted frontier yields
    /// an empty leg with zero cost.
    pub(super) fn leg(&self, start: Cell, goal: Cell) -> Leg {
        if start == goal {
            return Leg {
                cells: vec![start],
                cost: 0.0,
                distance: 0.0,
            };
        }

        let mut came_from: HashMap<Cell, Cell> = HashMap::new();
        let mut g_score: HashMap<Cell, f64> = HashMap::new();
        let mut f_score: HashMap<Cell, f64> = HashMap::new();
        let mut open: BinaryHeap<OpenNode> = BinaryHeap::new();

        let f0 = self.heuristic(start, goal);
        g_score.insert(start, 0.0);
        f_score.insert(start, f0);
        open.push(OpenNode { f: f0, cell: start });

        while let Some(OpenNode { f, cell }) = open.pop() {
            // Lazy invalidation: a better push has superseded this entry.
            if f_score.get(&cell).map_or(true, |&best| f > best) {
                continue;
            }
            if cell == goal {
                return self.reconstruct(&came_from, start, goal, g_score[&goal]);
            }
            let current_g = g_score[&cell];
            for n in cell.moore().filter(|&n| self.grid.in_bounds(n)) {
                let tentative = current_g + self.step_cost(cell, n);
                if tentative < g_score.get(&n).copied().unwrap_or(f64::INFINITY) {
                    came_from.insert(n, cell);
                    g_score.insert(n, tentative);
                    let fn_score = tentative + self.heuristic(n, goal);
                    f_score.insert(n, fn_score);
                    open.push(OpenNode {
                        f: fn_score,
                        cell: n,
                    });
                }
            }
        }

        // Goal never reached. Degrade to an empty sub-path rather than
        // aborting the whole multi-leg route.
        Leg {
            cells: Vec::new(),
            cost: 0.0,
            distance: 0.0,
        }
    }

    /// Walk the back-pointers from `goal` to `start`, reverse, and sum the
    /// consecutive displacements for the leg distance.
    fn reconstruct(
        &self,
        came_from: &HashMap<Cell, Cell>,
        start: Cell,
        goal: Cell,
        cost: f64,
    ) -> Leg {
        let mut cells = vec![goal];
        let mut current = goal;
        while current != start {
            current = came_from[&current];
            cells.push(current);
        }
        cells.reverse();
        let distance = cells
            .windows(2)
            .map(|pair| self.displacement(pair[0], pair[1]))
            .sum();
        Leg {
            cells,
            cost,
            distance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::class::TerrainClass::{self, *};
    use crate::terrain::elevation::ElevationGrid;
    use crate::terrain::TerrainGrid;
    use approx::assert_relative_eq;

    fn flat_grid(width: usize, height: usize, rows: &[TerrainClass]) -> TerrainGrid {
        TerrainGrid::from_classes(
            width,
            height,
            rows.to_vec(),
            ElevationGrid::flat(width, height, 0.0),
        )
    }

    #[test]
    fn displacement_is_anisotropic() {
        let grid = flat_grid(2, 2, &[OpenLand; 4]);
        let router = Router::new(&grid);
        let step_x = router.displacement(Cell::new(0, 0), Cell::new(1, 0));
        let step_y = router.displacement(Cell::new(0, 0), Cell::new(0, 1));
        assert_relative_eq!(step_x, X_SCALE.sqrt());
        assert_relative_eq!(step_y, Y_SCALE.sqrt());
        assert!(step_x > step_y);
    }

    #[test]
    fn displacement_includes_elevation_difference() {
        let grid = TerrainGrid::from_classes(
            2,
            1,
            vec![OpenLand, OpenLand],
            ElevationGrid::from_rows(2, 1, vec![10.0, 13.0]),
        );
        let router = Router::new(&grid);
        let d = router.displacement(Cell::new(0, 0), Cell::new(1, 0));
        assert_relative_eq!(d, (X_SCALE + 9.0).sqrt());
    }

    #[test]
    fn step_cost_uses_destination_speed() {
        let grid = flat_grid(2, 1, &[OpenLand, LakeSwampMarsh]);
        let router = Router::new(&grid);
        let onto_water = router.step_cost(Cell::new(0, 0), Cell::new(1, 0));
        let onto_land = router.step_cost(Cell::new(1, 0), Cell::new(0, 0));
        assert_relative_eq!(onto_water, X_SCALE.sqrt() / 1.0);
        assert_relative_eq!(onto_land, X_SCALE.sqrt() / 3.7);
    }

    #[test]
    fn heuristic_uses_current_cell_speed() {
        let grid = flat_grid(2, 1, &[LakeSwampMarsh, OpenLand]);
        let router = Router::new(&grid);
        let h = router.heuristic(Cell::new(0, 0), Cell::new(1, 0));
        assert_relative_eq!(h, X_SCALE.sqrt() / 1.0);
    }

    #[test]
    fn same_start_and_goal_is_a_single_cell_leg() {
        let grid = flat_grid(3, 3, &[OpenLand; 9]);
        let router = Router::new(&grid);
        let leg = router.leg(Cell::new(1, 1), Cell::new(1, 1));
        assert_eq!(leg.cells, vec![Cell::new(1, 1)]);
        assert_eq!(leg.cost, 0.0);
    }

    #[test]
    fn diagonal_beats_axis_zigzag_on_open_land() {
        let grid = flat_grid(3, 3, &[OpenLand; 9]);
        let router = Router::new(&grid);
        let leg = router.leg(Cell::new(0, 0), Cell::new(2, 2));
        assert_eq!(
            leg.cells,
            vec![Cell::new(0, 0), Cell::new(1, 1), Cell::new(2, 2)]
        );
        let diagonal = (X_SCALE + Y_SCALE).sqrt();
        assert_relative_eq!(leg.cost, 2.0 * diagonal / 3.7, max_relative = 1e-12);
        assert_relative_eq!(leg.distance, 2.0 * diagonal, max_relative = 1e-12);
    }

    /// Exhaustive relaxation (Bellman-Ford over the whole grid) as the
    /// ground truth for the leg cost on a uniform-speed, flat grid.
    fn brute_force_cost(router: &Router<'_>, width: i32, height: i32, start: Cell, goal: Cell) -> f64 {
        let idx = |c: Cell| (c.y * width + c.x) as usize;
        let mut dist = vec![f64::INFINITY; (width * height) as usize];
        dist[idx(start)] = 0.0;
        for _ in 0..(width * height) {
            for y in 0..height {
                for x in 0..width {
                    let cell = Cell::new(x, y);
                    if dist[idx(cell)].is_infinite() {
                        continue;
                    }
                    for n in cell.moore() {
                        if n.x < 0 || n.y < 0 || n.x >= width || n.y >= height {
                            continue;
                        }
                        let d = dist[idx(cell)] + router.step_cost(cell, n);
                        if d < dist[idx(n)] {
                            dist[idx(n)] = d;
                        }
                    }
                }
            }
        }
        dist[idx(goal)]
    }

    #[test]
    fn leg_cost_matches_exhaustive_search_on_uniform_grid() {
        let grid = flat_grid(5, 5, &[OpenLand; 25]);
        let router = Router::new(&grid);
        for goal in [Cell::new(4, 4), Cell::new(4, 1), Cell::new(0, 3)] {
            let leg = router.leg(Cell::new(0, 0), goal);
            let expected = brute_force_cost(&router, 5, 5, Cell::new(0, 0), goal);
            assert_relative_eq!(leg.cost, expected, max_relative = 1e-9);
        }
    }

    #[test]
    fn route_detours_around_near_impassible_terrain() {
        // A wall of impassible vegetation with one gap at the top. All
        // speeds on the open side are maximal for the grid, so the
        // heuristic stays admissible and the detour is found.
        let mut rows = vec![OpenLand; 15];
        for y in 1..3 {
            rows[y * 5 + 2] = ImpassibleVegetation;
        }
        let grid = flat_grid(5, 3, &rows);
        let router = Router::new(&grid);
        let leg = router.leg(Cell::new(0, 1), Cell::new(4, 1));
        assert!(!leg.cells.is_empty());
        assert!(leg
            .cells
            .iter()
            .all(|&c| grid.class_at(c).unwrap() != ImpassibleVegetation));
    }
}
