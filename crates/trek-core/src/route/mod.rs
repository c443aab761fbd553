//! Multi-leg routing: waypoint parsing, the `Route` result type, and the
//! router that stitches one A* search per consecutive waypoint pair into a
//! single path over the (possibly seasoned) terrain grid.

mod astar;

pub use astar::{X_SCALE, Y_SCALE};

use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::coords::Cell;
use crate::error::TrekError;
use crate::terrain::TerrainGrid;

/// The walked path: every visited cell in order, plus the accumulated
/// travel time (`cost`) and the accumulated displacement (`distance`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub cells: Vec<Cell>,
    /// Total travel time across all legs, in time units.
    pub cost: f64,
    /// Total straight-line displacement summed over consecutive cells.
    pub distance: f64,
}

/// Runs A* legs over a terrain grid. The grid is read-only for the
/// router's whole lifetime; apply any season before constructing one.
pub struct Router<'a> {
    grid: &'a TerrainGrid,
}

impl<'a> Router<'a> {
    pub fn new(grid: &'a TerrainGrid) -> Self {
        Self { grid }
    }

    /// Route through `waypoints` in order.
    ///
    /// At least one waypoint is required and every waypoint must lie on
    /// the grid; both are checked before any search runs. A single
    /// waypoint yields a one-cell route with zero cost. Between legs the
    /// shared waypoint appears exactly once in the concatenated sequence.
    /// A leg whose goal turns out unreachable contributes nothing (empty
    /// sub-path, zero cost) instead of failing the whole route.
    pub fn route(&self, waypoints: &[Cell]) -> Result<Route, TrekError> {
        if waypoints.is_empty() {
            return Err(TrekError::NoWaypoints);
        }
        for &w in waypoints {
            if !self.grid.in_bounds(w) {
                return Err(TrekError::OutOfBounds {
                    cell: w,
                    width: self.grid.width,
                    height: self.grid.height,
                });
            }
        }

        let mut cells = vec![waypoints[0]];
        let mut cost = 0.0;
        let mut distance = 0.0;
        for pair in waypoints.windows(2) {
            let leg = self.leg(pair[0], pair[1]);
            if leg.cells.is_empty() {
                continue;
            }
            cells.extend_from_slice(&leg.cells[1..]);
            cost += leg.cost;
            distance += leg.distance;
        }
        Ok(Route {
            cells,
            cost,
            distance,
        })
    }
}

/// Parse a waypoint list: one `x y` integer pair per line, whitespace
/// separated. Blank lines are skipped; anything else malformed is fatal.
pub fn parse_waypoints<R: BufRead>(reader: R) -> Result<Vec<Cell>, TrekError> {
    let mut waypoints = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| TrekError::MalformedInput {
            line: i + 1,
            reason: e.to_string(),
        })?;
        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            continue;
        };
        let second = tokens.next().ok_or_else(|| TrekError::MalformedInput {
            line: i + 1,
            reason: "expected two coordinates".into(),
        })?;
        if tokens.next().is_some() {
            return Err(TrekError::MalformedInput {
                line: i + 1,
                reason: "expected exactly two coordinates".into(),
            });
        }
        let parse = |token: &str| {
            token.parse::<i32>().map_err(|_| TrekError::MalformedInput {
                line: i + 1,
                reason: format!("not an integer: {token:?}"),
            })
        };
        waypoints.push(Cell::new(parse(first)?, parse(second)?));
    }
    Ok(waypoints)
}
