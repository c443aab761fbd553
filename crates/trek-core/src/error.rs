//! Error taxonomy for terrain construction, input parsing, and routing.

use crate::coords::Cell;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrekError {
    /// A raw pixel value matched no terrain class. Fatal: the terrain grid
    /// cannot be built from an image with unrecognized colors.
    #[error("no terrain class found for color {0:#08x}")]
    UnknownClass(u32),

    /// A coordinate query fell outside the grid. Always checked before
    /// indexing, never clamped.
    #[error("cell {cell} lies outside the {width}x{height} grid")]
    OutOfBounds {
        cell: Cell,
        width: usize,
        height: usize,
    },

    /// Elevation, waypoint, or season text did not parse.
    #[error("malformed input at line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },

    /// `route()` was called with no waypoints at all.
    #[error("waypoint list is empty")]
    NoWaypoints,
}
