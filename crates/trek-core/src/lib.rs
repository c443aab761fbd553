//! Seasonal terrain routing over a classified grid.
//!
//! The pipeline: classify a raw pixel grid into a [`TerrainGrid`]
//! (computing the water-edge and footpath-near-forest sets as it goes),
//! optionally apply one [`Season`]'s transform in place, then run the
//! multi-leg A* [`Router`] through an ordered waypoint list to get a
//! [`Route`] with its total travel time and displacement.
//!
//! Everything here is single-threaded and runs to completion; memory is
//! O(width × height) throughout.

pub mod coords;
pub mod error;
pub mod route;
pub mod season;
pub mod terrain;

pub use coords::Cell;
pub use error::TrekError;
pub use route::{parse_waypoints, Route, Router};
pub use season::Season;
pub use terrain::class::TerrainClass;
pub use terrain::elevation::ElevationGrid;
pub use terrain::TerrainGrid;
