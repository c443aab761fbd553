//! Seasonal terrain transforms. Each season's engine computes the set of
//! cells to reclassify from a frozen pre-season grid; `TerrainGrid::apply_season`
//! does the actual reclassification.

pub mod spring;
pub mod winter;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TrekError;

/// The season selector. Summer is the identity; the other three each
/// reclassify one slice of the map before routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    Summer,
    Fall,
    Winter,
    Spring,
}

impl FromStr for Season {
    type Err = TrekError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "summer" => Ok(Season::Summer),
            "fall" => Ok(Season::Fall),
            "winter" => Ok(Season::Winter),
            "spring" => Ok(Season::Spring),
            _ => Err(TrekError::MalformedInput {
                line: 0,
                reason: format!("no season found for {s:?}"),
            }),
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Season::Summer => "summer",
            Season::Fall => "fall",
            Season::Winter => "winter",
            Season::Spring => "spring",
        };
        f.write_str(name)
    }
}
