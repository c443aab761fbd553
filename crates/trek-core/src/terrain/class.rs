//! The closed terrain classification table: one class per map color, each
//! carrying a traversal speed (cells per unit time) and a render color.

use crate::error::TrekError;
use serde::{Deserialize, Serialize};

/// Terrain classification of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainClass {
    PavedRoad,
    OpenLand,
    Footpath,
    EasyMoveForest,
    SlowRunForest,
    RoughMeadow,
    WalkForest,
    LakeSwampMarsh,
    ImpassibleVegetation,
    OutOfBounds,
    /// Footpath under leaf cover (fall overlay).
    FallFootpath,
    /// Land submerged by the spring flood.
    Mud,
    /// Water frozen over in winter.
    FrozenWater,
    /// Rendering sentinel for the walked route. Never appears on a terrain
    /// map and is never traversed.
    RouteMarker,
}

/// Every class, in table order. `from_rgb` scans this; tests iterate it.
pub const ALL_CLASSES: [TerrainClass; 14] = [
    TerrainClass::PavedRoad,
    TerrainClass::OpenLand,
    TerrainClass::Footpath,
    TerrainClass::EasyMoveForest,
    TerrainClass::SlowRunForest,
    TerrainClass::RoughMeadow,
    TerrainClass::WalkForest,
    TerrainClass::LakeSwampMarsh,
    TerrainClass::ImpassibleVegetation,
    TerrainClass::OutOfBounds,
    TerrainClass::FallFootpath,
    TerrainClass::Mud,
    TerrainClass::FrozenWater,
    TerrainClass::RouteMarker,
];

impl TerrainClass {
    /// The defining 24-bit RGB color of this class on a terrain map.
    pub fn color(self) -> u32 {
        match self {
            TerrainClass::PavedRoad => 0x473303,
            TerrainClass::OpenLand => 0xF89412,
            TerrainClass::Footpath => 0x000000,
            TerrainClass::EasyMoveForest => 0xFFFFFF,
            TerrainClass::SlowRunForest => 0x02D03C,
            TerrainClass::RoughMeadow => 0xFFC000,
            TerrainClass::WalkForest => 0x028828,
            TerrainClass::LakeSwampMarsh => 0x0000FF,
            TerrainClass::ImpassibleVegetation => 0x054918,
            TerrainClass::OutOfBounds => 0xCD0065,
            TerrainClass::FallFootpath => 0x78788C,
            TerrainClass::Mud => 0x8D4C00,
            TerrainClass::FrozenWater => 0x7BFFFF,
            TerrainClass::RouteMarker => 0xFF0000,
        }
    }

    /// Traversal speed in cells per unit time. Strictly positive for every
    /// class that can appear on a map; impassible vegetation and
    /// out-of-bounds use near-zero speeds so their cost is huge but finite.
    pub fn speed(self) -> f64 {
        match self {
            TerrainClass::PavedRoad => 3.8,
            TerrainClass::OpenLand => 3.7,
            TerrainClass::Footpath => 3.6,
            TerrainClass::EasyMoveForest => 3.5,
            TerrainClass::SlowRunForest => 3.0,
            TerrainClass::RoughMeadow => 2.5,
            TerrainClass::WalkForest => 2.0,
            TerrainClass::LakeSwampMarsh => 1.0,
            TerrainClass::ImpassibleVegetation => 0.01,
            TerrainClass::OutOfBounds => 0.001,
            TerrainClass::FallFootpath => 3.25,
            TerrainClass::Mud => 1.5,
            TerrainClass::FrozenWater => 3.75,
            TerrainClass::RouteMarker => 0.0,
        }
    }

    /// One-letter abbreviation for the debug raster.
    pub fn abbrev(self) -> char {
        match self {
            TerrainClass::PavedRoad => 'P',
            TerrainClass::OpenLand => 'O',
            TerrainClass::Footpath => 'F',
            TerrainClass::EasyMoveForest => 'E',
            TerrainClass::SlowRunForest => 'S',
            TerrainClass::RoughMeadow => 'R',
            TerrainClass::WalkForest => 'W',
            TerrainClass::LakeSwampMarsh => 'L',
            TerrainClass::ImpassibleVegetation => 'I',
            TerrainClass::OutOfBounds => 'B',
            TerrainClass::FallFootpath => 'A',
            TerrainClass::Mud => 'M',
            TerrainClass::FrozenWater => 'Z',
            TerrainClass::RouteMarker => 'X',
        }
    }

    /// Classify a raw 24-bit RGB value. Exact match only; there is no
    /// nearest-color fallback.
    pub fn from_rgb(rgb: u32) -> Result<TerrainClass, TrekError> {
        ALL_CLASSES
            .iter()
            .copied()
            .find(|c| c.color() == rgb)
            .ok_or(TrekError::UnknownClass(rgb))
    }

    /// True for still-liquid water. Frozen water does not count: the
    /// freeze never expands into it and it never makes a cell a water edge.
    pub fn is_water(self) -> bool {
        self == TerrainClass::LakeSwampMarsh
    }
}
