//! The terrain grid: per-cell classification, the co-registered elevation
//! grid, and the derived cell sets the seasonal transforms start from.

pub mod class;
pub mod elevation;

use std::collections::HashSet;

use crate::coords::Cell;
use crate::error::TrekError;
use crate::season::{self, Season};
use class::TerrainClass;
use elevation::ElevationGrid;

/// Classified terrain with elevation. Built once from raw pixels; after
/// construction the only permitted mutation is a single `apply_season`
/// call, before any routing begins.
#[derive(Debug, Clone)]
pub struct TerrainGrid {
    /// Row-major class per cell.
    classes: Vec<TerrainClass>,
    elevation: ElevationGrid,
    /// Water cells adjacent to at least one non-water, non-frozen cell.
    water_edges: HashSet<Cell>,
    /// Footpath cells adjacent to at least one easy-movement-forest cell.
    footpaths_near_forest: HashSet<Cell>,
    pub width: usize,
    pub height: usize,
}

impl TerrainGrid {
    /// Classify a dense row-major grid of raw 24-bit RGB values and compute
    /// the derived water-edge and footpath-near-forest sets.
    ///
    /// Any pixel that matches no class aborts construction with
    /// `UnknownClass`. The elevation grid must have the same dimensions.
    pub fn classify(
        width: usize,
        height: usize,
        pixels: &[u32],
        elevation: ElevationGrid,
    ) -> Result<Self, TrekError> {
        assert_eq!(pixels.len(), width * height);
        assert_eq!((elevation.width, elevation.height), (width, height));

        let mut classes = Vec::with_capacity(width * height);
        for &rgb in pixels {
            classes.push(TerrainClass::from_rgb(rgb)?);
        }

        let mut grid = Self {
            classes,
            elevation,
            water_edges: HashSet::new(),
            footpaths_near_forest: HashSet::new(),
            width,
            height,
        };
        grid.compute_derived_sets();
        Ok(grid)
    }

    /// Build directly from classes, for callers that already hold a
    /// classified grid (and for tests).
    pub fn from_classes(
        width: usize,
        height: usize,
        classes: Vec<TerrainClass>,
        elevation: ElevationGrid,
    ) -> Self {
        assert_eq!(classes.len(), width * height);
        assert_eq!((elevation.width, elevation.height), (width, height));
        let mut grid = Self {
            classes,
            elevation,
            water_edges: HashSet::new(),
            footpaths_near_forest: HashSet::new(),
            width,
            height,
        };
        grid.compute_derived_sets();
        grid
    }

    /// One pass over the grid, testing each cell's Moore neighborhood.
    /// Off-grid neighbors are absent, not a class. Both tests short-circuit
    /// on the first qualifying neighbor.
    fn compute_derived_sets(&mut self) {
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let cell = Cell::new(x, y);
                match self.class_unchecked(cell) {
                    TerrainClass::LakeSwampMarsh => {
                        let edge = cell
                            .moore()
                            .filter(|&n| self.in_bounds(n))
                            .any(|n| {
                                let c = self.class_unchecked(n);
                                !c.is_water() && c != TerrainClass::FrozenWater
                            });
                        if edge {
                            self.water_edges.insert(cell);
                        }
                    }
                    TerrainClass::Footpath => {
                        let near_forest = cell
                            .moore()
                            .filter(|&n| self.in_bounds(n))
                            .any(|n| self.class_unchecked(n) == TerrainClass::EasyMoveForest);
                        if near_forest {
                            self.footpaths_near_forest.insert(cell);
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && (cell.x as usize) < self.width
            && (cell.y as usize) < self.height
    }

    #[inline]
    pub(crate) fn class_unchecked(&self, cell: Cell) -> TerrainClass {
        self.classes[cell.y as usize * self.width + cell.x as usize]
    }

    #[inline]
    pub(crate) fn elevation_unchecked(&self, cell: Cell) -> f64 {
        self.elevation.at(cell)
    }

    /// The current class of a cell.
    pub fn class_at(&self, cell: Cell) -> Result<TerrainClass, TrekError> {
        if !self.in_bounds(cell) {
            return Err(self.out_of_bounds(cell));
        }
        Ok(self.class_unchecked(cell))
    }

    /// The elevation sample at a cell.
    pub fn elevation_at(&self, cell: Cell) -> Result<f64, TrekError> {
        if !self.in_bounds(cell) {
            return Err(self.out_of_bounds(cell));
        }
        Ok(self.elevation.at(cell))
    }

    fn out_of_bounds(&self, cell: Cell) -> TrekError {
        TrekError::OutOfBounds {
            cell,
            width: self.width,
            height: self.height,
        }
    }

    /// Water cells on the edge of a water body (pre-season snapshot).
    pub fn water_edges(&self) -> &HashSet<Cell> {
        &self.water_edges
    }

    /// Footpath cells adjacent to easy-movement forest (pre-season snapshot).
    pub fn footpaths_near_forest(&self) -> &HashSet<Cell> {
        &self.footpaths_near_forest
    }

    /// Reclassify the terrain for a season. Winter freezes water outward
    /// from the edges, spring floods low-lying land near water, fall covers
    /// forest-adjacent footpaths with leaves; summer leaves the map as-is.
    ///
    /// Apply at most once, before routing. Applying a second season on top
    /// of an already-seasoned grid is unsupported: the transforms read the
    /// derived sets of the original classification.
    pub fn apply_season(&mut self, season: Season) {
        let (cells, target) = match season {
            Season::Summer => return,
            Season::Winter => (season::winter::freeze_set(self), TerrainClass::FrozenWater),
            Season::Spring => (season::spring::mud_set(self), TerrainClass::Mud),
            Season::Fall => (
                self.footpaths_near_forest.clone(),
                TerrainClass::FallFootpath,
            ),
        };
        for cell in cells {
            self.classes[cell.y as usize * self.width + cell.x as usize] = target;
        }
    }
}

/// Abbreviation raster, one row per line. Debug aid.
impl std::fmt::Display for TerrainGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "TerrainGrid: width={} height={}", self.width, self.height)?;
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                write!(f, "{}", self.class_unchecked(Cell::new(x, y)).abbrev())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
