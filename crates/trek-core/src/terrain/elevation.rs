//! Per-cell elevation samples, co-registered with the terrain class grid.

use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::coords::Cell;
use crate::error::TrekError;

/// A dense 2-D elevation table. Row-major, same dimensions as the class
/// grid it accompanies; immutable after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElevationGrid {
    /// Row-major elevation values.
    pub data: Vec<f64>,
    pub width: usize,
    pub height: usize,
}

impl ElevationGrid {
    /// An all-equal elevation grid, mostly for tests.
    pub fn flat(width: usize, height: usize, value: f64) -> Self {
        Self {
            data: vec![value; width * height],
            width,
            height,
        }
    }

    /// Build from explicit row-major samples.
    pub fn from_rows(width: usize, height: usize, data: Vec<f64>) -> Self {
        assert_eq!(data.len(), width * height);
        Self {
            data,
            width,
            height,
        }
    }

    /// Parse `height` lines of whitespace-separated floats, at least
    /// `width` values per line. Extra trailing values on a line are
    /// ignored (real elevation exports pad their rows); missing values or
    /// non-numeric tokens are `MalformedInput`.
    pub fn from_reader<R: BufRead>(
        reader: R,
        width: usize,
        height: usize,
    ) -> Result<Self, TrekError> {
        let mut data = Vec::with_capacity(width * height);
        let mut lines = reader.lines();
        for row in 0..height {
            let line = lines
                .next()
                .transpose()
                .map_err(|e| TrekError::MalformedInput {
                    line: row + 1,
                    reason: e.to_string(),
                })?
                .ok_or_else(|| TrekError::MalformedInput {
                    line: row + 1,
                    reason: format!("expected {height} rows of elevation data"),
                })?;
            let mut values = line.split_whitespace();
            for col in 0..width {
                let token = values.next().ok_or_else(|| TrekError::MalformedInput {
                    line: row + 1,
                    reason: format!("expected {width} values, found {col}"),
                })?;
                let value: f64 = token.parse().map_err(|_| TrekError::MalformedInput {
                    line: row + 1,
                    reason: format!("not a number: {token:?}"),
                })?;
                data.push(value);
            }
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    #[inline]
    pub(crate) fn at(&self, cell: Cell) -> f64 {
        self.data[cell.y as usize * self.width + cell.x as usize]
    }

    /// Bounds-checked elevation lookup.
    pub fn get(&self, cell: Cell) -> Result<f64, TrekError> {
        if cell.x < 0
            || cell.y < 0
            || cell.x as usize >= self.width
            || cell.y as usize >= self.height
        {
            return Err(TrekError::OutOfBounds {
                cell,
                width: self.width,
                height: self.height,
            });
        }
        Ok(self.at(cell))
    }
}
