//! Grid-shaped fields and the finite-difference stencils shared by both
//! curvature pipelines.
//!
//! Axis convention, fixed crate-wide: axis 0 (rows) runs along u, axis 1
//! (cols) runs along v. Storage is row-major, index `i * cols + j`.
//!
//! Derivatives use second-order central differences in the interior and
//! second-order one-sided stencils on the boundary rows/columns, so the
//! truncation error is O(h^2) everywhere on the grid.

use nalgebra::SVector;
use serde::{Deserialize, Serialize};

/// A scalar quantity sampled over the (u, v) grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarField {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl ScalarField {
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    pub fn values(&self) -> &[f64] {
        &self.data
    }

    pub fn min(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

/// A `D`-dimensional point sampled over the (u, v) grid. `D = 4` for the
/// surface in S^3, `D = 3` for its stereographic image in R^3.
#[derive(Debug, Clone, PartialEq)]
pub struct PointField<const D: usize> {
    rows: usize,
    cols: usize,
    data: Vec<SVector<f64, D>>,
}

impl<const D: usize> PointField<D> {
    pub fn from_fn(
        rows: usize,
        cols: usize,
        mut f: impl FnMut(usize, usize) -> SVector<f64, D>,
    ) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> SVector<f64, D> {
        self.data[row * self.cols + col]
    }

    /// Partial derivative along u (axis 0) with spacing `du`.
    pub fn partial_u(&self, du: f64) -> PointField<D> {
        debug_assert!(self.rows >= 3, "u stencil needs at least 3 rows");
        let inv = 1.0 / (2.0 * du);
        let last = self.rows - 1;
        PointField::from_fn(self.rows, self.cols, |i, j| {
            if i == 0 {
                (-3.0 * self.get(0, j) + 4.0 * self.get(1, j) - self.get(2, j)) * inv
            } else if i == last {
                (3.0 * self.get(last, j) - 4.0 * self.get(last - 1, j) + self.get(last - 2, j))
                    * inv
            } else {
                (self.get(i + 1, j) - self.get(i - 1, j)) * inv
            }
        })
    }

    /// Partial derivative along v (axis 1) with spacing `dv`.
    pub fn partial_v(&self, dv: f64) -> PointField<D> {
        debug_assert!(self.cols >= 3, "v stencil needs at least 3 columns");
        let inv = 1.0 / (2.0 * dv);
        let last = self.cols - 1;
        PointField::from_fn(self.rows, self.cols, |i, j| {
            if j == 0 {
                (-3.0 * self.get(i, 0) + 4.0 * self.get(i, 1) - self.get(i, 2)) * inv
            } else if j == last {
                (3.0 * self.get(i, last) - 4.0 * self.get(i, last - 1) + self.get(i, last - 2))
                    * inv
            } else {
                (self.get(i, j + 1) - self.get(i, j - 1)) * inv
            }
        })
    }
}
