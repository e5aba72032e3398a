//! Gridded field storage.
//!
//! A [`Grid`] is a row-major `f32` array whose trailing two axes are the
//! spatial (row, column) axes. Any leading axes (vertical levels, time) are
//! treated as a batch of independent 2-D slabs. A rank-1 grid is a single row.

use crate::error::{DerivParamError, Result};

/// Missing-value sentinel. Arithmetic on it propagates per IEEE-754.
pub const MISSING: f32 = f32::NAN;

/// N-dimensional gridded field with 2-D trailing spatial axes.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    shape: Vec<usize>,
    data: Vec<f32>,
}

impl Grid {
    /// Create a grid from a shape and row-major data.
    pub fn new(shape: Vec<usize>, data: Vec<f32>) -> Result<Self> {
        if shape.is_empty() {
            return Err(DerivParamError::invalid_argument(
                "grid must have at least one dimension",
            ));
        }
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(DerivParamError::invalid_argument(format!(
                "grid shape {:?} needs {} values, got {}",
                shape,
                expected,
                data.len()
            )));
        }
        Ok(Self { shape, data })
    }

    /// Create a 2-D grid of `rows` x `cols`.
    pub fn from_2d(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self> {
        Self::new(vec![rows, cols], data)
    }

    /// Create a grid with every cell set to `value`.
    ///
    /// `shape` must have at least one dimension.
    pub fn filled(shape: &[usize], value: f32) -> Self {
        debug_assert!(!shape.is_empty(), "grid must have at least one dimension");
        Self {
            shape: shape.to_vec(),
            data: vec![value; shape.iter().product()],
        }
    }

    /// A zero grid with the same shape as `self`.
    pub fn zeros_like(&self) -> Self {
        Self::filled(&self.shape, 0.0)
    }

    /// An all-missing grid with the same shape as `self`.
    pub fn missing_like(&self) -> Self {
        Self::filled(&self.shape, MISSING)
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Number of rows in each spatial slab.
    pub fn rows(&self) -> usize {
        if self.shape.len() >= 2 {
            self.shape[self.shape.len() - 2]
        } else {
            1
        }
    }

    /// Number of columns in each spatial slab.
    pub fn cols(&self) -> usize {
        self.shape.last().copied().unwrap_or(1)
    }

    /// Cells per spatial slab.
    pub fn slab_len(&self) -> usize {
        self.rows() * self.cols()
    }

    /// Number of spatial slabs (product of the leading axes).
    pub fn num_slabs(&self) -> usize {
        if self.shape.len() > 2 {
            self.shape[..self.shape.len() - 2].iter().product()
        } else {
            1
        }
    }

    /// Iterate over the 2-D slabs in row-major order.
    pub fn slabs(&self) -> impl Iterator<Item = &[f32]> {
        let slab_len = self.slab_len();
        (0..self.num_slabs()).map(move |i| &self.data[i * slab_len..(i + 1) * slab_len])
    }

    /// Iterate mutably over the 2-D slabs in row-major order.
    pub fn slabs_mut(&mut self) -> impl Iterator<Item = &mut [f32]> {
        let slab_len = self.slab_len();
        let num_slabs = self.num_slabs();
        let mut rest: &mut [f32] = &mut self.data;
        (0..num_slabs).map(move |_| {
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(slab_len);
            rest = tail;
            head
        })
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the value at a full multi-dimensional index.
    pub fn get(&self, index: &[usize]) -> Option<f32> {
        if index.len() != self.shape.len() {
            return None;
        }
        let mut flat = 0;
        for (&i, &dim) in index.iter().zip(&self.shape) {
            if i >= dim {
                return None;
            }
            flat = flat * dim + i;
        }
        self.data.get(flat).copied()
    }

    /// Get the value at (row, col) of the first slab.
    pub fn get_2d(&self, row: usize, col: usize) -> Option<f32> {
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        self.data.get(row * self.cols() + col).copied()
    }

    /// Count of missing (NaN) cells.
    pub fn count_missing(&self) -> usize {
        self.data.iter().filter(|v| v.is_nan()).count()
    }

    /// Fail with ShapeMismatch unless `other` has exactly this shape.
    pub fn ensure_same_shape(&self, other: &Grid) -> Result<()> {
        if self.shape != other.shape {
            return Err(DerivParamError::shape_mismatch(&self.shape, &other.shape));
        }
        Ok(())
    }

    /// Apply `f` to every cell.
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Grid {
        Grid {
            shape: self.shape.clone(),
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Combine two co-shaped grids cell by cell.
    pub fn zip_with(&self, other: &Grid, f: impl Fn(f32, f32) -> f32) -> Result<Grid> {
        self.ensure_same_shape(other)?;
        Ok(Grid {
            shape: self.shape.clone(),
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    /// Add `other` into `self` cell by cell.
    pub fn add_assign(&mut self, other: &Grid) -> Result<()> {
        self.ensure_same_shape(other)?;
        for (a, &b) in self.data.iter_mut().zip(&other.data) {
            *a += b;
        }
        Ok(())
    }

    /// Remove `n` cells from every side of each spatial slab.
    ///
    /// Slabs too small to keep any cell yield a zero-sized spatial extent.
    pub fn trim_border(&self, n: usize) -> Grid {
        let (rows, cols) = (self.rows(), self.cols());
        let new_rows = rows.saturating_sub(2 * n);
        let new_cols = cols.saturating_sub(2 * n);

        let mut data = Vec::with_capacity(self.num_slabs() * new_rows * new_cols);
        if new_rows == 0 || new_cols == 0 {
            return Grid {
                shape: self.with_spatial(new_rows, new_cols),
                data,
            };
        }

        for slab in self.slabs() {
            for row in n..n + new_rows {
                let start = row * cols + n;
                data.extend_from_slice(&slab[start..start + new_cols]);
            }
        }

        Grid {
            shape: self.with_spatial(new_rows, new_cols),
            data,
        }
    }

    /// This grid's shape with the spatial axes replaced.
    pub(crate) fn with_spatial(&self, rows: usize, cols: usize) -> Vec<usize> {
        let mut shape = self.shape.clone();
        let rank = shape.len();
        if rank >= 2 {
            shape[rank - 2] = rows;
            shape[rank - 1] = cols;
        } else {
            // rank-1 grids are a single row, so rows is 0 or 1 here
            shape[0] = rows * cols;
        }
        shape
    }

    /// Build a grid from per-slab data produced for this grid's leading axes.
    pub(crate) fn from_slabs(&self, rows: usize, cols: usize, data: Vec<f32>) -> Grid {
        Grid {
            shape: self.with_spatial(rows, cols),
            data,
        }
    }
}
