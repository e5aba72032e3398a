//! Edge-masked finite-difference stencils.
//!
//! Spatial-derivative operators share one evaluation pattern: allocate
//! outputs shaped like the inputs, mark the one-cell border of every slab as
//! missing (a centered difference cannot be evaluated there), then compute
//! each interior cell from its four nearest neighbors weighted by
//! `0.5 / spacing`.
//!
//! ```text
//!            above
//!              │
//!   left ── center ── right      weights.x = 0.5 / dx
//!              │                 weights.y = 0.5 / dy
//!            below
//! ```

use crate::error::{DerivParamError, Result};
use crate::grid::{Grid, MISSING};

/// Grid spacing along one spatial axis.
#[derive(Debug, Clone, PartialEq)]
pub enum Spacing {
    /// One spacing for the whole grid.
    Uniform(f32),
    /// Per-cell spacing covering the full spatial extent of the data,
    /// border included (e.g. map-projection distortion).
    Varying(Grid),
}

impl Spacing {
    /// Wrap a grid-valued spacing. A single-cell grid is a uniform spacing.
    pub fn from_grid(grid: Grid) -> Self {
        match grid.data() {
            [value] => Self::Uniform(*value),
            _ => Self::Varying(grid),
        }
    }

    pub fn is_uniform(&self) -> bool {
        matches!(self, Self::Uniform(_))
    }

    /// Resolve this spacing against a data grid of `rows` x `cols`,
    /// trimming a varying spacing to the interior the stencil evaluates.
    pub fn interior(&self, rows: usize, cols: usize) -> Result<InteriorSpacing> {
        match self {
            Self::Uniform(value) => Ok(InteriorSpacing::Uniform(*value)),
            Self::Varying(grid) => {
                if grid.num_slabs() != 1 || grid.rows() != rows || grid.cols() != cols {
                    return Err(DerivParamError::shape_mismatch(&[rows, cols], grid.shape()));
                }
                let trimmed = grid.trim_border(1);
                let cols = trimmed.cols();
                Ok(InteriorSpacing::Varying {
                    data: trimmed.into_data(),
                    cols,
                })
            }
        }
    }
}

impl From<f32> for Spacing {
    fn from(value: f32) -> Self {
        Self::Uniform(value)
    }
}

/// Spacing already trimmed to the interior of a data grid.
#[derive(Debug, Clone, PartialEq)]
pub enum InteriorSpacing {
    Uniform(f32),
    Varying { data: Vec<f32>, cols: usize },
}

impl InteriorSpacing {
    /// Spacing at interior cell (row, col), both counted from the first
    /// interior cell.
    #[inline]
    pub fn at(&self, row: usize, col: usize) -> f32 {
        match self {
            Self::Uniform(value) => *value,
            Self::Varying { data, cols } => data[row * cols + col],
        }
    }
}

/// Finite-difference weights at one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    /// `0.5 / dx`
    pub x: f32,
    /// `0.5 / dy`
    pub y: f32,
}

/// The four nearest neighbors of one interior cell, for every input grid.
pub struct Neighborhood<'a> {
    slabs: &'a [&'a [f32]],
    cols: usize,
    index: usize,
}

impl Neighborhood<'_> {
    #[inline]
    pub fn center(&self, input: usize) -> f32 {
        self.slabs[input][self.index]
    }

    /// Same row, previous column.
    #[inline]
    pub fn left(&self, input: usize) -> f32 {
        self.slabs[input][self.index - 1]
    }

    /// Same row, next column.
    #[inline]
    pub fn right(&self, input: usize) -> f32 {
        self.slabs[input][self.index + 1]
    }

    /// Previous row, same column.
    #[inline]
    pub fn above(&self, input: usize) -> f32 {
        self.slabs[input][self.index - self.cols]
    }

    /// Next row, same column.
    #[inline]
    pub fn below(&self, input: usize) -> f32 {
        self.slabs[input][self.index + self.cols]
    }
}

/// Evaluate a centered stencil over co-shaped grids.
///
/// Produces `N` output grids shaped like the inputs. The outermost row and
/// column on each side of every slab are [`MISSING`]; every interior cell
/// holds `kernel(neighborhood, weights)`. Slabs smaller than 3x3 have no
/// interior, so their outputs are entirely missing.
///
/// # Arguments
/// * `inputs` - Grids sharing one shape; indexed by position in the kernel
/// * `dx` - Spacing between columns
/// * `dy` - Spacing between rows
/// * `kernel` - Computes the `N` output values of one interior cell
pub fn edge_masked<const N: usize, F>(
    inputs: &[&Grid],
    dx: &Spacing,
    dy: &Spacing,
    mut kernel: F,
) -> Result<[Grid; N]>
where
    F: FnMut(&Neighborhood<'_>, Weights) -> [f32; N],
{
    let first = inputs
        .first()
        .ok_or_else(|| DerivParamError::invalid_argument("stencil needs at least one input"))?;
    for grid in &inputs[1..] {
        first.ensure_same_shape(grid)?;
    }

    let (rows, cols) = (first.rows(), first.cols());
    let dx = dx.interior(rows, cols)?;
    let dy = dy.interior(rows, cols)?;

    let mut outputs: [Vec<f32>; N] = std::array::from_fn(|_| vec![MISSING; first.len()]);

    if rows >= 3 && cols >= 3 {
        let slab_len = rows * cols;
        for slab in 0..first.num_slabs() {
            let offset = slab * slab_len;
            let slabs: Vec<&[f32]> = inputs
                .iter()
                .map(|grid| &grid.data()[offset..offset + slab_len])
                .collect();

            for row in 1..rows - 1 {
                for col in 1..cols - 1 {
                    let index = row * cols + col;
                    let weights = Weights {
                        x: 0.5 / dx.at(row - 1, col - 1),
                        y: 0.5 / dy.at(row - 1, col - 1),
                    };
                    let neighborhood = Neighborhood {
                        slabs: &slabs,
                        cols,
                        index,
                    };

                    let values = kernel(&neighborhood, weights);
                    for (output, value) in outputs.iter_mut().zip(values) {
                        output[offset + index] = value;
                    }
                }
            }
        }
    }

    Ok(outputs.map(|data| first.from_slabs(rows, cols, data)))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// x-derivative: (right - left) * 0.5 / dx
    fn ddx(grid: &Grid, dx: &Spacing) -> Result<Grid> {
        let [out] = edge_masked(&[grid], dx, &Spacing::Uniform(1.0), |n, w| {
            [(n.right(0) - n.left(0)) * w.x]
        })?;
        Ok(out)
    }

    fn ramp(rows: usize, cols: usize) -> Grid {
        let data = (0..rows * cols).map(|i| (i % cols) as f32 * 2.0).collect();
        Grid::from_2d(rows, cols, data).unwrap()
    }

    #[test]
    fn test_border_is_missing() {
        let out = ddx(&ramp(4, 5), &Spacing::Uniform(1.0)).unwrap();
        for col in 0..5 {
            assert!(out.get_2d(0, col).unwrap().is_nan());
            assert!(out.get_2d(3, col).unwrap().is_nan());
        }
        for row in 0..4 {
            assert!(out.get_2d(row, 0).unwrap().is_nan());
            assert!(out.get_2d(row, 4).unwrap().is_nan());
        }
        assert_eq!(out.count_missing(), 4 * 5 - 2 * 3);
    }

    #[test]
    fn test_interior_difference() {
        let out = ddx(&ramp(3, 4), &Spacing::Uniform(2.0)).unwrap();
        // (4 - 0) * 0.5 / 2
        assert_eq!(out.get_2d(1, 1), Some(1.0));
        assert_eq!(out.get_2d(1, 2), Some(1.0));
    }

    #[test]
    fn test_varying_spacing_is_trimmed() {
        let grid = ramp(3, 4);
        // only the interior cells (1,1) and (1,2) are read
        let spacing = Grid::from_2d(
            3,
            4,
            vec![
                9.0, 9.0, 9.0, 9.0, //
                9.0, 1.0, 4.0, 9.0, //
                9.0, 9.0, 9.0, 9.0,
            ],
        )
        .unwrap();
        let out = ddx(&grid, &Spacing::Varying(spacing)).unwrap();
        assert_eq!(out.get_2d(1, 1), Some(2.0));
        assert_eq!(out.get_2d(1, 2), Some(0.5));
    }

    #[test]
    fn test_varying_spacing_wrong_shape() {
        let spacing = Spacing::Varying(Grid::filled(&[1, 2], 1.0));
        let err = ddx(&ramp(3, 4), &spacing).unwrap_err();
        assert!(matches!(err, DerivParamError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_single_cell_spacing_grid_is_uniform() {
        let spacing = Spacing::from_grid(Grid::filled(&[1, 1], 3.0));
        assert_eq!(spacing, Spacing::Uniform(3.0));
        assert!(!Spacing::from_grid(Grid::filled(&[2, 2], 3.0)).is_uniform());
    }

    #[test]
    fn test_undersized_grid_is_all_missing() {
        let out = ddx(&ramp(2, 6), &Spacing::Uniform(1.0)).unwrap();
        assert_eq!(out.shape(), &[2, 6]);
        assert_eq!(out.count_missing(), 12);
    }

    #[test]
    fn test_missing_input_propagates() {
        let mut data = vec![1.0; 9];
        data[3] = MISSING;
        let grid = Grid::from_2d(3, 3, data).unwrap();
        let out = ddx(&grid, &Spacing::Uniform(1.0)).unwrap();
        assert!(out.get_2d(1, 1).unwrap().is_nan());
    }

    #[test]
    fn test_leading_axes_processed_per_slab() {
        let mut data = ramp(3, 3).into_data();
        data.extend(ramp(3, 3).map(|v| v * 10.0).into_data());
        let grid = Grid::new(vec![2, 3, 3], data).unwrap();
        let out = ddx(&grid, &Spacing::Uniform(1.0)).unwrap();
        assert_eq!(out.shape(), &[2, 3, 3]);
        assert_eq!(out.get(&[0, 1, 1]), Some(2.0));
        assert_eq!(out.get(&[1, 1, 1]), Some(20.0));
    }

    #[test]
    fn test_mismatched_inputs() {
        let a = Grid::filled(&[3, 3], 0.0);
        let b = Grid::filled(&[3, 4], 0.0);
        let result = edge_masked(
            &[&a, &b],
            &Spacing::Uniform(1.0),
            &Spacing::Uniform(1.0),
            |n, _| [n.center(0)],
        );
        assert!(result.is_err());
    }
}
