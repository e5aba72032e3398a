//! World-wrap correction for stencil operators on cyclic longitude grids.
//!
//! On a global grid the leftmost and rightmost columns are neighbors. A
//! centered stencil run on the raw grid cannot see across that seam and
//! leaves both edge columns missing. [`WorldWrap::apply`] pads each input
//! with columns copied from the opposite edge, runs the operator, and
//! strips the padding from the result:
//!
//! ```text
//!   original         extended (columns = 1)        result
//!   a b c d    ->    d | a b c d | a       ->      a' b' c' d'
//! ```

use tracing::trace;

use crate::error::{DerivParamError, Result};
use crate::grid::Grid;
use crate::stencil::Spacing;
use crate::vector::VectorField;

/// Whether, and by how much, to extend grids across the longitude seam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorldWrap {
    /// Grid is not global; operators run unchanged.
    #[default]
    Disabled,
    /// Grid wraps in longitude; pad `columns` columns on each side.
    Cyclic { columns: usize },
}

impl WorldWrap {
    /// Build from the engine's per-invocation wrap flag.
    pub fn from_flag(world_wrapped: bool, columns: usize) -> Self {
        if world_wrapped && columns > 0 {
            Self::Cyclic { columns }
        } else {
            Self::Disabled
        }
    }

    /// Number of padding columns on each side.
    pub fn columns(&self) -> usize {
        match self {
            Self::Disabled => 0,
            Self::Cyclic { columns } => *columns,
        }
    }

    /// Run a stencil-shaped operator with world-wrap correction.
    ///
    /// Every grid in `grids` and every varying spacing in `spacings` is
    /// extended before `op` runs; the result is stripped back to the
    /// original column count. When disabled, `op` sees the inputs as given.
    pub fn apply<T, F>(&self, grids: &[&Grid], spacings: &[&Spacing], op: F) -> Result<T>
    where
        T: StripColumns,
        F: FnOnce(&[&Grid], &[&Spacing]) -> Result<T>,
    {
        let columns = self.columns();
        if columns == 0 {
            return op(grids, spacings);
        }

        let extended: Vec<Grid> = grids
            .iter()
            .map(|grid| extend_columns(grid, columns))
            .collect::<Result<_>>()?;
        let extended_spacings: Vec<Spacing> = spacings
            .iter()
            .map(|spacing| match spacing {
                Spacing::Uniform(value) => Ok(Spacing::Uniform(*value)),
                Spacing::Varying(grid) => extend_columns(grid, columns).map(Spacing::Varying),
            })
            .collect::<Result<_>>()?;

        trace!(
            columns,
            grids = extended.len(),
            "extended inputs across world wrap seam"
        );

        let grid_refs: Vec<&Grid> = extended.iter().collect();
        let spacing_refs: Vec<&Spacing> = extended_spacings.iter().collect();
        op(&grid_refs, &spacing_refs)?.strip_columns(columns)
    }
}

/// Results that can be trimmed back after a world-wrap extension.
pub trait StripColumns: Sized {
    /// Remove `n` columns from both sides of every slab.
    fn strip_columns(self, n: usize) -> Result<Self>;
}

impl StripColumns for Grid {
    fn strip_columns(self, n: usize) -> Result<Self> {
        strip_columns(&self, n)
    }
}

impl StripColumns for VectorField {
    fn strip_columns(self, n: usize) -> Result<Self> {
        let (u, v) = self.into_components();
        VectorField::from_components(strip_columns(&u, n)?, strip_columns(&v, n)?)
    }
}

/// Pad every row with `n` columns copied from the opposite edge.
pub fn extend_columns(grid: &Grid, n: usize) -> Result<Grid> {
    let (rows, cols) = (grid.rows(), grid.cols());
    if n > cols {
        return Err(DerivParamError::invalid_argument(format!(
            "cannot wrap {} columns of a grid {} columns wide",
            n, cols
        )));
    }

    let new_cols = cols + 2 * n;
    let mut data = Vec::with_capacity(grid.num_slabs() * rows * new_cols);
    for slab in grid.slabs() {
        for row in slab.chunks_exact(cols.max(1)).take(rows) {
            data.extend_from_slice(&row[cols - n..]);
            data.extend_from_slice(row);
            data.extend_from_slice(&row[..n]);
        }
    }

    Ok(grid.from_slabs(rows, new_cols, data))
}

/// Remove `n` columns from both sides of every row.
pub fn strip_columns(grid: &Grid, n: usize) -> Result<Grid> {
    let (rows, cols) = (grid.rows(), grid.cols());
    if 2 * n > cols {
        return Err(DerivParamError::invalid_argument(format!(
            "cannot strip {} columns from each side of a grid {} columns wide",
            n, cols
        )));
    }

    let new_cols = cols - 2 * n;
    let mut data = Vec::with_capacity(grid.num_slabs() * rows * new_cols);
    for slab in grid.slabs() {
        for row in slab.chunks_exact(cols.max(1)).take(rows) {
            data.extend_from_slice(&row[n..cols - n]);
        }
    }

    Ok(grid.from_slabs(rows, new_cols, data))
}
