//! Deformation components of a 2-D vector field.
//!
//! Stretching (`dst`) and shearing (`dsh`) deformation are taken with the
//! edge-masked centered stencil and combined into a pair describing the
//! total deformation and the orientation of the axis of dilatation:
//!
//! ```text
//! dst  = (U[r,c-1] - U[r,c+1]) * qx + (V[r-1,c] - V[r+1,c]) * qy
//! dsh  = (U[r-1,c] - U[r+1,c]) * qx + (V[r,c+1] - V[r,c-1]) * qy
//! def  = sqrt(dst² + dsh²)
//! ans  = sqrt((def² + def * dst) / 2)
//! q    = def * dsh / (2 * ans)        where ans != 0
//!      = def                          where ans == 0
//! ```
//!
//! with `qx = 0.5 / dx` and `qy = 0.5 / dy`. The result is `(q, ans)` in
//! component form.

use crate::error::Result;
use crate::stencil::{edge_masked, Neighborhood, Spacing, Weights};
use crate::vector::VectorField;
use crate::world_wrap::WorldWrap;

const U: usize = 0;
const V: usize = 1;

/// Compute the deformation components of `field`.
///
/// # Arguments
/// * `field` - Wind (or other) vector field; at least 3x3 in the spatial
///   axes for any valid output
/// * `dx` - Spacing between columns (uniform or full-extent grid)
/// * `dy` - Spacing between rows (uniform or full-extent grid)
/// * `wrap` - World-wrap mode for global grids
///
/// # Returns
/// A vector field shaped like `field` with a missing border. Inputs smaller
/// than 3x3 give an all-missing result.
pub fn deformation(
    field: &VectorField,
    dx: &Spacing,
    dy: &Spacing,
    wrap: WorldWrap,
) -> Result<VectorField> {
    wrap.apply(&[field.u(), field.v()], &[dx, dy], |grids, spacings| {
        let [q, ans] = edge_masked(grids, spacings[0], spacings[1], deformation_kernel)?;
        VectorField::from_components(q, ans)
    })
}

fn deformation_kernel(n: &Neighborhood<'_>, w: Weights) -> [f32; 2] {
    let dst = (n.left(U) - n.right(U)) * w.x + (n.above(V) - n.below(V)) * w.y;
    let dsh = (n.above(U) - n.below(U)) * w.x + (n.right(V) - n.left(V)) * w.y;

    let def_sq = dst * dst + dsh * dsh;
    let def = def_sq.sqrt();
    let ans = ((def_sq + def * dst) / 2.0).sqrt();

    // no net stretch: report the magnitude instead of dividing by zero
    let q = if ans != 0.0 { def * dsh / (2.0 * ans) } else { def };

    [q, ans]
}
