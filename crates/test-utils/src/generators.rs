//! Test data generators for creating synthetic meteorological fields.
//!
//! All generators return row-major `Vec<f32>` data, row 0 first. Flow
//! generators treat row 0 as the northern edge (north-up grids), so "y"
//! increases as the row index decreases.

use crate::fixtures::spacing::ONE_DEGREE_M;

/// Creates a grid filled with a constant value.
pub fn create_constant_grid(width: usize, height: usize, value: f32) -> Vec<f32> {
    vec![value; width * height]
}

/// Creates a grid with NaN values at specified (col, row) positions and
/// `fill` elsewhere.
pub fn create_grid_with_nans(
    width: usize,
    height: usize,
    fill: f32,
    nan_positions: &[(usize, usize)],
) -> Vec<f32> {
    let mut data = vec![fill; width * height];
    for &(col, row) in nan_positions {
        if col < width && row < height {
            data[row * width + col] = f32::NAN;
        }
    }
    data
}

/// Solid-body rotation about the grid center: `u = -y`, `v = x`.
///
/// A rigid rotation has no deformation.
pub fn create_rotation_flow(width: usize, height: usize) -> (Vec<f32>, Vec<f32>) {
    flow(width, height, |x, y| (-y, x))
}

/// Pure divergence from the grid center: `u = x`, `v = y`.
///
/// Isotropic expansion has no deformation.
pub fn create_divergent_flow(width: usize, height: usize) -> (Vec<f32>, Vec<f32>) {
    flow(width, height, |x, y| (x, y))
}

/// Pure stretching along x: `u = x`, `v = -y`.
pub fn create_stretching_flow(width: usize, height: usize) -> (Vec<f32>, Vec<f32>) {
    flow(width, height, |x, y| (x, -y))
}

fn flow(
    width: usize,
    height: usize,
    f: impl Fn(f32, f32) -> (f32, f32),
) -> (Vec<f32>, Vec<f32>) {
    let center_x = (width as f32 - 1.0) / 2.0;
    let center_y = (height as f32 - 1.0) / 2.0;

    let mut u = Vec::with_capacity(width * height);
    let mut v = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let x = col as f32 - center_x;
            let y = center_y - row as f32;
            let (cu, cv) = f(x, y);
            u.push(cu);
            v.push(cv);
        }
    }
    (u, v)
}

/// A field periodic in the column direction, as on a global lat/lon grid.
///
/// One full wave spans `width` columns; amplitude varies by row.
pub fn create_zonal_wave(width: usize, height: usize, amplitude: f32) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        let row_amplitude = amplitude * (1.0 + row as f32 / height.max(1) as f32);
        for col in 0..width {
            let phase = col as f32 / width as f32 * std::f32::consts::PI * 2.0;
            data.push(row_amplitude * phase.sin());
        }
    }
    data
}

/// Deterministic pseudo-random values in `[-scale, scale)`.
pub fn create_noise_grid(width: usize, height: usize, scale: f32, seed: u32) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let hash = simple_hash(col as u32, row as u32, seed);
            let unit = (hash % 10_000) as f32 / 10_000.0;
            data.push((unit * 2.0 - 1.0) * scale);
        }
    }
    data
}

/// Simple deterministic hash for reproducible test data.
fn simple_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h = h.wrapping_mul(31).wrapping_add(y);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}

/// Grid spacing in metres of a regular lat/lon grid, per cell.
///
/// Returns `(dx, dy)`; `dx` shrinks with the cosine of latitude. Row 0 is
/// at `first_lat`, rows step south by `step_deg`.
pub fn create_latlon_spacing(
    width: usize,
    height: usize,
    first_lat: f32,
    step_deg: f32,
) -> (Vec<f32>, Vec<f32>) {
    let mut dx = Vec::with_capacity(width * height);
    let mut dy = Vec::with_capacity(width * height);
    for row in 0..height {
        let lat = (first_lat - row as f32 * step_deg).to_radians();
        for _col in 0..width {
            dx.push(ONE_DEGREE_M * step_deg * lat.cos().max(1e-3));
            dy.push(ONE_DEGREE_M * step_deg);
        }
    }
    (dx, dy)
}
