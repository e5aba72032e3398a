//! Vector field algebra.
//!
//! The only place that converts between component (U, V) and polar
//! (magnitude, direction) form. Directions are in degrees using the
//! meteorological convention: the direction the flow comes FROM, with
//! 0° = north and angles increasing clockwise, normalized to [0, 360).

use crate::error::Result;
use crate::grid::Grid;

/// A 2-D vector at every cell: a pair of co-shaped U and V grids.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorField {
    u: Grid,
    v: Grid,
}

impl VectorField {
    /// Pair two component grids into a vector field.
    ///
    /// Every operator producing a two-grid result goes through this
    /// constructor.
    pub fn from_components(u: Grid, v: Grid) -> Result<Self> {
        u.ensure_same_shape(&v)?;
        Ok(Self { u, v })
    }

    pub fn u(&self) -> &Grid {
        &self.u
    }

    pub fn v(&self) -> &Grid {
        &self.v
    }

    pub fn shape(&self) -> &[usize] {
        self.u.shape()
    }

    pub fn into_components(self) -> (Grid, Grid) {
        (self.u, self.v)
    }
}

/// Convert a single U/V pair to (magnitude, direction in degrees FROM).
pub fn uv_to_speed_direction(u: f32, v: f32) -> (f32, f32) {
    let speed = (u * u + v * v).sqrt();
    if speed == 0.0 {
        // calm: direction is undefined, report north
        return (speed, 0.0);
    }

    // 0° = from north (v < 0), 90° = from east (u < 0)
    let mut direction = (-u).atan2(-v).to_degrees();
    if direction < 0.0 {
        direction += 360.0;
    }
    if direction >= 360.0 {
        direction -= 360.0;
    }

    (speed, direction)
}

/// Convert a single (magnitude, direction in degrees FROM) pair to U/V.
pub fn speed_direction_to_uv(speed: f32, direction: f32) -> (f32, f32) {
    let rad = direction.to_radians();
    (-speed * rad.sin(), -speed * rad.cos())
}

/// Build a vector field from magnitude and direction grids.
pub fn to_components(magnitude: &Grid, direction: &Grid) -> Result<VectorField> {
    magnitude.ensure_same_shape(direction)?;

    let (u, v): (Vec<f32>, Vec<f32>) = magnitude
        .data()
        .iter()
        .zip(direction.data())
        .map(|(&m, &d)| speed_direction_to_uv(m, d))
        .unzip();

    let (rows, cols) = (magnitude.rows(), magnitude.cols());
    VectorField::from_components(
        magnitude.from_slabs(rows, cols, u),
        magnitude.from_slabs(rows, cols, v),
    )
}

/// Split a vector field into magnitude and direction grids.
pub fn to_polar(field: &VectorField) -> (Grid, Grid) {
    let (magnitude, direction): (Vec<f32>, Vec<f32>) = field
        .u
        .data()
        .iter()
        .zip(field.v.data())
        .map(|(&u, &v)| uv_to_speed_direction(u, v))
        .unzip();

    let (rows, cols) = (field.u.rows(), field.u.cols());
    (
        field.u.from_slabs(rows, cols, magnitude),
        field.u.from_slabs(rows, cols, direction),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_north_wind() {
        let (speed, dir) = uv_to_speed_direction(0.0, -10.0);
        assert!((speed - 10.0).abs() < 1e-5);
        assert!(dir.abs() < 1e-4, "wind from north should be 0°, got {}", dir);
    }

    #[test]
    fn test_east_and_west_wind() {
        let (_, dir) = uv_to_speed_direction(-10.0, 0.0);
        assert!((dir - 90.0).abs() < 1e-4);

        let (_, dir) = uv_to_speed_direction(10.0, 0.0);
        assert!((dir - 270.0).abs() < 1e-4);
    }

    #[test]
    fn test_south_wind() {
        let (_, dir) = uv_to_speed_direction(0.0, 10.0);
        assert!((dir - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_calm_has_zero_direction() {
        assert_eq!(uv_to_speed_direction(0.0, 0.0), (0.0, 0.0));
    }

    #[test]
    fn test_missing_propagates() {
        let (speed, dir) = uv_to_speed_direction(f32::NAN, 1.0);
        assert!(speed.is_nan());
        assert!(dir.is_nan());
    }

    #[test]
    fn test_speed_direction_to_uv() {
        let (u, v) = speed_direction_to_uv(10.0, 90.0);
        assert!((u + 10.0).abs() < 1e-4);
        assert!(v.abs() < 1e-4);
    }

    #[test]
    fn test_from_components_shape_mismatch() {
        let u = Grid::filled(&[2, 2], 1.0);
        let v = Grid::filled(&[2, 3], 1.0);
        assert!(VectorField::from_components(u, v).is_err());
    }

    #[test]
    fn test_grid_roundtrip() {
        let u = Grid::from_2d(2, 2, vec![3.0, -4.0, 0.5, -7.25]).unwrap();
        let v = Grid::from_2d(2, 2, vec![4.0, 3.0, -2.0, -1.0]).unwrap();
        let field = VectorField::from_components(u.clone(), v.clone()).unwrap();

        let (mag, dir) = to_polar(&field);
        assert!((mag.data()[0] - 5.0).abs() < 1e-5);

        let back = to_components(&mag, &dir).unwrap();
        for i in 0..4 {
            assert!((back.u().data()[i] - u.data()[i]).abs() < 1e-4);
            assert!((back.v().data()[i] - v.data()[i]).abs() < 1e-4);
        }
    }
}
