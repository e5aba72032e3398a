//! Simpler derived functions over station and column data.

use crate::error::{DerivParamError, Result};
use crate::grid::Grid;

/// Feet per metre.
pub const FEET_PER_METER: f32 = 3.2808399;

/// Pressure-to-height conversion supplied by a thermodynamics library.
pub trait PressureToHeight: Send + Sync {
    /// Height in metres of the given pressure level in hPa.
    fn pressure_to_height(&self, pressure_hpa: f32) -> f32;
}

/// ICAO standard atmosphere below the tropopause.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardAtmosphere;

impl StandardAtmosphere {
    const SEA_LEVEL_HPA: f32 = 1013.25;
    const SCALE_HEIGHT_M: f32 = 44307.69;
    const EXPONENT: f32 = 0.190284;
}

impl PressureToHeight for StandardAtmosphere {
    fn pressure_to_height(&self, pressure_hpa: f32) -> f32 {
        Self::SCALE_HEIGHT_M * (1.0 - (pressure_hpa / Self::SEA_LEVEL_HPA).powf(Self::EXPONENT))
    }
}

/// Picks the cloud ceiling pressure of a station from its reported cloud
/// layers.
pub trait CeilingPressure: Send + Sync {
    /// Ceiling pressure in hPa from the present-cloud pressure and the low,
    /// middle and high cloud reports.
    fn ceiling_pressure(&self, present: f32, low: f32, mid: f32, high: f32) -> f32;
}

/// Standard-atmosphere height of each pressure value, scaled by four.
pub fn scaled_pressure_height(pressure: &Grid, atmosphere: &dyn PressureToHeight) -> Grid {
    pressure.map(|p| atmosphere.pressure_to_height(p) * 4.0)
}

/// Standard-atmosphere height of each station's cloud ceiling.
///
/// All four cloud grids must share one shape.
pub fn ceiling_height(
    present: &Grid,
    low: &Grid,
    mid: &Grid,
    high: &Grid,
    ceiling: &dyn CeilingPressure,
    atmosphere: &dyn PressureToHeight,
) -> Result<Grid> {
    for other in [low, mid, high] {
        present.ensure_same_shape(other)?;
    }

    let data = present
        .data()
        .iter()
        .zip(low.data())
        .zip(mid.data())
        .zip(high.data())
        .map(|(((&p, &l), &m), &h)| {
            atmosphere.pressure_to_height(ceiling.ceiling_pressure(p, l, m, h))
        })
        .collect();

    Grid::new(present.shape().to_vec(), data)
}

/// Prepend a surface value to each column of level data.
///
/// `levels` has shape `(n, k)` and `surface` holds `n` values; the result
/// has shape `(n, k + 1)` with `surface` in the first column.
pub fn prepend_surface_level(levels: &Grid, surface: &Grid) -> Result<Grid> {
    if levels.rank() != 2 {
        return Err(DerivParamError::invalid_argument(format!(
            "level data must be 2-D, got shape {:?}",
            levels.shape()
        )));
    }
    let (n, k) = (levels.rows(), levels.cols());
    if surface.len() != n {
        return Err(DerivParamError::shape_mismatch(&[n], surface.shape()));
    }

    let mut data = Vec::with_capacity(n * (k + 1));
    for (row, &value) in levels.data().chunks_exact(k.max(1)).zip(surface.data()) {
        data.push(value);
        data.extend_from_slice(&row[..k]);
    }
    // k == 0 leaves no level chunks to pair with
    if k == 0 {
        data.extend_from_slice(surface.data());
    }

    Grid::from_2d(n, k + 1, data)
}

/// Height in feet of one sky layer base above sea level.
///
/// `sky_layer_base` has shape `(n, layers)`; `elevation_m` holds the `n`
/// station elevations in metres.
pub fn sky_layer_height_ft(sky_layer_base: &Grid, elevation_m: &Grid, index: usize) -> Result<Grid> {
    if sky_layer_base.rank() != 2 {
        return Err(DerivParamError::invalid_argument(format!(
            "sky layer data must be 2-D, got shape {:?}",
            sky_layer_base.shape()
        )));
    }
    let (n, layers) = (sky_layer_base.rows(), sky_layer_base.cols());
    if index >= layers {
        return Err(DerivParamError::invalid_argument(format!(
            "sky layer index {} out of range for {} layers",
            index, layers
        )));
    }
    if elevation_m.len() != n {
        return Err(DerivParamError::shape_mismatch(&[n], elevation_m.shape()));
    }

    let data = sky_layer_base
        .data()
        .chunks_exact(layers)
        .zip(elevation_m.data())
        .map(|(row, &elevation)| row[index] + elevation * FEET_PER_METER)
        .collect();

    Grid::new(vec![n], data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_atmosphere() {
        let atmosphere = StandardAtmosphere;
        assert!(atmosphere.pressure_to_height(1013.25).abs() < 1e-3);
        let h500 = atmosphere.pressure_to_height(500.0);
        assert!((h500 - 5574.0).abs() < 5.0, "500 hPa should be near 5574 m, got {}", h500);
    }

    #[test]
    fn test_scaled_pressure_height_at_sea_level() {
        let pressure = Grid::filled(&[1, 2], 1013.25);
        let height = scaled_pressure_height(&pressure, &StandardAtmosphere);
        assert!(height.data().iter().all(|h| h.abs() < 1e-2));
    }

    struct LowestLayer;

    impl CeilingPressure for LowestLayer {
        fn ceiling_pressure(&self, present: f32, low: f32, _mid: f32, _high: f32) -> f32 {
            present.max(low)
        }
    }

    #[test]
    fn test_ceiling_height() {
        let present = Grid::new(vec![2], vec![1013.25, 500.0]).unwrap();
        let low = Grid::new(vec![2], vec![900.0, 400.0]).unwrap();
        let blank = Grid::filled(&[2], 0.0);
        let heights =
            ceiling_height(&present, &low, &blank, &blank, &LowestLayer, &StandardAtmosphere)
                .unwrap();
        assert_eq!(heights.shape(), &[2]);
        assert!(heights.data()[0].abs() < 1e-2);
        assert!((heights.data()[1] - 5574.0).abs() < 5.0);
    }

    #[test]
    fn test_ceiling_height_shape_mismatch() {
        let present = Grid::filled(&[2], 800.0);
        let short = Grid::filled(&[1], 800.0);
        assert!(matches!(
            ceiling_height(&present, &short, &present, &present, &LowestLayer, &StandardAtmosphere),
            Err(DerivParamError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_prepend_surface_level() {
        let levels = Grid::from_2d(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let surface = Grid::new(vec![2], vec![10.0, 30.0]).unwrap();
        let joined = prepend_surface_level(&levels, &surface).unwrap();
        assert_eq!(joined.shape(), &[2, 3]);
        assert_eq!(joined.data(), &[10.0, 1.0, 2.0, 30.0, 3.0, 4.0]);
    }

    #[test]
    fn test_prepend_surface_level_mismatch() {
        let levels = Grid::filled(&[3, 2], 0.0);
        let surface = Grid::filled(&[2], 0.0);
        assert!(matches!(
            prepend_surface_level(&levels, &surface),
            Err(DerivParamError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_sky_layer_height() {
        let bases = Grid::from_2d(2, 3, vec![1000.0, 2000.0, 3000.0, 500.0, 600.0, 700.0]).unwrap();
        let elevation = Grid::new(vec![2], vec![0.0, 100.0]).unwrap();
        let heights = sky_layer_height_ft(&bases, &elevation, 1).unwrap();
        assert_eq!(heights.shape(), &[2]);
        assert_eq!(heights.data()[0], 2000.0);
        assert!((heights.data()[1] - (600.0 + 328.08399)).abs() < 1e-2);
    }

    #[test]
    fn test_sky_layer_index_out_of_range() {
        let bases = Grid::filled(&[2, 3], 0.0);
        let elevation = Grid::filled(&[2], 0.0);
        assert!(sky_layer_height_ft(&bases, &elevation, 3).is_err());
    }
}
