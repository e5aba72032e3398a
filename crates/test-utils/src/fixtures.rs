//! Common test fixtures for derived parameter tests.
//!
//! Pre-defined grid shapes and spacings representing the grids derived
//! parameters are typically evaluated on.

/// Common grid shapes as `(rows, cols)`.
pub mod shapes {
    /// Global 1° lat/lon grid; wraps in longitude.
    pub const GLOBAL_1DEG: (usize, usize) = (181, 360);

    /// Global 10° lat/lon grid; small enough for exhaustive checks.
    pub const GLOBAL_10DEG: (usize, usize) = (19, 36);

    /// Regional grid; does not wrap.
    pub const REGIONAL: (usize, usize) = (48, 64);

    /// Smallest grid with one valid stencil cell.
    pub const MIN_STENCIL: (usize, usize) = (3, 3);

    /// Grids too small for any valid stencil cell.
    pub const UNDERSIZED: &[(usize, usize)] = &[(1, 1), (2, 2), (2, 5), (5, 2), (1, 7)];
}

/// Common grid spacings in metres.
pub mod spacing {
    /// One degree of latitude.
    pub const ONE_DEGREE_M: f32 = 111_195.0;

    /// HRRR 3 km Lambert conformal grid.
    pub const HRRR_M: f32 = 3000.0;
}

/// Pressure levels in hPa with standard-atmosphere heights in metres.
pub const STANDARD_LEVELS: &[(f32, f32)] = &[
    (1000.0, 111.0),
    (850.0, 1457.0),
    (700.0, 3011.0),
    (500.0, 5572.0),
    (300.0, 9160.0),
];
