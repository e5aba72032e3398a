//! Shared test utilities for the derived-params workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Synthetic flow and scalar grid generators
//! - Grid shape and spacing fixtures
//! - Approximate-equality assertions that treat missing (NaN) cells as equal
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{assert_slice_approx_eq, create_rotation_flow};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Macro for approximate equality of two `f32` slices.
///
/// Cells that are NaN on both sides are equal; NaN on only one side fails.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_slice_approx_eq;
///
/// assert_slice_approx_eq!(&[1.0, f32::NAN], &[1.00001, f32::NAN], 1e-3);
/// ```
#[macro_export]
macro_rules! assert_slice_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: &[f32] = $left;
        let right: &[f32] = $right;
        let epsilon: f32 = $epsilon;
        assert_eq!(
            left.len(),
            right.len(),
            "assertion failed: slices differ in length"
        );
        for (i, (&l, &r)) in left.iter().zip(right.iter()).enumerate() {
            let equal = if l.is_nan() || r.is_nan() {
                l.is_nan() && r.is_nan()
            } else {
                (l - r).abs() <= epsilon
            };
            if !equal {
                panic!(
                    "assertion failed: `(left ≈ right)` at index {}\n  left: `{:?}`,\n right: `{:?}`",
                    i, l, r
                );
            }
        }
    }};
}
