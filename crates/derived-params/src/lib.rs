//! Derived Meteorological Parameter Functions
//!
//! This crate provides pure computation units that turn loaded grids into
//! new derived fields, scalar or vector, for visualization and analysis:
//!
//! - **Vector algebra**: component (U, V) ⇄ magnitude/direction conversion
//! - **Edge-masked stencils**: centered finite differences with a missing border
//! - **Deformation**: stretching/shearing deformation of a vector field
//! - **World-wrap correction**: stencils that see across the longitude seam
//! - **Variadic addition**: one `Add` for scalar and vector operands
//!
//! # Architecture
//!
//! ```text
//! Evaluation engine
//!      │  name + Vec<Value> + EvalContext
//!      ▼
//! FunctionRegistry::execute
//!      │
//!      ├─► Add ─────────────────► addition::add ──► VectorField::from_components
//!      │
//!      └─► DeformationComponent ─► WorldWrap::apply
//!                                      │
//!                                      └─► stencil::edge_masked ──► VectorField
//! ```
//!
//! # Example
//!
//! ```
//! use derived_params::{deformation, Grid, Spacing, VectorField, WorldWrap};
//!
//! let ones = Grid::filled(&[5, 5], 1.0);
//! let wind = VectorField::from_components(ones.clone(), ones).unwrap();
//! let result = deformation(&wind, &Spacing::Uniform(1.0), &Spacing::Uniform(1.0), WorldWrap::Disabled).unwrap();
//!
//! assert!(result.u().get_2d(0, 0).unwrap().is_nan());
//! assert_eq!(result.v().get_2d(2, 2), Some(0.0));
//! ```

pub mod addition;
pub mod config;
pub mod deformation;
pub mod error;
pub mod functions;
pub mod grid;
pub mod registry;
pub mod stencil;
pub mod value;
pub mod vector;
pub mod world_wrap;

// Re-export commonly used types at crate root
pub use addition::add;
pub use config::DerivedParamConfig;
pub use deformation::deformation;
pub use error::{DerivParamError, Result};
pub use functions::{CeilingPressure, PressureToHeight, StandardAtmosphere};
pub use grid::{Grid, MISSING};
pub use registry::{Call, DerivedFunction, EvalContext, FunctionRegistry};
pub use stencil::{edge_masked, Spacing};
pub use value::Value;
pub use vector::{to_components, to_polar, VectorField};
pub use world_wrap::{StripColumns, WorldWrap};
