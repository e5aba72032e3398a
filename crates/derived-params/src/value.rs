//! Tagged arguments and results of derived functions.

use crate::error::{DerivParamError, Result};
use crate::grid::Grid;
use crate::stencil::Spacing;
use crate::vector::VectorField;

/// A value passed to or returned from a derived function.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Scalar field.
    Grid(Grid),
    /// Vector field in component form.
    Vector(VectorField),
    /// Constant, broadcast against grids.
    Number(f32),
    /// Ordered sequence of values, as produced by list-valued sub-expressions.
    List(Vec<Value>),
}

impl Value {
    /// Short name of the variant, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Grid(_) => "grid",
            Self::Vector(_) => "vector",
            Self::Number(_) => "number",
            Self::List(_) => "list",
        }
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, Self::Vector(_))
    }

    pub fn into_grid(self) -> Result<Grid> {
        match self {
            Self::Grid(grid) => Ok(grid),
            other => Err(expected("grid", &other)),
        }
    }

    pub fn into_vector(self) -> Result<VectorField> {
        match self {
            Self::Vector(field) => Ok(field),
            other => Err(expected("vector", &other)),
        }
    }

    pub fn into_number(self) -> Result<f32> {
        match self {
            Self::Number(value) => Ok(value),
            Self::Grid(grid) if grid.len() == 1 => Ok(grid.data()[0]),
            other => Err(expected("number", &other)),
        }
    }

    /// Interpret as a grid spacing: a constant or a full-extent grid.
    pub fn into_spacing(self) -> Result<Spacing> {
        match self {
            Self::Number(value) => Ok(Spacing::Uniform(value)),
            Self::Grid(grid) => Ok(Spacing::from_grid(grid)),
            other => Err(expected("spacing", &other)),
        }
    }
}

fn expected(what: &str, got: &Value) -> DerivParamError {
    DerivParamError::invalid_argument(format!("expected {}, got {}", what, got.kind()))
}

impl From<Grid> for Value {
    fn from(grid: Grid) -> Self {
        Self::Grid(grid)
    }
}

impl From<VectorField> for Value {
    fn from(field: VectorField) -> Self {
        Self::Vector(field)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Number(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Self::List(values)
    }
}
