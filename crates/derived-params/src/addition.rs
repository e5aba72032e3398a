//! Scalar and vector addition with one polymorphic entry point.
//!
//! The evaluation engine treats addition as a single operator whether the
//! sub-expressions are scalar or vector valued, and may hand over either a
//! variadic argument list or one list of operands.

use crate::error::{DerivParamError, Result};
use crate::value::Value;
use crate::vector::VectorField;

/// Add any number of operands.
///
/// * A single [`Value::List`] argument is flattened into the argument list.
/// * If the first operand is a vector, every operand must be a vector and
///   the U and V components are summed separately.
/// * Otherwise grids and numbers are left-folded with `+`; numbers
///   broadcast across grids.
///
/// Missing cells propagate: a cell missing in any operand is missing in the
/// sum.
pub fn add(args: Vec<Value>) -> Result<Value> {
    let args = match <[Value; 1]>::try_from(args) {
        Ok([Value::List(inner)]) => return add(inner),
        Ok([single]) => vec![single],
        Err(args) => args,
    };

    match args.first() {
        None => Err(DerivParamError::malformed_call(
            "addition needs at least one operand",
        )),
        Some(Value::Vector(_)) => vector_addition(args),
        Some(_) => scalar_addition(args),
    }
}

fn scalar_addition(args: Vec<Value>) -> Result<Value> {
    let mut operands = args.into_iter();
    let mut sum = match operands.next() {
        Some(first) => check_scalar(first)?,
        None => return Err(DerivParamError::malformed_call("no operands")),
    };

    for operand in operands {
        sum = match (sum, check_scalar(operand)?) {
            (Value::Grid(mut a), Value::Grid(b)) => {
                a.add_assign(&b)?;
                Value::Grid(a)
            }
            (Value::Grid(a), Value::Number(n)) | (Value::Number(n), Value::Grid(a)) => {
                Value::Grid(a.map(|v| v + n))
            }
            (Value::Number(a), Value::Number(b)) => Value::Number(a + b),
            // check_scalar only lets grids and numbers through
            (a, b) => {
                return Err(DerivParamError::malformed_call(format!(
                    "cannot add {} and {}",
                    a.kind(),
                    b.kind()
                )))
            }
        };
    }

    Ok(sum)
}

fn check_scalar(value: Value) -> Result<Value> {
    match value {
        Value::Grid(_) | Value::Number(_) => Ok(value),
        other => Err(DerivParamError::malformed_call(format!(
            "cannot add a {} to a scalar sum",
            other.kind()
        ))),
    }
}

fn vector_addition(args: Vec<Value>) -> Result<Value> {
    let fields: Vec<VectorField> = args
        .into_iter()
        .map(|arg| match arg {
            Value::Vector(field) => Ok(field),
            other => Err(DerivParamError::malformed_call(format!(
                "cannot add a {} to a vector sum",
                other.kind()
            ))),
        })
        .collect::<Result<_>>()?;

    let Some(first) = fields.first() else {
        return Err(DerivParamError::malformed_call("no operands"));
    };
    let mut u_sum = first.u().zeros_like();
    let mut v_sum = first.u().zeros_like();

    for field in &fields {
        u_sum.add_assign(field.u())?;
        v_sum.add_assign(field.v())?;
    }

    Ok(Value::Vector(VectorField::from_components(u_sum, v_sum)?))
}
