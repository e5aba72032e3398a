//! Error types for derived parameter functions.

use thiserror::Error;

/// Errors that can occur while evaluating a derived parameter function.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DerivParamError {
    /// Co-arguments of one call do not share a compatible shape.
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// A variadic function was called with no usable arguments.
    #[error("malformed call: {0}")]
    MalformedCall(String),

    /// An argument has the wrong type or an out-of-range value.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No function is registered under the requested name.
    #[error("unknown derived function: {0}")]
    UnknownFunction(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl DerivParamError {
    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(expected: &[usize], actual: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }

    /// Create a MalformedCall error.
    pub fn malformed_call(msg: impl Into<String>) -> Self {
        Self::MalformedCall(msg.into())
    }

    /// Create an InvalidArgument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create an UnknownFunction error.
    pub fn unknown_function(name: impl Into<String>) -> Self {
        Self::UnknownFunction(name.into())
    }
}

/// Result type for derived parameter operations.
pub type Result<T> = std::result::Result<T, DerivParamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_message() {
        let err = DerivParamError::shape_mismatch(&[3, 4], &[4, 3]);
        assert_eq!(err.to_string(), "shape mismatch: expected [3, 4], got [4, 3]");
    }

    #[test]
    fn test_helper_constructors() {
        assert!(matches!(
            DerivParamError::malformed_call("empty"),
            DerivParamError::MalformedCall(_)
        ));
        assert!(matches!(
            DerivParamError::unknown_function("Foo"),
            DerivParamError::UnknownFunction(ref name) if name == "Foo"
        ));
    }
}
