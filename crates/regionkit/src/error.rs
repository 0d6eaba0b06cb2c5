//! Error types for regionkit.

use thiserror::Error;

/// Errors raised by the region engine.
///
/// Geometry itself never fails: malformed rectangles are treated as empty and
/// absent operands as the empty region. Only programmer errors surface here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegionError {
    /// A numeric operator discriminant outside the known set.
    #[error("Invalid region operation discriminant: {0}")]
    InvalidOp(u8),

    /// An operator name that does not match any known operation.
    #[error("Unknown region operation: {0:?}")]
    UnknownOp(String),
}

/// Result alias for fallible regionkit calls.
pub type Result<T> = std::result::Result<T, RegionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_op_display() {
        let err = RegionError::InvalidOp(42);
        assert_eq!(err.to_string(), "Invalid region operation discriminant: 42");
    }

    #[test]
    fn test_unknown_op_display() {
        let err = RegionError::UnknownOp("blend".to_string());
        assert!(err.to_string().contains("Unknown region operation"));
        assert!(err.to_string().contains("\"blend\""));
    }

    #[test]
    fn test_region_error_debug() {
        let debug_str = format!("{:?}", RegionError::InvalidOp(7));
        assert!(debug_str.contains("InvalidOp"));
    }
}
