//! Construction-time configuration errors.

use thiserror::Error;

/// Invalid construction parameters.
///
/// Raised once, before any grid is allocated or any controller is built.
/// Steady-state operations never produce this error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid grid dimensions: {width}x{height} (both must be > 0)")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Invalid '{name}': {value} (must be > 0)")]
    NotPositive { name: &'static str, value: f32 },
    #[error("Invalid '{name}': {value} (must be >= 0)")]
    Negative { name: &'static str, value: f32 },
    #[error("Invalid '{name}': {value} (must be finite)")]
    NotFinite { name: &'static str, value: f32 },
    #[error("Invalid '{name}': {value} (must be in {range})")]
    OutOfRange {
        name: &'static str,
        value: f32,
        range: &'static str,
    },
    #[error("Invalid octave count: {0} (must be >= 1)")]
    InvalidOctaves(u8),
    #[error("Invalid depth range: min ({0}) >= max ({1})")]
    InvalidDepthRange(f32, f32),
    #[error("Depth buffer length {got} does not match {width}x{height}")]
    BufferLength { got: usize, width: u32, height: u32 },
    #[error("Depth value {value} at cell {index} lies outside [{min}, {max}]")]
    DepthOutOfRange {
        index: usize,
        value: f32,
        min: f32,
        max: f32,
    },
}

/// Rejects NaN and infinities.
pub(crate) fn ensure_finite(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { name, value })
    }
}

/// Requires a finite, strictly positive value.
pub(crate) fn ensure_positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    ensure_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

/// Requires a finite, non-negative value.
pub(crate) fn ensure_non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    ensure_finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive() {
        assert!(ensure_positive("x", 1.0).is_ok());
        assert_eq!(
            ensure_positive("x", 0.0),
            Err(ConfigError::NotPositive { name: "x", value: 0.0 })
        );
        assert!(matches!(
            ensure_positive("x", f32::INFINITY),
            Err(ConfigError::NotFinite { .. })
        ));
    }

    #[test]
    fn test_ensure_non_negative() {
        assert!(ensure_non_negative("x", 0.0).is_ok());
        assert!(matches!(
            ensure_non_negative("x", -0.1),
            Err(ConfigError::Negative { name: "x", .. })
        ));
        assert!(ensure_non_negative("x", f32::NAN).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::InvalidDepthRange(10.0, 5.0);
        assert_eq!(err.to_string(), "Invalid depth range: min (10) >= max (5)");

        let err = ConfigError::InvalidDimensions { width: 0, height: 4 };
        assert!(err.to_string().contains("0x4"));
    }
}
