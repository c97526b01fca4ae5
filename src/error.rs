//! Configuration errors
//!
//! The simulation step is infallible; everything that can fail does so while
//! building a session or one of its entities.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A size, speed or count that must be strictly positive (and finite)
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("arena {width}x{height} cannot hold a {needed}px box")]
    ArenaTooSmall { width: f32, height: f32, needed: f32 },

    #[error("invalid settings: {0}")]
    Invalid(String),

    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Reject zero, negative, NaN and infinite values
pub(crate) fn ensure_positive(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive() {
        assert_eq!(ensure_positive("speed", 2.5).unwrap(), 2.5);
        assert!(ensure_positive("speed", 0.0).is_err());
        assert!(ensure_positive("speed", -1.0).is_err());
        assert!(ensure_positive("speed", f32::NAN).is_err());
        assert!(ensure_positive("speed", f32::INFINITY).is_err());
    }

    #[test]
    fn test_error_message_names_field() {
        let err = ensure_positive("bullet_speed", -3.0).unwrap_err();
        assert_eq!(err.to_string(), "bullet_speed must be positive and finite, got -3");
    }
}
