//! Error types and result handling for value resolution.

use std::fmt;

/// Comprehensive error type for factory resolution failures
#[derive(Debug, Clone, PartialEq)]
pub enum FactoryError {
    /// A bounded generator was asked for an empty or inverted range
    InvalidRange { min: f64, max: f64 },

    /// A type-erased request reached the end of the resolution chain
    /// with no registration or customization claiming the type
    Unconstructible { type_name: &'static str },

    /// Collection-shaped types have no default synthesis; requesting one
    /// without a registration or customization always fails
    UnsupportedCollection { type_name: &'static str },

    /// Resolution recursed past the configured depth limit
    RecursionLimit {
        type_name: &'static str,
        limit: usize,
    },

    /// A registered producer returned a value of the wrong runtime type
    ProducerTypeMismatch { type_name: &'static str },

    /// Configuration error
    Config {
        message: String,
        field: Option<String>,
    },
}

impl fmt::Display for FactoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactoryError::InvalidRange { min, max } => {
                write!(f, "Invalid range: min {} must be less than max {}", min, max)
            }
            FactoryError::Unconstructible { type_name } => {
                write!(
                    f,
                    "Cannot construct `{}`: no registration or customization claims the type",
                    type_name
                )
            }
            FactoryError::UnsupportedCollection { type_name } => {
                write!(
                    f,
                    "Collection synthesis is unsupported for `{}`; register a producer for it",
                    type_name
                )
            }
            FactoryError::RecursionLimit { type_name, limit } => {
                write!(
                    f,
                    "Resolution of `{}` exceeded the depth limit of {}",
                    type_name, limit
                )
            }
            FactoryError::ProducerTypeMismatch { type_name } => {
                write!(
                    f,
                    "Producer registered for `{}` returned a value of a different type",
                    type_name
                )
            }
            FactoryError::Config { message, field } => {
                write!(f, "Configuration error: {}", message)?;
                if let Some(field_name) = field {
                    write!(f, " (field: {})", field_name)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for FactoryError {}

/// Result of a factory resolution
pub type FactoryResult<T> = Result<T, FactoryError>;

/// Helper functions for creating FactoryError instances with context
impl FactoryError {
    /// Create an invalid range error
    pub fn invalid_range(min: f64, max: f64) -> Self {
        Self::InvalidRange { min, max }
    }

    /// Create an unconstructible type error
    pub fn unconstructible(type_name: &'static str) -> Self {
        Self::Unconstructible { type_name }
    }

    /// Create an unsupported collection error for the named type
    pub fn unsupported_collection(type_name: &'static str) -> Self {
        Self::UnsupportedCollection { type_name }
    }

    /// Create a recursion limit error
    pub fn recursion_limit(type_name: &'static str, limit: usize) -> Self {
        Self::RecursionLimit { type_name, limit }
    }

    /// Create a producer type mismatch error
    pub fn producer_type_mismatch(type_name: &'static str) -> Self {
        Self::ProducerTypeMismatch { type_name }
    }

    /// Create a configuration error with field information
    pub fn config_error(message: impl Into<String>, field: Option<impl Into<String>>) -> Self {
        Self::Config {
            message: message.into(),
            field: field.map(|f| f.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_range_display() {
        let error = FactoryError::invalid_range(5.0, 5.0);
        assert_eq!(
            format!("{}", error),
            "Invalid range: min 5 must be less than max 5"
        );
    }

    #[test]
    fn test_unconstructible_display() {
        let error = FactoryError::unconstructible("my_crate::Widget");
        assert!(format!("{}", error).contains("my_crate::Widget"));
        assert!(format!("{}", error).contains("no registration"));
    }

    #[test]
    fn test_recursion_limit_display() {
        let error = FactoryError::recursion_limit("Loop", 32);
        assert_eq!(
            format!("{}", error),
            "Resolution of `Loop` exceeded the depth limit of 32"
        );
    }

    #[test]
    fn test_config_error_display() {
        let error = FactoryError::config_error("must be > 0", Some("max_depth"));
        assert_eq!(
            format!("{}", error),
            "Configuration error: must be > 0 (field: max_depth)"
        );

        let error = FactoryError::config_error("bad", None::<String>);
        assert_eq!(format!("{}", error), "Configuration error: bad");
    }
}
