//! Error types for the travel planner service

use thiserror::Error;

/// Main error type for the travel planner
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Upstream data source errors (Overpass, Open-Meteo, routing)
    #[error("Upstream error: {message}")]
    Upstream { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Requested city is not in the coordinate table
    #[error("Coordinates not found for {city}")]
    UnknownCity { city: String },

    /// Nothing survived the POI fetch and dedup
    #[error("No attractions found for {city}")]
    NoAttractions { city: String },
}

impl PlannerError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn unknown_city<S: Into<String>>(city: S) -> Self {
        Self::UnknownCity { city: city.into() }
    }

    pub fn no_attractions<S: Into<String>>(city: S) -> Self {
        Self::NoAttractions { city: city.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = PlannerError::config("missing cities table");
        assert!(matches!(config_err, PlannerError::Config { .. }));

        let upstream_err = PlannerError::upstream("connection failed");
        assert!(matches!(upstream_err, PlannerError::Upstream { .. }));

        let validation_err = PlannerError::validation("days must be at least 1");
        assert!(matches!(validation_err, PlannerError::Validation { .. }));
    }

    #[test]
    fn test_caller_visible_messages() {
        let err = PlannerError::unknown_city("Atlantis");
        assert_eq!(err.to_string(), "Coordinates not found for Atlantis");

        let err = PlannerError::no_attractions("Paris");
        assert_eq!(err.to_string(), "No attractions found for Paris");
    }
}
