//! Error types and handling for `TravelAI` itinerary generation

use thiserror::Error;

/// Main error type for the `TravelAI` itinerary pipeline
#[derive(Error, Debug)]
pub enum TravelAiError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// A place search query failed for a single category
    #[error("Provider fetch error for '{category}': {message}")]
    ProviderFetch { category: String, message: String },

    /// The generation model call failed (timeout, quota, network)
    #[error("Generation error: {message}")]
    Generation { message: String },

    /// Model output could not be recovered into valid JSON
    #[error("Parse failure: {message}")]
    Parse { message: String },

    /// Cooperative cancellation observed at a stage boundary
    #[error("Pipeline cancelled")]
    Cancelled,

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl TravelAiError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new provider fetch error scoped to one category
    pub fn provider_fetch<C: Into<String>, S: Into<String>>(category: C, message: S) -> Self {
        Self::ProviderFetch {
            category: category.into(),
            message: message.into(),
        }
    }

    /// Create a new generation error
    pub fn generation<S: Into<String>>(message: S) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Create a new parse failure
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TravelAiError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            TravelAiError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            TravelAiError::ProviderFetch { category, .. } => {
                format!("Could not load places for '{category}'. Results may be incomplete.")
            }
            TravelAiError::Generation { .. } => {
                "The itinerary generator is unavailable right now. A basic plan was returned."
                    .to_string()
            }
            TravelAiError::Parse { .. } => {
                "The generated itinerary could not be read. A basic plan was returned.".to_string()
            }
            TravelAiError::Cancelled => "Itinerary generation was cancelled.".to_string(),
            TravelAiError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = TravelAiError::config("missing diagnostics dir");
        assert!(matches!(config_err, TravelAiError::Config { .. }));

        let fetch_err = TravelAiError::provider_fetch("cafes", "connection failed");
        assert!(matches!(fetch_err, TravelAiError::ProviderFetch { .. }));

        let validation_err = TravelAiError::validation("empty destination");
        assert!(matches!(validation_err, TravelAiError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let fetch_err = TravelAiError::provider_fetch("cafes", "test");
        assert!(fetch_err.user_message().contains("cafes"));

        let generation_err = TravelAiError::generation("test");
        assert!(generation_err.user_message().contains("basic plan"));

        let validation_err = TravelAiError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let travel_err: TravelAiError = io_err.into();
        assert!(matches!(travel_err, TravelAiError::Io { .. }));
    }
}
