//! Configuration management for `TravelAI` itinerary generation
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TravelAiError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `TravelAI` itinerary pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelAiConfig {
    /// External provider call configuration
    pub providers: ProvidersConfig,
    /// Place catalog filtering configuration
    pub catalog: CatalogConfig,
    /// Prompt composition configuration
    pub prompt: PromptConfig,
    /// Parse-failure diagnostics configuration
    pub diagnostics: DiagnosticsConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Timeouts for external provider calls, in seconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// Timeout for a single place search query
    #[serde(default = "default_search_timeout")]
    pub search_timeout_seconds: u32,
    /// Timeout for the weather call
    #[serde(default = "default_weather_timeout")]
    pub weather_timeout_seconds: u32,
    /// Timeout for the generation model call
    #[serde(default = "default_generation_timeout")]
    pub generation_timeout_seconds: u32,
}

/// Place catalog filtering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Minimum rating for hotel candidates
    #[serde(default = "default_min_rating_hotels")]
    pub min_rating_hotels: f32,
    /// Minimum rating for restaurant candidates
    #[serde(default = "default_min_rating_food")]
    pub min_rating_restaurants: f32,
    /// Minimum rating for cafe candidates
    #[serde(default = "default_min_rating_food")]
    pub min_rating_cafes: f32,
    /// Minimum rating for attraction candidates
    #[serde(default = "default_min_rating_attractions")]
    pub min_rating_attractions: f32,
    /// Minimum rating for interest-derived candidates
    #[serde(default = "default_min_rating_interests")]
    pub min_rating_interests: f32,
}

/// Prompt shortlist sizing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Candidates per category offered to the model for a short trip
    #[serde(default = "default_prompt_base_candidates")]
    pub base_candidates_per_category: u32,
    /// Upper bound on candidates per category regardless of trip length
    #[serde(default = "default_prompt_max_candidates")]
    pub max_candidates_per_category: u32,
}

/// Parse-failure diagnostics settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    /// Whether to write parse-failure artifacts at all
    #[serde(default = "default_diagnostics_enabled")]
    pub enabled: bool,
    /// Directory for parse-failure artifacts
    #[serde(default = "default_diagnostics_dir")]
    pub directory: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_search_timeout() -> u32 {
    20
}

fn default_weather_timeout() -> u32 {
    15
}

fn default_generation_timeout() -> u32 {
    90
}

fn default_min_rating_hotels() -> f32 {
    3.5
}

fn default_min_rating_food() -> f32 {
    4.0
}

fn default_min_rating_attractions() -> f32 {
    4.0
}

fn default_min_rating_interests() -> f32 {
    3.5
}

fn default_prompt_base_candidates() -> u32 {
    5
}

fn default_prompt_max_candidates() -> u32 {
    8
}

fn default_diagnostics_enabled() -> bool {
    true
}

fn default_diagnostics_dir() -> String {
    "~/.cache/travelai/diagnostics".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for TravelAiConfig {
    fn default() -> Self {
        Self {
            providers: ProvidersConfig {
                search_timeout_seconds: default_search_timeout(),
                weather_timeout_seconds: default_weather_timeout(),
                generation_timeout_seconds: default_generation_timeout(),
            },
            catalog: CatalogConfig {
                min_rating_hotels: default_min_rating_hotels(),
                min_rating_restaurants: default_min_rating_food(),
                min_rating_cafes: default_min_rating_food(),
                min_rating_attractions: default_min_rating_attractions(),
                min_rating_interests: default_min_rating_interests(),
            },
            prompt: PromptConfig {
                base_candidates_per_category: default_prompt_base_candidates(),
                max_candidates_per_category: default_prompt_max_candidates(),
            },
            diagnostics: DiagnosticsConfig {
                enabled: default_diagnostics_enabled(),
                directory: default_diagnostics_dir(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
                format: default_log_format(),
            },
        }
    }
}

impl TravelAiConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from("config.toml"));

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Add environment variable overrides with TRAVELAI_ prefix
        builder = builder.add_source(
            Environment::with_prefix("TRAVELAI")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: TravelAiConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // Apply defaults for missing values
        config.apply_defaults();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.providers.search_timeout_seconds == 0 {
            self.providers.search_timeout_seconds = default_search_timeout();
        }
        if self.providers.weather_timeout_seconds == 0 {
            self.providers.weather_timeout_seconds = default_weather_timeout();
        }
        if self.providers.generation_timeout_seconds == 0 {
            self.providers.generation_timeout_seconds = default_generation_timeout();
        }
        if self.prompt.base_candidates_per_category == 0 {
            self.prompt.base_candidates_per_category = default_prompt_base_candidates();
        }
        if self.prompt.max_candidates_per_category == 0 {
            self.prompt.max_candidates_per_category = default_prompt_max_candidates();
        }
        if self.diagnostics.directory.is_empty() {
            self.diagnostics.directory = default_diagnostics_dir();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.providers.search_timeout_seconds > 300 {
            return Err(TravelAiError::config(
                "Place search timeout cannot exceed 300 seconds",
            )
            .into());
        }

        if self.providers.weather_timeout_seconds > 300 {
            return Err(TravelAiError::config("Weather timeout cannot exceed 300 seconds").into());
        }

        if self.providers.generation_timeout_seconds > 600 {
            return Err(
                TravelAiError::config("Generation timeout cannot exceed 600 seconds").into(),
            );
        }

        let thresholds = [
            self.catalog.min_rating_hotels,
            self.catalog.min_rating_restaurants,
            self.catalog.min_rating_cafes,
            self.catalog.min_rating_attractions,
            self.catalog.min_rating_interests,
        ];
        for threshold in thresholds {
            if !(0.0..=5.0).contains(&threshold) {
                return Err(TravelAiError::config(
                    "Minimum rating thresholds must be between 0.0 and 5.0",
                )
                .into());
            }
        }

        if self.prompt.base_candidates_per_category > self.prompt.max_candidates_per_category {
            return Err(TravelAiError::config(
                "Prompt base candidates cannot exceed the per-category maximum",
            )
            .into());
        }

        if self.prompt.max_candidates_per_category > 25 {
            return Err(TravelAiError::config(
                "Prompt candidates per category cannot exceed 25",
            )
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TravelAiError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TravelAiError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}
