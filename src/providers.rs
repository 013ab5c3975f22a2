//! External collaborator interfaces
//!
//! The pipeline never talks to the network itself; it is handed trait
//! objects for place search, weather, and text generation. Implementations
//! are injected at construction so tests can substitute fakes. All three
//! traits return `anyhow::Result` — the pipeline degrades any
//! implementation error the same way regardless of its concrete type.

use crate::models::{Coordinates, PlaceCategory, RawPlace, WeatherReport};
use anyhow::Result;
use async_trait::async_trait;

/// Filters forwarded to the place search provider
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    /// Minimum rating hint; providers may ignore it, the catalog filter
    /// re-applies it either way
    pub min_rating: Option<f32>,
    /// Center of the search area when known
    pub near: Option<Coordinates>,
}

/// A place search backend ("find restaurants in Paris")
#[async_trait]
pub trait PlaceSearchProvider: Send + Sync {
    /// Search one category near a destination, returning at most
    /// `max_results` places. Errors are treated by the caller as an empty
    /// result for this category only.
    async fn search_category(
        &self,
        category: &PlaceCategory,
        location: &str,
        filters: &SearchFilters,
        max_results: usize,
    ) -> Result<Vec<RawPlace>>;
}

/// A current-weather backend
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current weather at the destination. Errors degrade to a missing
    /// weather section in the response.
    async fn current_weather(&self, location: &str) -> Result<WeatherReport>;
}

/// A generative text model
#[async_trait]
pub trait GenerationModel: Send + Sync {
    /// Generate raw text for a prompt. No JSON-validity guarantee; the
    /// response parser handles whatever comes back.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
