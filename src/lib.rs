//! `TravelAI` - Place-aware AI travel itinerary generation
//!
//! This library turns a trip request into a structured day-by-day
//! itinerary: it gathers place candidates from a search provider, asks a
//! generative model to compose a plan over them, repairs the model's JSON,
//! reconciles reused place ids, and assembles a budgeted response with
//! weather attached.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod providers;

// Re-export core types for public API
pub use config::TravelAiConfig;
pub use error::TravelAiError;
pub use models::{
    CatalogSnapshot, Itinerary, PlaceCandidate, PlaceCategory, RawPlace, TripBudget, TripPace,
    TripRequest, WeatherReport,
};
pub use pipeline::{ItineraryPipeline, ItineraryResponse, ResponseMetadata};
pub use providers::{GenerationModel, PlaceSearchProvider, SearchFilters, WeatherProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TravelAiError>;
