//! Data models for the TravelAI itinerary pipeline
//!
//! This module contains the core domain models organized by concern:
//! - Trip: the incoming trip request and its constraints
//! - Place: point-of-interest candidates and the per-request catalog
//! - Itinerary: the day-by-day plan produced by the generation model
//! - Weather: the weather payload attached to the final response

pub mod itinerary;
pub mod place;
pub mod trip;
pub mod weather;

// Re-export all public types for convenient access
pub use itinerary::{
    AccommodationSuggestion, ActivitySlot, BudgetBreakdown, DayBudget, Itinerary, ItineraryDay,
    MealSlot, TransportLeg,
};
pub use place::{CatalogSnapshot, Coordinates, PlaceCandidate, PlaceCategory, RawPlace};
pub use trip::{TripBudget, TripPace, TripRequest};
pub use weather::WeatherReport;
