//! Final response assembly
//!
//! The last stage joins the weather task (started back when the catalog
//! was fetched), partitions the catalog into referenced and unreferenced
//! entries, and stamps the response metadata.

use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::warn;

use crate::models::{CatalogSnapshot, Itinerary, PlaceCandidate, WeatherReport};

/// The final pipeline payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryResponse {
    /// The reconciled, enriched plan
    pub itinerary: Itinerary,
    /// Catalog entries for every place the plan references
    pub place_details: BTreeMap<String, PlaceCandidate>,
    /// Catalog entries the plan never referenced, grouped by category
    pub additional_places: BTreeMap<String, Vec<PlaceCandidate>>,
    /// Weather at the destination, when the provider answered in time
    pub weather: Option<WeatherReport>,
    /// Counts, timestamp and degradation signals
    pub metadata: ResponseMetadata,
}

/// Degradation signals and bookkeeping for one response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    /// Candidates fetched across all categories
    pub total_places_fetched: usize,
    /// Candidates referenced by the plan
    pub total_places_used: usize,
    /// Candidates fetched but never referenced
    pub total_places_unused: usize,
    /// When this response was assembled
    pub generated_at: DateTime<Utc>,
    /// True when generation or parsing failed and the skeleton was returned
    pub fallback: bool,
    /// Errors absorbed by degraded stages, in occurrence order
    pub errors: Vec<String>,
}

/// Join the weather task and build the final payload
pub async fn assemble(
    itinerary: Itinerary,
    snapshot: &CatalogSnapshot,
    weather_task: JoinHandle<Option<WeatherReport>>,
    weather_timeout: Duration,
    fallback: bool,
    errors: Vec<String>,
) -> ItineraryResponse {
    let weather = match tokio::time::timeout(weather_timeout, weather_task).await {
        Ok(Ok(report)) => report,
        Ok(Err(join_err)) => {
            warn!("Weather task failed to join: {join_err}");
            None
        }
        Err(_) => {
            warn!(
                "Weather still pending after {}s; returning without it",
                weather_timeout.as_secs()
            );
            None
        }
    };

    // Referenced = reconciled used set plus the accommodation ids, which
    // never enter place_ids_used
    let mut referenced: HashSet<&str> = itinerary
        .place_ids_used
        .iter()
        .map(String::as_str)
        .collect();
    for suggestion in &itinerary.accommodation_suggestions {
        if !suggestion.place_id.is_empty() {
            referenced.insert(suggestion.place_id.as_str());
        }
    }

    let mut place_details = BTreeMap::new();
    let mut additional_places: BTreeMap<String, Vec<PlaceCandidate>> = BTreeMap::new();
    for (key, places) in snapshot.groups() {
        for place in places {
            if referenced.contains(place.id.as_str()) {
                place_details.insert(place.id.clone(), place.clone());
            } else {
                additional_places
                    .entry(key.to_string())
                    .or_default()
                    .push(place.clone());
            }
        }
    }

    let total_places_fetched = snapshot.total_len();
    let total_places_used = place_details.len();
    let metadata = ResponseMetadata {
        total_places_fetched,
        total_places_used,
        total_places_unused: total_places_fetched - total_places_used,
        generated_at: Utc::now(),
        fallback,
        errors,
    };

    ItineraryResponse {
        itinerary,
        place_details,
        additional_places,
        weather,
        metadata,
    }
}
