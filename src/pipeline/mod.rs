//! Itinerary generation pipeline
//!
//! This module wires the stages together: prefetch sizing, concurrent
//! catalog aggregation, prompt composition, the generation call, JSON
//! recovery, place-id reconciliation, enrichment, budgeting, and final
//! assembly. The weather fetch runs alongside the catalog fan-out and is
//! joined only at assembly.
//!
//! The contract is: always return a schema-conformant itinerary or an
//! explicit cancellation. Provider failures, generation failures and
//! unparseable model output degrade the response (`metadata.fallback`,
//! `metadata.errors`) instead of raising.

pub mod assemble;
pub mod budget;
pub mod catalog;
pub mod enrich;
pub mod parser;
pub mod prompt;
pub mod reconcile;
pub mod sizer;

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::config::TravelAiConfig;
use crate::diagnostics;
use crate::models::{Itinerary, ItineraryDay, TripRequest, WeatherReport};
use crate::providers::{GenerationModel, PlaceSearchProvider, WeatherProvider};
use crate::{Result, TravelAiError};

pub use assemble::{ItineraryResponse, ResponseMetadata};
pub use reconcile::ReconcileStats;

/// The pipeline context: provider handles plus configuration.
///
/// Providers are injected at construction so tests (and alternate
/// deployments) can swap implementations without touching the pipeline.
pub struct ItineraryPipeline {
    places: Arc<dyn PlaceSearchProvider>,
    weather: Arc<dyn WeatherProvider>,
    model: Arc<dyn GenerationModel>,
    config: TravelAiConfig,
}

impl ItineraryPipeline {
    /// Create a pipeline from provider handles and configuration
    pub fn new(
        places: Arc<dyn PlaceSearchProvider>,
        weather: Arc<dyn WeatherProvider>,
        model: Arc<dyn GenerationModel>,
        config: TravelAiConfig,
    ) -> Self {
        Self {
            places,
            weather,
            model,
            config,
        }
    }

    /// Run the full pipeline for one trip request.
    ///
    /// Returns `Err` only for invalid input or an observed cancellation;
    /// every other failure mode is absorbed into a degraded response.
    #[instrument(skip(self, request, cancel), fields(destination = %request.destination))]
    pub async fn generate(
        &self,
        request: &TripRequest,
        cancel: &CancellationToken,
    ) -> Result<ItineraryResponse> {
        request.validate()?;

        if cancel.is_cancelled() {
            return Err(TravelAiError::Cancelled);
        }

        info!(
            "Generating {}-day itinerary for {} ({} travelers)",
            request.duration_days(),
            request.destination,
            request.travelers
        );

        // Weather runs alongside the catalog fan-out, joined at assembly
        let weather_task = self.spawn_weather_fetch(request);

        let aggregated = catalog::build_catalog(self.places.as_ref(), request, &self.config).await;
        let snapshot = aggregated.snapshot;
        let mut errors = aggregated.errors;

        if cancel.is_cancelled() {
            weather_task.abort();
            return Err(TravelAiError::Cancelled);
        }

        let prompt_text = prompt::compose(request, &snapshot, &self.config);
        let (mut itinerary, fallback) = match self.generate_draft(&prompt_text).await {
            Ok(draft) => (draft, false),
            Err(err) => {
                warn!("Falling back to skeleton itinerary: {err}");
                errors.push(err.to_string());
                (fallback_skeleton(request), true)
            }
        };

        let stats = reconcile::reconcile(&mut itinerary, &snapshot);
        if stats.substitutions > 0 || stats.gaps > 0 || stats.cleared > 0 {
            info!(
                "Reconciliation: {} substituted, {} duplicates kept, {} cleared",
                stats.substitutions, stats.gaps, stats.cleared
            );
        }

        enrich::enrich(&mut itinerary, &snapshot);
        budget::apply(&mut itinerary, &snapshot);

        if cancel.is_cancelled() {
            weather_task.abort();
            return Err(TravelAiError::Cancelled);
        }

        let weather_timeout =
            Duration::from_secs(self.config.providers.weather_timeout_seconds.into());
        let response = assemble::assemble(
            itinerary,
            &snapshot,
            weather_task,
            weather_timeout,
            fallback,
            errors,
        )
        .await;

        info!(
            "Itinerary assembled: {} places used of {} fetched{}",
            response.metadata.total_places_used,
            response.metadata.total_places_fetched,
            if response.metadata.fallback {
                " (fallback)"
            } else {
                ""
            }
        );

        Ok(response)
    }

    /// Start the weather call on its own task with its own timeout.
    /// All failure modes collapse to `None`.
    fn spawn_weather_fetch(&self, request: &TripRequest) -> JoinHandle<Option<WeatherReport>> {
        let provider = Arc::clone(&self.weather);
        let destination = request.destination.clone();
        let timeout = Duration::from_secs(self.config.providers.weather_timeout_seconds.into());

        tokio::spawn(async move {
            match tokio::time::timeout(timeout, provider.current_weather(&destination)).await {
                Ok(Ok(report)) => Some(report),
                Ok(Err(err)) => {
                    warn!("Weather fetch failed for {destination}: {err:#}");
                    None
                }
                Err(_) => {
                    warn!(
                        "Weather fetch for {destination} timed out after {}s",
                        timeout.as_secs()
                    );
                    None
                }
            }
        })
    }

    /// Call the model and recover its output into a draft itinerary
    async fn generate_draft(&self, prompt_text: &str) -> Result<Itinerary> {
        let timeout = Duration::from_secs(self.config.providers.generation_timeout_seconds.into());

        let raw = match tokio::time::timeout(timeout, self.model.generate(prompt_text)).await {
            Ok(Ok(text)) => text,
            Ok(Err(err)) => {
                return Err(TravelAiError::generation(format!("{err:#}")));
            }
            Err(_) => {
                return Err(TravelAiError::generation(format!(
                    "model call timed out after {}s",
                    timeout.as_secs()
                )));
            }
        };

        match parser::parse_itinerary(&raw) {
            Ok(draft) => Ok(draft),
            Err(failure) => {
                if self.config.diagnostics.enabled {
                    match diagnostics::write_parse_failure(
                        &self.config.diagnostics.directory,
                        &raw,
                        &failure.best_attempt,
                    ) {
                        Ok(path) => info!("Parse-failure artifact written to {}", path.display()),
                        Err(err) => warn!("Could not write parse-failure artifact: {err}"),
                    }
                }
                Err(TravelAiError::parse(failure.message))
            }
        }
    }
}

/// The minimal valid itinerary returned when generation or parsing fails:
/// one empty day per trip day with dates filled in.
fn fallback_skeleton(request: &TripRequest) -> Itinerary {
    Itinerary {
        destination: request.destination.clone(),
        days: (0..request.duration_days())
            .map(|offset| ItineraryDay {
                day: offset + 1,
                date: request.date_of_day(offset).to_string(),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TripBudget, TripPace};

    fn request() -> TripRequest {
        TripRequest {
            destination: "Paris".to_string(),
            start_date: "2026-05-01".parse().unwrap(),
            end_date: "2026-05-03".parse().unwrap(),
            travelers: 2,
            budget: TripBudget::default(),
            interests: vec![],
            dietary_preferences: vec![],
            accommodation_preference: None,
            trip_pace: TripPace::default(),
        }
    }

    #[test]
    fn test_fallback_skeleton_has_one_empty_day_per_trip_day() {
        let skeleton = fallback_skeleton(&request());
        assert_eq!(skeleton.destination, "Paris");
        assert_eq!(skeleton.days.len(), 3);
        assert_eq!(skeleton.days[0].day, 1);
        assert_eq!(skeleton.days[0].date, "2026-05-01");
        assert_eq!(skeleton.days[2].date, "2026-05-03");
        assert!(skeleton.days.iter().all(|day| day.activities.is_empty()));
        assert!(skeleton.days.iter().all(|day| day.meals.is_empty()));
        assert!(skeleton.place_ids_used.is_empty());
    }
}
