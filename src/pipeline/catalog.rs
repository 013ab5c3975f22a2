//! Concurrent place catalog aggregation
//!
//! Issues one search per category and joins them into a [`CatalogSnapshot`].
//! Each query is an isolated failure domain: a provider error or timeout
//! empties that category only and is recorded, never propagated.

use std::collections::HashSet;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::TravelAiConfig;
use crate::models::{CatalogSnapshot, PlaceCandidate, PlaceCategory, RawPlace, TripRequest};
use crate::providers::{PlaceSearchProvider, SearchFilters};

use super::sizer;

/// The tagged result of one category query
enum FetchOutcome {
    Fetched {
        category: PlaceCategory,
        places: Vec<RawPlace>,
    },
    Failed {
        category: PlaceCategory,
        reason: String,
    },
}

/// A built snapshot plus the per-category errors absorbed on the way
pub struct AggregatedCatalog {
    pub snapshot: CatalogSnapshot,
    pub errors: Vec<String>,
}

/// The category list for a request: the four standard categories plus one
/// per distinct interest slug. Interest slugs that collide with a standard
/// key or with each other are dropped.
pub fn categories_for(request: &TripRequest) -> Vec<PlaceCategory> {
    let mut categories: Vec<PlaceCategory> = PlaceCategory::standard().into();
    let mut seen: HashSet<String> = categories.iter().map(|c| c.key().to_string()).collect();

    for interest in &request.interests {
        let category = PlaceCategory::for_interest(interest);
        if seen.insert(category.key().to_string()) {
            categories.push(category);
        }
    }

    categories
}

/// Fan out one query per category, join, and normalize into a snapshot
pub async fn build_catalog(
    provider: &dyn PlaceSearchProvider,
    request: &TripRequest,
    config: &TravelAiConfig,
) -> AggregatedCatalog {
    let trip_days = request.duration_days();
    let categories = categories_for(request);
    let timeout = Duration::from_secs(config.providers.search_timeout_seconds.into());

    info!(
        "Fetching {} place categories for {} ({} days)",
        categories.len(),
        request.destination,
        trip_days
    );

    let outcomes = futures::future::join_all(categories.into_iter().map(|category| {
        let destination = request.destination.clone();
        async move {
            let limit = sizer::fetch_limit(&category, trip_days);
            let filters = SearchFilters {
                min_rating: Some(min_rating_for(config, &category)),
                near: None,
            };

            match tokio::time::timeout(
                timeout,
                provider.search_category(&category, &destination, &filters, limit),
            )
            .await
            {
                Ok(Ok(places)) => {
                    debug!("Category '{}' returned {} places", category, places.len());
                    FetchOutcome::Fetched { category, places }
                }
                Ok(Err(err)) => {
                    warn!("Place search failed for '{}': {:#}", category, err);
                    FetchOutcome::Failed {
                        category,
                        reason: format!("{err:#}"),
                    }
                }
                Err(_) => {
                    warn!(
                        "Place search for '{}' timed out after {}s",
                        category,
                        timeout.as_secs()
                    );
                    FetchOutcome::Failed {
                        category,
                        reason: format!("timed out after {}s", timeout.as_secs()),
                    }
                }
            }
        }
    }))
    .await;

    let mut groups = Vec::new();
    let mut errors = Vec::new();

    for outcome in outcomes {
        match outcome {
            FetchOutcome::Fetched { category, places } => {
                let limit = sizer::fetch_limit(&category, trip_days);
                let min_rating = min_rating_for(config, &category);
                let normalized = normalize_category(category.key(), places, min_rating, limit);
                groups.push((category.key().to_string(), normalized));
            }
            FetchOutcome::Failed { category, reason } => {
                errors.push(format!("place search '{category}' failed: {reason}"));
                groups.push((category.key().to_string(), Vec::new()));
            }
        }
    }

    let snapshot = CatalogSnapshot::new(groups);
    info!(
        "Catalog built with {} candidates ({} categories degraded)",
        snapshot.total_len(),
        errors.len()
    );

    AggregatedCatalog { snapshot, errors }
}

/// The configured minimum rating for a category
fn min_rating_for(config: &TravelAiConfig, category: &PlaceCategory) -> f32 {
    match category {
        PlaceCategory::Hotels => config.catalog.min_rating_hotels,
        PlaceCategory::Restaurants => config.catalog.min_rating_restaurants,
        PlaceCategory::Cafes => config.catalog.min_rating_cafes,
        PlaceCategory::Attractions => config.catalog.min_rating_attractions,
        PlaceCategory::Interest(_) => config.catalog.min_rating_interests,
    }
}

/// Dedup, rating-filter, truncate and id-assign one category's raw places
fn normalize_category(
    category_key: &str,
    places: Vec<RawPlace>,
    min_rating: f32,
    limit: usize,
) -> Vec<PlaceCandidate> {
    // Dedup by provider id first, then by normalized name
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut seen_names: HashSet<String> = HashSet::new();
    let mut deduped: Vec<RawPlace> = Vec::new();

    for place in places {
        if let Some(id) = &place.id {
            if !seen_ids.insert(id.clone()) {
                continue;
            }
        }
        let name_key = place.name.trim().to_lowercase();
        if !seen_names.insert(name_key) {
            continue;
        }
        deduped.push(place);
    }

    // Rating filter, but never empty a category that had raw data
    let filtered: Vec<RawPlace> = deduped
        .iter()
        .filter(|place| place.rating.unwrap_or(0.0) >= min_rating)
        .cloned()
        .collect();
    let kept = if filtered.is_empty() && !deduped.is_empty() {
        debug!(
            "Rating filter would empty '{category_key}'; keeping {} unfiltered entries",
            deduped.len()
        );
        deduped
    } else {
        filtered
    };

    kept.into_iter()
        .take(limit)
        .enumerate()
        .map(|(index, place)| PlaceCandidate {
            id: place
                .id
                .unwrap_or_else(|| format!("{category_key}_{:03}", index + 1)),
            category: category_key.to_string(),
            name: place.name,
            rating: place.rating.unwrap_or(0.0),
            price_signal: place.price_signal,
            address: place.address,
            coordinates: place.coordinates,
            metadata: place.metadata,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TripBudget, TripPace};
    use anyhow::anyhow;
    use async_trait::async_trait;

    fn raw(id: Option<&str>, name: &str, rating: f32) -> RawPlace {
        RawPlace {
            id: id.map(str::to_string),
            name: name.to_string(),
            rating: Some(rating),
            price_signal: None,
            address: None,
            coordinates: None,
            metadata: serde_json::Value::Null,
        }
    }

    fn request(interests: &[&str]) -> TripRequest {
        TripRequest {
            destination: "Paris".to_string(),
            start_date: "2026-05-01".parse().unwrap(),
            end_date: "2026-05-03".parse().unwrap(),
            travelers: 2,
            budget: TripBudget::default(),
            interests: interests.iter().map(|s| s.to_string()).collect(),
            dietary_preferences: vec![],
            accommodation_preference: None,
            trip_pace: TripPace::default(),
        }
    }

    struct ScriptedProvider;

    #[async_trait]
    impl PlaceSearchProvider for ScriptedProvider {
        async fn search_category(
            &self,
            category: &PlaceCategory,
            _location: &str,
            _filters: &SearchFilters,
            _max_results: usize,
        ) -> anyhow::Result<Vec<RawPlace>> {
            match category {
                PlaceCategory::Cafes => Err(anyhow!("connection reset")),
                PlaceCategory::Hotels => Ok(vec![
                    raw(Some("h1"), "Grand Hotel", 4.5),
                    raw(Some("h1"), "Grand Hotel Again", 4.0),
                ]),
                _ => Ok(vec![raw(None, "Somewhere", 4.8)]),
            }
        }
    }

    #[test]
    fn test_categories_include_deduped_interests() {
        let categories = categories_for(&request(&["Art", "art", "cafes", "street food"]));
        let keys: Vec<&str> = categories.iter().map(PlaceCategory::key).collect();
        assert_eq!(
            keys,
            vec![
                "hotels",
                "restaurants",
                "cafes",
                "attractions",
                "art",
                "street_food"
            ]
        );
    }

    #[test]
    fn test_normalize_dedups_by_id_and_name() {
        let places = vec![
            raw(Some("a"), "Louvre", 4.8),
            raw(Some("a"), "Duplicate Id", 4.0),
            raw(None, "  louvre ", 4.1),
            raw(None, "Orsay", 4.6),
        ];
        let normalized = normalize_category("attractions", places, 0.0, 10);
        let names: Vec<&str> = normalized.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Louvre", "Orsay"]);
    }

    #[test]
    fn test_normalize_keeps_unfiltered_when_all_below_threshold() {
        let places = vec![raw(None, "Dive Bar", 2.0), raw(None, "Greasy Spoon", 2.5)];
        let normalized = normalize_category("restaurants", places, 4.0, 10);
        assert_eq!(normalized.len(), 2);
    }

    #[test]
    fn test_normalize_truncates_and_assigns_synthetic_ids() {
        let places = vec![
            raw(None, "First", 4.5),
            raw(Some("prov_9"), "Second", 4.5),
            raw(None, "Third", 4.5),
            raw(None, "Fourth", 4.5),
        ];
        let normalized = normalize_category("cafes", places, 0.0, 3);
        assert_eq!(normalized.len(), 3);
        assert_eq!(normalized[0].id, "cafes_001");
        assert_eq!(normalized[1].id, "prov_9");
        assert_eq!(normalized[2].id, "cafes_003");
    }

    #[test]
    fn test_normalize_treats_unrated_as_zero() {
        let mut unrated = raw(None, "Mystery Cafe", 0.0);
        unrated.rating = None;
        let normalized = normalize_category("cafes", vec![unrated, raw(None, "Known", 4.5)], 4.0, 10);
        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized[0].name, "Known");
    }

    #[tokio::test]
    async fn test_failed_category_is_isolated() {
        let config = TravelAiConfig::default();
        let aggregated = build_catalog(&ScriptedProvider, &request(&[]), &config).await;

        // Cafes failed but stayed a (empty) category; others survived
        assert_eq!(aggregated.errors.len(), 1);
        assert!(aggregated.errors[0].contains("cafes"));
        assert_eq!(aggregated.snapshot.category("cafes").unwrap().len(), 0);
        assert_eq!(aggregated.snapshot.category("hotels").unwrap().len(), 1);
        assert!(aggregated.snapshot.category("attractions").unwrap().len() > 0);
    }
}
