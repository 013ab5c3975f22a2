//! Prompt composition for the generation model
//!
//! Sends the model a compact per-category shortlist rather than the full
//! catalog: prompt size is token-budgeted, and the model only needs enough
//! options to fill the plan. Structural rules ask for JSON-only output;
//! the response parser copes when the model ignores them anyway.

use std::fmt::Write;

use crate::config::TravelAiConfig;
use crate::models::{CatalogSnapshot, TripRequest};

/// Shortlist size per category: grows mildly with trip length, bounded by
/// the configured maximum.
#[must_use]
pub fn shortlist_size(config: &TravelAiConfig, trip_days: u32) -> usize {
    let k = config.prompt.base_candidates_per_category + trip_days / 3;
    k.min(config.prompt.max_candidates_per_category) as usize
}

/// Build the full generation prompt for a request and its catalog
#[must_use]
pub fn compose(
    request: &TripRequest,
    snapshot: &CatalogSnapshot,
    config: &TravelAiConfig,
) -> String {
    let days = request.duration_days();
    let k = shortlist_size(config, days);

    let mut prompt = String::with_capacity(2048);

    let _ = writeln!(
        prompt,
        "You are a travel planner. Create a {days}-day itinerary for {}.",
        request.destination
    );
    prompt.push_str("\nTrip constraints:\n");
    let _ = writeln!(
        prompt,
        "- Dates: {} to {} ({days} days)",
        request.start_date, request.end_date
    );
    let _ = writeln!(prompt, "- Travelers: {}", request.travelers);
    let _ = writeln!(prompt, "- Budget: {}", request.budget.describe());
    let _ = writeln!(
        prompt,
        "- Pace: {:?} ({} activities per day)",
        request.trip_pace,
        request.trip_pace.activities_per_day()
    );
    if !request.interests.is_empty() {
        let _ = writeln!(prompt, "- Interests: {}", request.interests.join(", "));
    }
    if !request.dietary_preferences.is_empty() {
        let _ = writeln!(
            prompt,
            "- Dietary preferences: {}",
            request.dietary_preferences.join(", ")
        );
    }
    if let Some(preference) = &request.accommodation_preference {
        let _ = writeln!(prompt, "- Accommodation preference: {preference}");
    }

    prompt.push_str("\nAvailable places, by category. Reference them ONLY by id:\n");
    for (key, places) in snapshot.groups() {
        if places.is_empty() {
            continue;
        }
        let _ = writeln!(prompt, "{key}:");
        for place in places.iter().take(k) {
            let _ = writeln!(prompt, "  {}: {} (★{:.1})", place.id, place.name, place.rating);
        }
    }

    prompt.push_str("\nRules:\n");
    prompt.push_str("- Respond with a single valid JSON object and nothing else: no prose, no markdown fences, no comments.\n");
    prompt.push_str(
        "- Use each place id at most once across the whole plan. The only exception is the chosen hotel id, which may appear twice in accommodationSuggestions (check-in and check-out).\n",
    );
    let _ = writeln!(
        prompt,
        "- Each day needs exactly {} activities, 3 meals (breakfast, lunch, dinner) and the transport legs between them.",
        request.trip_pace.activities_per_day()
    );
    prompt.push_str("- Only use ids from the list above. Leave placeId as \"\" when no listed place fits a slot.\n");

    prompt.push_str("\nJSON shape:\n");
    prompt.push_str(concat!(
        "{\"destination\": \"\", \"days\": [{\"day\": 1, \"date\": \"YYYY-MM-DD\", ",
        "\"activities\": [{\"placeId\": \"\", \"name\": \"\", \"description\": \"\", \"timeSlot\": \"\", \"activityType\": \"\"}], ",
        "\"meals\": [{\"placeId\": \"\", \"name\": \"\", \"mealType\": \"breakfast\", \"description\": \"\"}], ",
        "\"transport\": [{\"mode\": \"\", \"from\": \"\", \"to\": \"\", \"description\": \"\", \"cost\": \"\"}]}], ",
        "\"accommodationSuggestions\": [{\"placeId\": \"\", \"name\": \"\", \"notes\": \"\"}], ",
        "\"estimatedBudget\": 0}\n",
    ));

    prompt
}
