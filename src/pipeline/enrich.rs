//! Catalog metadata overlay
//!
//! After reconciliation the plan's ids are trustworthy, but the display
//! fields still say whatever the model made up. The enricher overlays
//! name, address and price signal from the catalog; model-authored
//! semantic fields (description, time slot, types) are never touched.

use std::collections::HashSet;

use crate::models::{CatalogSnapshot, Itinerary};

/// Overlay catalog display fields onto every slot whose id survived
/// reconciliation. Accommodation suggestions are overlaid from their own
/// ids, which deliberately sit outside `place_ids_used`.
pub fn enrich(itinerary: &mut Itinerary, snapshot: &CatalogSnapshot) {
    let used: HashSet<String> = itinerary.place_ids_used.iter().cloned().collect();

    for suggestion in &mut itinerary.accommodation_suggestions {
        if let Some(candidate) = snapshot.find(&suggestion.place_id) {
            suggestion.name = candidate.name.clone();
            suggestion.address = candidate.address.clone();
            suggestion.price_signal = candidate.price_signal.clone();
        }
    }

    for day in &mut itinerary.days {
        for activity in &mut day.activities {
            if used.contains(&activity.place_id) {
                if let Some(candidate) = snapshot.find(&activity.place_id) {
                    activity.name = candidate.name.clone();
                    activity.address = candidate.address.clone();
                    activity.price_signal = candidate.price_signal.clone();
                }
            }
        }
        for meal in &mut day.meals {
            if used.contains(&meal.place_id) {
                if let Some(candidate) = snapshot.find(&meal.place_id) {
                    meal.name = candidate.name.clone();
                    meal.address = candidate.address.clone();
                    meal.price_signal = candidate.price_signal.clone();
                }
            }
        }
    }
}
