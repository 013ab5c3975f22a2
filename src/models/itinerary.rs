//! Day-by-day itinerary structures
//!
//! These structs are the deserialization target for the generation model's
//! JSON output, so every field is defaulted and camelCase-renamed: a
//! partially-correct model response still deserializes, and missing place
//! ids come through as empty strings rather than failures.

use serde::{Deserialize, Serialize};

/// A day-by-day travel plan.
///
/// The same type serves as the model's raw draft and as the reconciled
/// plan; reconciliation rewrites place ids in place and fills
/// `place_ids_used`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Itinerary {
    /// Destination echoed by the model
    pub destination: String,
    /// One entry per trip day, in order
    pub days: Vec<ItineraryDay>,
    /// Accommodation options; the first entry's id is the chosen hotel
    pub accommodation_suggestions: Vec<AccommodationSuggestion>,
    /// Top-level budget estimate; recomputed after reconciliation when
    /// price signals allow
    pub estimated_budget: f64,
    /// Unique place ids referenced by the reconciled plan, in first-use
    /// order. Empty until reconciliation.
    pub place_ids_used: Vec<String>,
    /// Per-day cost breakdown, filled by the budget calculator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_breakdown: Option<BudgetBreakdown>,
}

/// One planned day
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItineraryDay {
    /// 1-based day number
    pub day: u32,
    /// ISO-8601 date for this day
    pub date: String,
    /// Sightseeing and activity slots
    pub activities: Vec<ActivitySlot>,
    /// Meal slots
    pub meals: Vec<MealSlot>,
    /// Transport legs between slots; these carry no place id
    pub transport: Vec<TransportLeg>,
}

/// An activity slot referencing a catalog place by id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActivitySlot {
    /// Catalog place id, or empty when the model planned a free-form slot
    pub place_id: String,
    /// Display name; overlaid from the catalog after reconciliation
    pub name: String,
    /// Model-authored description, never overwritten
    pub description: String,
    /// Model-authored time slot ("09:00-11:30"), never overwritten
    pub time_slot: String,
    /// Model-authored activity type ("museum", "walk"), never overwritten
    pub activity_type: String,
    /// Street address, overlaid from the catalog
    pub address: Option<String>,
    /// Price signal, overlaid from the catalog
    pub price_signal: Option<String>,
}

/// A meal slot referencing a catalog place by id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MealSlot {
    /// Catalog place id, or empty
    pub place_id: String,
    /// Display name; overlaid from the catalog after reconciliation
    pub name: String,
    /// breakfast / lunch / dinner
    pub meal_type: String,
    /// Model-authored description, never overwritten
    pub description: String,
    /// Street address, overlaid from the catalog
    pub address: Option<String>,
    /// Price signal, overlaid from the catalog
    pub price_signal: Option<String>,
}

/// A transport leg between two slots
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransportLeg {
    /// Mode of transport ("metro", "walk", "taxi")
    pub mode: String,
    /// Origin description
    pub from: String,
    /// Destination description
    pub to: String,
    /// Model-authored note
    pub description: String,
    /// Free-form cost signal ("$10")
    pub cost: Option<String>,
}

/// An accommodation option proposed by the model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccommodationSuggestion {
    /// Catalog place id, or empty
    pub place_id: String,
    /// Display name; overlaid from the catalog
    pub name: String,
    /// Model-authored note ("near the old town")
    pub notes: String,
    /// Street address, overlaid from the catalog
    pub address: Option<String>,
    /// Price signal, overlaid from the catalog
    pub price_signal: Option<String>,
}

/// Per-day and trip-total cost estimates derived from price signals
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BudgetBreakdown {
    /// One row per trip day
    pub daily: Vec<DayBudget>,
    /// Sum of all day totals
    pub trip_total: f64,
    /// Trip total divided by day count
    pub per_day_average: f64,
}

/// Cost estimate for a single day
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DayBudget {
    /// 1-based day number
    pub day: u32,
    /// Meal cost estimate
    pub meals: f64,
    /// Activity cost estimate
    pub activities: f64,
    /// Transport cost estimate
    pub transport: f64,
    /// Accommodation cost estimate
    pub accommodation: f64,
    /// Day total
    pub total: f64,
}

impl Itinerary {
    /// All place ids referenced anywhere in the plan, accommodation
    /// included, in traversal order and with duplicates retained
    #[must_use]
    pub fn referenced_place_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        for suggestion in &self.accommodation_suggestions {
            if !suggestion.place_id.is_empty() {
                ids.push(suggestion.place_id.as_str());
            }
        }
        for day in &self.days {
            for activity in &day.activities {
                if !activity.place_id.is_empty() {
                    ids.push(activity.place_id.as_str());
                }
            }
            for meal in &day.meals {
                if !meal.place_id.is_empty() {
                    ids.push(meal.place_id.as_str());
                }
            }
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_partial_model_output() {
        // Missing fields and extra keys must not break deserialization
        let json = r#"{
            "destination": "Paris",
            "days": [
                {
                    "day": 1,
                    "activities": [{"placeId": "attractions_001", "surprise": true}],
                    "meals": []
                }
            ]
        }"#;

        let itinerary: Itinerary = serde_json::from_str(json).unwrap();
        assert_eq!(itinerary.destination, "Paris");
        assert_eq!(itinerary.days.len(), 1);
        assert_eq!(itinerary.days[0].activities[0].place_id, "attractions_001");
        assert!(itinerary.days[0].meals.is_empty());
        assert!(itinerary.accommodation_suggestions.is_empty());
        assert_eq!(itinerary.estimated_budget, 0.0);
    }

    #[test]
    fn test_referenced_place_ids_ordering() {
        let itinerary = Itinerary {
            accommodation_suggestions: vec![AccommodationSuggestion {
                place_id: "hotels_001".to_string(),
                ..Default::default()
            }],
            days: vec![ItineraryDay {
                day: 1,
                activities: vec![ActivitySlot {
                    place_id: "attractions_001".to_string(),
                    ..Default::default()
                }],
                meals: vec![MealSlot {
                    place_id: "restaurants_001".to_string(),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        };

        assert_eq!(
            itinerary.referenced_place_ids(),
            vec!["hotels_001", "attractions_001", "restaurants_001"]
        );
    }

    #[test]
    fn test_serializes_camel_case() {
        let itinerary = Itinerary {
            destination: "Rome".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&itinerary).unwrap();
        assert!(json.contains("placeIdsUsed"));
        assert!(json.contains("accommodationSuggestions"));
        assert!(!json.contains("budget_breakdown"));
    }
}
