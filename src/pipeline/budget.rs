//! Cost estimation from free-form price signals
//!
//! Providers report prices as loose strings ("$25-40", "₹500 per person",
//! "free"). A point estimate is the average of every numeric token in a
//! string that carries a currency marker; anything without a marker is
//! worth 0.0 rather than a guess.

use tracing::debug;

use crate::models::{BudgetBreakdown, CatalogSnapshot, DayBudget, Itinerary};

const CURRENCY_MARKERS: [char; 2] = ['$', '₹'];

/// Point estimate for one price signal
#[must_use]
pub fn price_estimate(signal: Option<&str>) -> f64 {
    let Some(text) = signal else {
        return 0.0;
    };
    if !text.contains(CURRENCY_MARKERS) {
        return 0.0;
    }

    let mut numbers = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        if c.is_ascii_digit() || (c == '.' && !current.is_empty()) {
            current.push(c);
        } else if !current.is_empty() {
            if let Ok(value) = current.parse::<f64>() {
                numbers.push(value);
            }
            current.clear();
        }
    }
    if !current.is_empty() {
        if let Ok(value) = current.parse::<f64>() {
            numbers.push(value);
        }
    }

    if numbers.is_empty() {
        0.0
    } else {
        numbers.iter().sum::<f64>() / numbers.len() as f64
    }
}

/// The price signal backing a slot: the referenced candidate's when the id
/// resolves, otherwise whatever the slot itself carries
fn slot_signal<'a>(
    place_id: &str,
    own_signal: Option<&'a str>,
    snapshot: &'a CatalogSnapshot,
) -> Option<&'a str> {
    if !place_id.is_empty() {
        if let Some(candidate) = snapshot.find(place_id) {
            return candidate.price_signal.as_deref().or(own_signal);
        }
    }
    own_signal
}

/// Compute the per-day breakdown for a reconciled itinerary
#[must_use]
pub fn compute(itinerary: &Itinerary, snapshot: &CatalogSnapshot) -> BudgetBreakdown {
    // One flat nightly estimate from the first accommodation suggestion
    let accommodation_estimate = itinerary
        .accommodation_suggestions
        .first()
        .map(|suggestion| {
            price_estimate(slot_signal(
                &suggestion.place_id,
                suggestion.price_signal.as_deref(),
                snapshot,
            ))
        })
        .unwrap_or(0.0);

    let mut daily = Vec::with_capacity(itinerary.days.len());
    for day in &itinerary.days {
        let meals: f64 = day
            .meals
            .iter()
            .map(|meal| {
                price_estimate(slot_signal(
                    &meal.place_id,
                    meal.price_signal.as_deref(),
                    snapshot,
                ))
            })
            .sum();
        let activities: f64 = day
            .activities
            .iter()
            .map(|activity| {
                price_estimate(slot_signal(
                    &activity.place_id,
                    activity.price_signal.as_deref(),
                    snapshot,
                ))
            })
            .sum();
        let transport: f64 = day
            .transport
            .iter()
            .map(|leg| price_estimate(leg.cost.as_deref()))
            .sum();

        let total = meals + activities + transport + accommodation_estimate;
        daily.push(DayBudget {
            day: day.day,
            meals,
            activities,
            transport,
            accommodation: accommodation_estimate,
            total,
        });
    }

    let trip_total: f64 = daily.iter().map(|day| day.total).sum();
    let per_day_average = if daily.is_empty() {
        0.0
    } else {
        trip_total / daily.len() as f64
    };

    BudgetBreakdown {
        daily,
        trip_total,
        per_day_average,
    }
}

/// Attach the breakdown to the itinerary. The model's own top-level
/// estimate is overwritten only when the computed total is strictly
/// positive.
pub fn apply(itinerary: &mut Itinerary, snapshot: &CatalogSnapshot) {
    let breakdown = compute(itinerary, snapshot);
    if breakdown.trip_total > 0.0 {
        itinerary.estimated_budget = breakdown.trip_total;
    } else {
        debug!("No price signals parsed; keeping model budget estimate");
    }
    itinerary.budget_breakdown = Some(breakdown);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AccommodationSuggestion, ActivitySlot, ItineraryDay, MealSlot, PlaceCandidate,
        TransportLeg,
    };
    use rstest::rstest;

    #[rstest]
    #[case(Some("$25-40"), 32.5)]
    #[case(Some("₹100"), 100.0)]
    #[case(Some("$18.50"), 18.5)]
    #[case(Some("around $20 per person"), 20.0)]
    #[case(Some("free"), 0.0)]
    #[case(Some("25"), 0.0)]
    #[case(Some(""), 0.0)]
    #[case(None, 0.0)]
    fn test_price_estimates(#[case] signal: Option<&str>, #[case] expected: f64) {
        assert!((price_estimate(signal) - expected).abs() < f64::EPSILON);
    }

    fn priced_candidate(id: &str, category: &str, signal: &str) -> PlaceCandidate {
        PlaceCandidate {
            id: id.to_string(),
            category: category.to_string(),
            name: id.to_string(),
            rating: 4.0,
            price_signal: Some(signal.to_string()),
            address: None,
            coordinates: None,
            metadata: serde_json::Value::Null,
        }
    }

    fn snapshot() -> CatalogSnapshot {
        CatalogSnapshot::new(vec![
            (
                "hotels".to_string(),
                vec![priced_candidate("hotels_001", "hotels", "$100")],
            ),
            (
                "restaurants".to_string(),
                vec![priced_candidate("restaurants_001", "restaurants", "$20-30")],
            ),
            (
                "attractions".to_string(),
                vec![priced_candidate("attractions_001", "attractions", "$15")],
            ),
        ])
    }

    fn sample_itinerary() -> Itinerary {
        Itinerary {
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
                transport: vec![TransportLeg {
                    mode: "metro".to_string(),
                    cost: Some("$5".to_string()),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_day_totals_include_all_slot_kinds() {
        let breakdown = compute(&sample_itinerary(), &snapshot());

        assert_eq!(breakdown.daily.len(), 1);
        let day = &breakdown.daily[0];
        assert!((day.meals - 25.0).abs() < f64::EPSILON);
        assert!((day.activities - 15.0).abs() < f64::EPSILON);
        assert!((day.transport - 5.0).abs() < f64::EPSILON);
        assert!((day.accommodation - 100.0).abs() < f64::EPSILON);
        assert!((breakdown.trip_total - 145.0).abs() < f64::EPSILON);
        assert!((breakdown.per_day_average - 145.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_apply_overwrites_model_estimate_when_positive() {
        let mut itinerary = sample_itinerary();
        itinerary.estimated_budget = 9999.0;
        apply(&mut itinerary, &snapshot());
        assert!((itinerary.estimated_budget - 145.0).abs() < f64::EPSILON);
        assert!(itinerary.budget_breakdown.is_some());
    }

    #[test]
    fn test_apply_keeps_model_estimate_when_total_is_zero() {
        let mut itinerary = sample_itinerary();
        itinerary.estimated_budget = 800.0;
        // Empty catalog: no price signal resolves, total stays 0.0
        apply(&mut itinerary, &CatalogSnapshot::default());
        assert!((itinerary.estimated_budget - 800.0).abs() < f64::EPSILON);
    }
}
