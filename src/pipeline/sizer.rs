//! Per-category prefetch limits scaled to trip length
//!
//! Longer trips need a deeper candidate pool, but provider quotas make
//! unbounded fetching expensive, so every category grows from a base limit
//! in two-day steps past a four-day trip and stops at a hard cap.

use crate::models::PlaceCategory;

/// base, growth-per-step, cap
fn limits_for(category: &PlaceCategory) -> (u32, u32, u32) {
    match category {
        PlaceCategory::Hotels => (6, 1, 10),
        PlaceCategory::Restaurants => (10, 2, 20),
        PlaceCategory::Cafes => (6, 1, 12),
        PlaceCategory::Attractions => (12, 2, 24),
        PlaceCategory::Interest(_) => (6, 1, 12),
    }
}

/// How many places to request for one category on a trip of `trip_days`.
///
/// Monotonic non-decreasing in `trip_days` and always bounded by the
/// category cap.
#[must_use]
pub fn fetch_limit(category: &PlaceCategory, trip_days: u32) -> usize {
    let (base, growth, cap) = limits_for(category);
    let steps = trip_days.saturating_sub(4) / 2;
    (base + growth * steps).min(cap) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PlaceCategory::Hotels, 6)]
    #[case(PlaceCategory::Restaurants, 10)]
    #[case(PlaceCategory::Cafes, 6)]
    #[case(PlaceCategory::Attractions, 12)]
    fn test_short_trip_gets_base_limits(#[case] category: PlaceCategory, #[case] base: usize) {
        assert_eq!(fetch_limit(&category, 3), base);
        assert_eq!(fetch_limit(&category, 1), base);
    }

    #[rstest]
    #[case(PlaceCategory::Hotels, 8)]
    #[case(PlaceCategory::Restaurants, 14)]
    #[case(PlaceCategory::Attractions, 16)]
    fn test_nine_day_trip_grows(#[case] category: PlaceCategory, #[case] expected: usize) {
        assert_eq!(fetch_limit(&category, 9), expected);
    }

    #[test]
    fn test_limits_monotonic_and_capped() {
        let categories = [
            PlaceCategory::Hotels,
            PlaceCategory::Restaurants,
            PlaceCategory::Cafes,
            PlaceCategory::Attractions,
            PlaceCategory::for_interest("art"),
        ];

        for category in &categories {
            let (_, _, cap) = limits_for(category);
            let mut previous = 0;
            for days in 1..60 {
                let limit = fetch_limit(category, days);
                assert!(limit >= previous, "limit shrank for {category} at {days} days");
                assert!(limit <= cap as usize, "limit exceeded cap for {category}");
                previous = limit;
            }
            // A very long trip must sit exactly at the cap
            assert_eq!(fetch_limit(category, 120), cap as usize);
        }
    }
}
