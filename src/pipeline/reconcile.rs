//! Place-id conflict resolution
//!
//! The generation model is told not to reuse place ids, but it does anyway.
//! Reconciliation walks the plan in a fixed order — accommodation
//! suggestions, then days by index, activities before meals — so the same
//! draft and catalog always produce the same substitutions. Transport legs
//! carry no place id and are skipped.
//!
//! The chosen hotel is the one sanctioned exception: its id may appear
//! twice across the accommodation suggestions (check-in and check-out)
//! without counting as a conflict.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::models::{CatalogSnapshot, Itinerary};

/// What reconciliation did, for logging
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Conflicting or unknown ids replaced with an unused catalog id
    pub substitutions: usize,
    /// Duplicates left in place because the category was exhausted
    pub gaps: usize,
    /// Unknown ids cleared because no replacement existed
    pub cleared: usize,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum SlotKind {
    Accommodation,
    Activity,
    Meal,
}

struct Reconciler<'a> {
    snapshot: &'a CatalogSnapshot,
    used: Vec<String>,
    used_set: HashSet<String>,
    hotel_id: Option<String>,
    hotel_uses: u32,
    stats: ReconcileStats,
}

/// Enforce at-most-once place usage across the whole plan, in place.
/// Fills `place_ids_used` with the final used set in first-use order.
pub fn reconcile(itinerary: &mut Itinerary, snapshot: &CatalogSnapshot) -> ReconcileStats {
    let mut state = Reconciler {
        snapshot,
        used: Vec::new(),
        used_set: HashSet::new(),
        hotel_id: None,
        hotel_uses: 0,
        stats: ReconcileStats::default(),
    };

    for suggestion in &mut itinerary.accommodation_suggestions {
        state.visit(&mut suggestion.place_id, SlotKind::Accommodation);
    }
    for day in &mut itinerary.days {
        for activity in &mut day.activities {
            state.visit(&mut activity.place_id, SlotKind::Activity);
        }
        for meal in &mut day.meals {
            state.visit(&mut meal.place_id, SlotKind::Meal);
        }
    }

    itinerary.place_ids_used = state.used;
    state.stats
}

impl Reconciler<'_> {
    fn visit(&mut self, place_id: &mut String, kind: SlotKind) {
        if place_id.is_empty() {
            return;
        }

        if kind == SlotKind::Accommodation {
            if self.hotel_id.is_none() && self.snapshot.contains_id(place_id) {
                self.hotel_id = Some(place_id.clone());
                self.hotel_uses = 1;
                return;
            }
            if self.hotel_id.as_deref() == Some(place_id.as_str()) && self.hotel_uses < 2 {
                self.hotel_uses += 1;
                return;
            }
        }

        let known = self.snapshot.contains_id(place_id);
        let is_hotel = self.hotel_id.as_deref() == Some(place_id.as_str());
        if known && !is_hotel && !self.used_set.contains(place_id.as_str()) {
            self.mark_used(place_id.clone());
            return;
        }

        // Conflict: a reused id, or one the model invented
        match self.first_unused_in(&self.category_of(place_id)) {
            Some(replacement) => {
                debug!("Substituting place id '{place_id}' with '{replacement}'");
                *place_id = replacement.clone();
                if kind == SlotKind::Accommodation && self.hotel_id.is_none() {
                    self.hotel_id = Some(replacement.clone());
                    self.hotel_uses = 1;
                }
                self.mark_used(replacement);
                self.stats.substitutions += 1;
            }
            None if known => {
                // Category exhausted: the duplicate stays (best effort)
                warn!("No unused place available to replace duplicate '{place_id}'");
                self.stats.gaps += 1;
            }
            None => {
                warn!("Clearing unknown place id '{place_id}': no replacement available");
                place_id.clear();
                self.stats.cleared += 1;
            }
        }
    }

    fn mark_used(&mut self, id: String) {
        self.used_set.insert(id.clone());
        self.used.push(id);
    }

    /// Category key derived from the id's prefix. Ids whose prefix matches
    /// no snapshot category (provider-native ids, hallucinated ones) fall
    /// back to attractions.
    fn category_of(&self, place_id: &str) -> String {
        if let Some(prefix) = place_id.split('_').next() {
            if self.snapshot.has_category(prefix) {
                return prefix.to_string();
            }
        }
        // Interest slugs contain underscores ("street_food_001"); try the
        // longest category key the id extends
        let mut best: Option<&str> = None;
        for (key, _) in self.snapshot.groups() {
            if place_id.starts_with(key)
                && place_id[key.len()..].starts_with('_')
                && best.is_none_or(|b| key.len() > b.len())
            {
                best = Some(key);
            }
        }
        best.unwrap_or("attractions").to_string()
    }

    fn first_unused_in(&self, category: &str) -> Option<String> {
        let places = self.snapshot.category(category)?;
        places
            .iter()
            .find(|place| {
                !self.used_set.contains(place.id.as_str())
                    && self.hotel_id.as_deref() != Some(place.id.as_str())
            })
            .map(|place| place.id.clone())
    }
}
