//! Point-of-interest candidates and the per-request place catalog

use serde::{Deserialize, Serialize};

/// Location coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

/// A place search category
///
/// The four standard categories are always queried; each traveler interest
/// adds one interest-derived category keyed by a slug of the interest text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlaceCategory {
    Hotels,
    Restaurants,
    Cafes,
    Attractions,
    Interest(String),
}

impl PlaceCategory {
    /// The four categories queried for every trip
    #[must_use]
    pub fn standard() -> [PlaceCategory; 4] {
        [
            PlaceCategory::Hotels,
            PlaceCategory::Restaurants,
            PlaceCategory::Cafes,
            PlaceCategory::Attractions,
        ]
    }

    /// Category derived from a free-form traveler interest
    #[must_use]
    pub fn for_interest(interest: &str) -> Self {
        PlaceCategory::Interest(slugify(interest))
    }

    /// Stable key used for catalog grouping and synthetic id prefixes
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            PlaceCategory::Hotels => "hotels",
            PlaceCategory::Restaurants => "restaurants",
            PlaceCategory::Cafes => "cafes",
            PlaceCategory::Attractions => "attractions",
            PlaceCategory::Interest(slug) => slug,
        }
    }

    /// Search phrase sent to the place provider
    #[must_use]
    pub fn search_term(&self) -> String {
        match self {
            PlaceCategory::Hotels => "hotels".to_string(),
            PlaceCategory::Restaurants => "restaurants".to_string(),
            PlaceCategory::Cafes => "cafes".to_string(),
            PlaceCategory::Attractions => "tourist attractions".to_string(),
            PlaceCategory::Interest(slug) => slug.replace('_', " "),
        }
    }
}

impl std::fmt::Display for PlaceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Lower-case an interest and collapse non-alphanumerics to underscores
fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut last_was_sep = true;
    for c in text.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
            last_was_sep = false;
        } else if !last_was_sep {
            slug.push('_');
            last_was_sep = true;
        }
    }
    while slug.ends_with('_') {
        slug.pop();
    }
    if slug.is_empty() {
        "interest".to_string()
    } else {
        slug
    }
}

/// A place as returned by the search provider, before normalization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPlace {
    /// Provider-supplied id, if any
    pub id: Option<String>,
    /// Display name
    pub name: String,
    /// Rating on a 0-5 scale
    pub rating: Option<f32>,
    /// Free-form price signal ("$25-40", "₹500", "free")
    pub price_signal: Option<String>,
    /// Street address
    pub address: Option<String>,
    /// Geographic position
    pub coordinates: Option<Coordinates>,
    /// Provider-specific metadata, passed through untouched
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// A normalized catalog entry. Immutable once the catalog is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceCandidate {
    /// Provider id, or a synthetic `{category}_{n:03}` id
    pub id: String,
    /// Catalog category key
    pub category: String,
    /// Display name
    pub name: String,
    /// Rating on a 0-5 scale; unrated places carry 0.0
    pub rating: f32,
    /// Free-form price signal
    pub price_signal: Option<String>,
    /// Street address
    pub address: Option<String>,
    /// Geographic position
    pub coordinates: Option<Coordinates>,
    /// Provider-specific metadata
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// The immutable, per-request universe of fetched place candidates,
/// grouped by category in query order.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    groups: Vec<(String, Vec<PlaceCandidate>)>,
}

impl CatalogSnapshot {
    /// Build a snapshot from category groups, preserving their order
    #[must_use]
    pub fn new(groups: Vec<(String, Vec<PlaceCandidate>)>) -> Self {
        Self { groups }
    }

    /// Iterate category groups in query order
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[PlaceCandidate])> {
        self.groups
            .iter()
            .map(|(key, places)| (key.as_str(), places.as_slice()))
    }

    /// Candidates for one category
    #[must_use]
    pub fn category(&self, key: &str) -> Option<&[PlaceCandidate]> {
        self.groups
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, places)| places.as_slice())
    }

    /// Whether the snapshot has a group under this key
    #[must_use]
    pub fn has_category(&self, key: &str) -> bool {
        self.groups.iter().any(|(k, _)| k == key)
    }

    /// Look up a candidate by id
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&PlaceCandidate> {
        self.groups
            .iter()
            .flat_map(|(_, places)| places.iter())
            .find(|place| place.id == id)
    }

    /// Whether any candidate carries this id
    #[must_use]
    pub fn contains_id(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Total candidates across all categories
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.groups.iter().map(|(_, places)| places.len()).sum()
    }

    /// Whether no candidates were fetched at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: &str, category: &str) -> PlaceCandidate {
        PlaceCandidate {
            id: id.to_string(),
            category: category.to_string(),
            name: format!("Place {id}"),
            rating: 4.2,
            price_signal: None,
            address: None,
            coordinates: None,
            metadata: serde_json::Value::Null,
        }
    }

    #[test]
    fn test_category_keys() {
        assert_eq!(PlaceCategory::Hotels.key(), "hotels");
        assert_eq!(PlaceCategory::for_interest("Street Food").key(), "street_food");
        assert_eq!(PlaceCategory::for_interest("art!").key(), "art");
        assert_eq!(PlaceCategory::for_interest("--").key(), "interest");
    }

    #[test]
    fn test_interest_search_term_uses_spaces() {
        let category = PlaceCategory::for_interest("street food");
        assert_eq!(category.search_term(), "street food");
    }

    #[test]
    fn test_snapshot_lookup() {
        let snapshot = CatalogSnapshot::new(vec![
            (
                "hotels".to_string(),
                vec![candidate("hotels_001", "hotels")],
            ),
            (
                "cafes".to_string(),
                vec![candidate("cafes_001", "cafes"), candidate("cafes_002", "cafes")],
            ),
        ]);

        assert_eq!(snapshot.total_len(), 3);
        assert!(snapshot.contains_id("cafes_002"));
        assert!(!snapshot.contains_id("cafes_003"));
        assert_eq!(snapshot.category("cafes").unwrap().len(), 2);
        assert!(snapshot.has_category("hotels"));
        assert!(!snapshot.has_category("restaurants"));
    }

    #[test]
    fn test_snapshot_preserves_group_order() {
        let snapshot = CatalogSnapshot::new(vec![
            ("hotels".to_string(), vec![]),
            ("restaurants".to_string(), vec![]),
            ("art".to_string(), vec![]),
        ]);
        let keys: Vec<&str> = snapshot.groups().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["hotels", "restaurants", "art"]);
    }
}
