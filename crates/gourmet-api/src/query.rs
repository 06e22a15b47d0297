//! Search criteria to wire-format query parameters.
//!
//! Both builders are pure. Fields that are absent or empty are skipped, never
//! rejected, and amenity flags are only written when enabled: an absent flag
//! means "don't filter", not "require false".

use gourmet_core::{Amenity, SearchCriteria};

/// Ordered query parameters for one shop search, without the fixed
/// `key`/`format`/`count`/`start` pairs the client appends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShopQuery {
    pairs: Vec<(String, String)>,
}

impl ShopQuery {
    fn push(&mut self, key: &str, value: impl Into<String>) {
        self.pairs.push((key.to_owned(), value.into()));
    }

    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Builds the query for a filtered search.
///
/// Emission order: `range`, `lat`, `lng`, `keyword`, `genre`, `budget`, then
/// enabled amenity flags in [`Amenity::ALL`] order.
#[must_use]
pub fn build_query(criteria: &SearchCriteria) -> ShopQuery {
    let mut query = ShopQuery::default();

    query.push("range", criteria.range.to_string());

    if let Some(location) = criteria.location {
        query.push("lat", location.lat.to_string());
        query.push("lng", location.lng.to_string());
    }

    for (key, value) in [
        ("keyword", &criteria.keyword),
        ("genre", &criteria.genre),
        ("budget", &criteria.budget),
    ] {
        if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
            query.push(key, value);
        }
    }

    for amenity in Amenity::ALL {
        if criteria.has_amenity(amenity) {
            query.push(amenity.key(), "1");
        }
    }

    query
}

/// Builds the query for a bookmark lookup: a single comma-joined `id` list.
#[must_use]
pub fn id_query(ids: &[String]) -> ShopQuery {
    let mut query = ShopQuery::default();
    query.push("id", ids.join(","));
    query
}
