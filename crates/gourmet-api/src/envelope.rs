//! Gourmet API response envelopes.
//!
//! Every endpoint wraps its payload in `{"results": {...}}`. Listings inside
//! `results` are an **object when exactly one entry matches** and an array
//! otherwise; [`OneOrMany`] captures both shapes so callers never drop a
//! single-result response.
//!
//! `results_available` is observed both as a number and as a numeric string.
//! It is kept as a raw [`serde_json::Value`] and parsed leniently in
//! [`crate::normalize`].

use gourmet_core::{BudgetMaster, GenreMaster};
use serde::Deserialize;

/// Top-level envelope shared by all endpoints.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub results: Option<T>,
}

/// A listing that is either a bare object or an array of objects.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

/// Flattens an optional listing; `None` (absent or `null`) becomes empty.
#[must_use]
pub fn listing<T>(value: Option<OneOrMany<T>>) -> Vec<T> {
    value.map(OneOrMany::into_vec).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// gourmet/v1
// ---------------------------------------------------------------------------

/// `results` payload of the shop search endpoint.
///
/// Shops stay as raw values and are decoded one at a time, so a malformed
/// entry never fails the whole page.
#[derive(Debug, Default, Deserialize)]
pub struct ShopResults {
    #[serde(default)]
    pub shop: Option<OneOrMany<serde_json::Value>>,
    #[serde(default)]
    pub results_available: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// genre/v1, budget/v1
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct GenreResults {
    #[serde(default)]
    pub genre: Option<OneOrMany<GenreMaster>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BudgetResults {
    #[serde(default)]
    pub budget: Option<OneOrMany<BudgetMaster>>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn one_or_many_accepts_object() {
        let parsed: OneOrMany<serde_json::Value> =
            serde_json::from_value(json!({"id": "A"})).unwrap();
        assert_eq!(parsed.into_vec(), vec![json!({"id": "A"})]);
    }

    #[test]
    fn one_or_many_accepts_array() {
        let parsed: OneOrMany<serde_json::Value> =
            serde_json::from_value(json!([{"id": "A"}, {"id": "B"}])).unwrap();
        assert_eq!(parsed.into_vec().len(), 2);
    }

    #[test]
    fn null_listing_is_empty() {
        let parsed: ShopResults = serde_json::from_value(json!({"shop": null})).unwrap();
        assert!(listing(parsed.shop).is_empty());
    }

    #[test]
    fn envelope_without_results_is_none() {
        let parsed: Envelope<ShopResults> = serde_json::from_value(json!({})).unwrap();
        assert!(parsed.results.is_none());
    }

    #[test]
    fn genre_listing_single_object() {
        let parsed: GenreResults =
            serde_json::from_value(json!({"genre": {"code": "G001", "name": "Izakaya"}}))
                .unwrap();
        let genres = listing(parsed.genre);
        assert_eq!(genres.len(), 1);
        assert_eq!(genres[0].code, "G001");
    }
}
