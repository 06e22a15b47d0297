//! Normalization of gourmet API envelopes into a [`ResultSet`].

use gourmet_core::Shop;
use serde::Serialize;
use serde_json::Value;

use crate::envelope::{listing, ShopResults};

/// One page of shops in upstream relevance order, plus the total number of
/// matches the upstream reports (which may exceed `shops.len()`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultSet {
    pub shops: Vec<Shop>,
    pub total_available: u64,
}

impl ResultSet {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shops.is_empty()
    }
}

/// Returns the embedded error message when `body` carries `results.error`.
///
/// A present-but-unreadable error still counts as an error and falls back to
/// `"API error"`.
#[must_use]
pub fn upstream_error(body: &Value) -> Option<String> {
    let errors = body.get("results")?.get("error")?;
    if errors.is_null() {
        return None;
    }

    let first = match errors {
        Value::Array(items) => items.first(),
        other => Some(other),
    };

    let message = first
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or("API error");

    Some(message.to_string())
}

/// Parses `results_available`, accepting a number or a numeric string.
/// Anything else counts as zero.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn parse_total(raw: Option<&Value>) -> u64 {
    match raw {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f.trunc() as u64)
            })
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Converts the `results` payload of a search response into a [`ResultSet`].
///
/// Every listed entry is kept, in upstream order. [`Shop`] tolerates missing
/// or off-type fields, so only an entry that is not an object at all decodes
/// to an empty shop, with a warning.
#[must_use]
pub fn to_result_set(results: Option<ShopResults>) -> ResultSet {
    let Some(results) = results else {
        return ResultSet::empty();
    };

    let total_available = parse_total(results.results_available.as_ref());
    let shops = listing(results.shop)
        .into_iter()
        .enumerate()
        .map(|(idx, raw)| {
            serde_json::from_value::<Shop>(raw).unwrap_or_else(|e| {
                tracing::warn!(index = idx, error = %e, "to_result_set: shop entry is not an object");
                Shop::default()
            })
        })
        .collect();

    ResultSet {
        shops,
        total_available,
    }
}
