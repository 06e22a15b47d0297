//! User-facing search filters.
//!
//! [`SearchCriteria`] is what a fresh search is issued with. Its invariants
//! are carried by the types: the radius is a validated [`SearchRange`] and the
//! location is a single `Option<Coordinates>`, so a latitude can never be sent
//! without its longitude.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// A WGS84 position as reported by the geolocation capability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Search radius tier accepted by the gourmet API (`range=1..=5`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SearchRange(u8);

impl SearchRange {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Validates a raw tier.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRange`] when `tier` is outside `1..=5`.
    pub fn new(tier: u8) -> Result<Self, CoreError> {
        if (Self::MIN..=Self::MAX).contains(&tier) {
            Ok(Self(tier))
        } else {
            Err(CoreError::InvalidRange(tier))
        }
    }

    #[must_use]
    pub fn tier(self) -> u8 {
        self.0
    }

    /// Radius in metres covered by this tier.
    #[must_use]
    pub fn metres(self) -> u32 {
        match self.0 {
            1 => 300,
            2 => 500,
            3 => 1_000,
            4 => 2_000,
            _ => 3_000,
        }
    }
}

impl Default for SearchRange {
    /// Tier 3 (1000 m).
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<u8> for SearchRange {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SearchRange> for u8 {
    fn from(range: SearchRange) -> Self {
        range.0
    }
}

impl std::fmt::Display for SearchRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Facility filters understood by the gourmet API.
///
/// Declaration order is the order flags are written into a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Amenity {
    Wifi,
    Wedding,
    Course,
    FreeDrink,
    FreeFood,
    PrivateRoom,
    Horigotatsu,
    Tatami,
    Card,
    NonSmoking,
    Parking,
    BarrierFree,
    Pet,
    Child,
    Lunch,
}

impl Amenity {
    pub const ALL: [Amenity; 15] = [
        Amenity::Wifi,
        Amenity::Wedding,
        Amenity::Course,
        Amenity::FreeDrink,
        Amenity::FreeFood,
        Amenity::PrivateRoom,
        Amenity::Horigotatsu,
        Amenity::Tatami,
        Amenity::Card,
        Amenity::NonSmoking,
        Amenity::Parking,
        Amenity::BarrierFree,
        Amenity::Pet,
        Amenity::Child,
        Amenity::Lunch,
    ];

    /// Wire key, identical to the shop field carrying the facility text.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Amenity::Wifi => "wifi",
            Amenity::Wedding => "wedding",
            Amenity::Course => "course",
            Amenity::FreeDrink => "free_drink",
            Amenity::FreeFood => "free_food",
            Amenity::PrivateRoom => "private_room",
            Amenity::Horigotatsu => "horigotatsu",
            Amenity::Tatami => "tatami",
            Amenity::Card => "card",
            Amenity::NonSmoking => "non_smoking",
            Amenity::Parking => "parking",
            Amenity::BarrierFree => "barrier_free",
            Amenity::Pet => "pet",
            Amenity::Child => "child",
            Amenity::Lunch => "lunch",
        }
    }

    /// Human-readable label for listings.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Amenity::Wifi => "Wi-Fi",
            Amenity::Wedding => "Wedding party",
            Amenity::Course => "Course menu",
            Amenity::FreeDrink => "All-you-can-drink",
            Amenity::FreeFood => "All-you-can-eat",
            Amenity::PrivateRoom => "Private room",
            Amenity::Horigotatsu => "Horigotatsu",
            Amenity::Tatami => "Tatami seating",
            Amenity::Card => "Cards accepted",
            Amenity::NonSmoking => "Non-smoking",
            Amenity::Parking => "Parking",
            Amenity::BarrierFree => "Barrier-free",
            Amenity::Pet => "Pets allowed",
            Amenity::Child => "Children welcome",
            Amenity::Lunch => "Lunch",
        }
    }
}

impl std::fmt::Display for Amenity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Amenity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Amenity::ALL
            .into_iter()
            .find(|a| a.key() == s)
            .ok_or_else(|| CoreError::UnknownAmenity(s.to_owned()))
    }
}

/// Filters for a fresh shop search.
///
/// Amenities are a set of *enabled* flags; a flag that is not in the set is
/// not filtered on at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub keyword: Option<String>,
    pub location: Option<Coordinates>,
    pub range: SearchRange,
    pub genre: Option<String>,
    pub budget: Option<String>,
    pub amenities: BTreeSet<Amenity>,
}

impl SearchCriteria {
    #[must_use]
    pub fn new(range: SearchRange) -> Self {
        Self {
            range,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_location(mut self, location: Coordinates) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    #[must_use]
    pub fn with_genre(mut self, code: impl Into<String>) -> Self {
        self.genre = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_budget(mut self, code: impl Into<String>) -> Self {
        self.budget = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_amenity(mut self, amenity: Amenity) -> Self {
        self.amenities.insert(amenity);
        self
    }

    #[must_use]
    pub fn has_amenity(&self, amenity: Amenity) -> bool {
        self.amenities.contains(&amenity)
    }
}
