//! Shop and master-data records as returned by the gourmet API.
//!
//! Decoding never rejects a shop over its fields: a field that is missing,
//! `null`, or of an unexpected type falls back to its default. Numbers sent
//! where text is expected (`id`, `capacity`) are kept as their decimal text.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::criteria::Amenity;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamedRef {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopUrls {
    #[serde(deserialize_with = "lenient_string")]
    pub pc: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PcPhoto {
    #[serde(deserialize_with = "lenient_string")]
    pub l: String,
    #[serde(deserialize_with = "lenient_string")]
    pub m: String,
    #[serde(deserialize_with = "lenient_string")]
    pub s: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MobilePhoto {
    #[serde(deserialize_with = "lenient_string")]
    pub l: String,
    #[serde(deserialize_with = "lenient_string")]
    pub s: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Photo {
    #[serde(deserialize_with = "lenient_struct")]
    pub pc: PcPhoto,
    #[serde(deserialize_with = "lenient_struct")]
    pub mobile: MobilePhoto,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CouponUrls {
    #[serde(deserialize_with = "lenient_string")]
    pub pc: String,
    #[serde(deserialize_with = "lenient_string")]
    pub mobile: String,
}

/// A restaurant listing.
///
/// Facility fields (`wifi`, `card`, ...) are free text such as `"あり"`,
/// `"利用可"` or `"なし"`; classify them with
/// [`AmenityKeywords`](crate::AmenityKeywords).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Shop {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub logo_image: String,
    #[serde(deserialize_with = "lenient_string")]
    pub name_kana: String,
    #[serde(deserialize_with = "lenient_string")]
    pub tel: String,
    #[serde(deserialize_with = "lenient_string")]
    pub address: String,
    #[serde(deserialize_with = "lenient_string")]
    pub station_name: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub lat: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub lng: Option<f64>,
    #[serde(deserialize_with = "lenient_struct")]
    pub genre: NamedRef,
    #[serde(deserialize_with = "lenient_struct")]
    pub budget: NamedRef,
    #[serde(deserialize_with = "lenient_string")]
    pub budget_memo: String,
    #[serde(rename = "catch", deserialize_with = "lenient_string")]
    pub catch_copy: String,
    #[serde(deserialize_with = "lenient_string")]
    pub capacity: String,
    #[serde(deserialize_with = "lenient_string")]
    pub access: String,
    #[serde(deserialize_with = "lenient_struct")]
    pub urls: ShopUrls,
    #[serde(deserialize_with = "lenient_struct")]
    pub photo: Photo,
    #[serde(deserialize_with = "lenient_string")]
    pub open: String,
    #[serde(deserialize_with = "lenient_string")]
    pub close: String,
    #[serde(deserialize_with = "lenient_string")]
    pub wifi: String,
    #[serde(deserialize_with = "lenient_string")]
    pub wedding: String,
    #[serde(deserialize_with = "lenient_string")]
    pub course: String,
    #[serde(deserialize_with = "lenient_string")]
    pub free_drink: String,
    #[serde(deserialize_with = "lenient_string")]
    pub free_food: String,
    #[serde(deserialize_with = "lenient_string")]
    pub private_room: String,
    #[serde(deserialize_with = "lenient_string")]
    pub horigotatsu: String,
    #[serde(deserialize_with = "lenient_string")]
    pub tatami: String,
    #[serde(deserialize_with = "lenient_string")]
    pub card: String,
    #[serde(deserialize_with = "lenient_string")]
    pub non_smoking: String,
    #[serde(deserialize_with = "lenient_string")]
    pub parking: String,
    #[serde(deserialize_with = "lenient_string")]
    pub barrier_free: String,
    #[serde(deserialize_with = "lenient_string")]
    pub pet: String,
    #[serde(deserialize_with = "lenient_string")]
    pub child: String,
    #[serde(deserialize_with = "lenient_string")]
    pub lunch: String,
    #[serde(deserialize_with = "lenient_string")]
    pub shop_detail_memo: String,
    #[serde(deserialize_with = "lenient_struct")]
    pub coupon_urls: CouponUrls,
}

impl Shop {
    /// Raw facility text for `amenity`, `None` when the upstream left it blank.
    #[must_use]
    pub fn amenity_text(&self, amenity: Amenity) -> Option<&str> {
        let text = match amenity {
            Amenity::Wifi => &self.wifi,
            Amenity::Wedding => &self.wedding,
            Amenity::Course => &self.course,
            Amenity::FreeDrink => &self.free_drink,
            Amenity::FreeFood => &self.free_food,
            Amenity::PrivateRoom => &self.private_room,
            Amenity::Horigotatsu => &self.horigotatsu,
            Amenity::Tatami => &self.tatami,
            Amenity::Card => &self.card,
            Amenity::NonSmoking => &self.non_smoking,
            Amenity::Parking => &self.parking,
            Amenity::BarrierFree => &self.barrier_free,
            Amenity::Pet => &self.pet,
            Amenity::Child => &self.child,
            Amenity::Lunch => &self.lunch,
        };
        let text = text.trim();
        (!text.is_empty()).then_some(text)
    }

    /// Best available image: large PC photo, then the logo.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        [self.photo.pc.l.as_str(), self.logo_image.as_str()]
            .into_iter()
            .find(|url| !url.is_empty())
    }

    /// Google Maps search link for the shop position.
    #[must_use]
    pub fn map_url(&self) -> Option<String> {
        let (lat, lng) = (self.lat?, self.lng?);
        Some(format!(
            "https://www.google.com/maps/search/?api=1&query={lat},{lng}"
        ))
    }

    /// Longer description, preferring the detail memo over the budget memo.
    #[must_use]
    pub fn memo(&self) -> Option<&str> {
        [self.shop_detail_memo.as_str(), self.budget_memo.as_str()]
            .into_iter()
            .find(|memo| !memo.trim().is_empty())
    }
}

/// Genre master entry (`genre/v1`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreMaster {
    pub code: String,
    pub name: String,
}

/// Budget master entry (`budget/v1`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetMaster {
    pub code: String,
    pub name: String,
}

/// Accepts a JSON number or a numeric string. Anything else is `None`.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Str(String),
        Other(IgnoredAny),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Some(n),
        Raw::Str(s) => s.trim().parse().ok(),
        Raw::Other(_) => None,
    })
}

/// Text field that tolerates `null`, numbers and booleans.
///
/// Numbers keep their decimal text (`"capacity": 40` becomes `"40"`); `null`
/// and non-scalar values become empty.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
        Float(f64),
        Bool(bool),
        Other(IgnoredAny),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
        Raw::Bool(b) => b.to_string(),
        Raw::Other(_) => String::new(),
    })
}

/// Nested record that falls back to its default on `null` or a non-object.
fn lenient_struct<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<T> {
        Value(T),
        Other(IgnoredAny),
    }

    Ok(match Raw::<T>::deserialize(deserializer)? {
        Raw::Value(value) => value,
        Raw::Other(_) => T::default(),
    })
}
