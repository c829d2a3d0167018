//! Barbershop records as served by the places API, normalized for analysis.
//!
//! The API embeds several fields (`opening_hours`, `photos`, `types`,
//! `reviews`) as JSON-encoded strings. Those are decoded here; a malformed
//! embedded field is logged and dropped rather than failing the whole load.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DataError;
use crate::geo::{GeoPoint, Located};

/// Place types that describe every listing and carry no service information.
const GENERIC_PLACE_TYPES: &[&str] = &["point_of_interest", "establishment"];

/// A barbershop row exactly as the places API returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBarbershop {
    pub place_id: Option<String>,
    /// Legacy identifier; string or number.
    pub id: Option<Value>,
    #[serde(default)]
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub address: Option<String>,
    pub business_status: Option<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    pub price_level: Option<u8>,
    /// Legacy price in euros, used when `price_level` is absent or zero.
    pub price: Option<f64>,
    pub formatted_phone_number: Option<String>,
    pub international_phone_number: Option<String>,
    pub website: Option<String>,
    pub google_maps_url: Option<String>,
    pub opening_hours: Option<Value>,
    pub photos: Option<Value>,
    pub types: Option<Value>,
    pub reviews: Option<Value>,
    pub editorial_summary: Option<String>,
    pub curbside_pickup: Option<bool>,
    pub delivery: Option<bool>,
    pub dine_in: Option<bool>,
    pub takeout: Option<bool>,
    pub reservable: Option<bool>,
    pub wheelchair_accessible: Option<bool>,
    pub utc_offset_minutes: Option<i32>,
    /// Legacy pre-computed services list.
    pub services: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amenities {
    pub curbside_pickup: bool,
    pub delivery: bool,
    pub dine_in: bool,
    pub takeout: bool,
    pub reservable: bool,
    pub wheelchair_accessible: bool,
}

/// A barbershop with defaults filled and embedded JSON decoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Barbershop {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub address: Option<String>,
    pub business_status: Option<String>,
    /// Average star rating; 0 when unrated.
    pub rating: f64,
    pub user_ratings_total: u32,
    pub price_level: u8,
    /// Effective price used for filtering and the price histogram.
    pub price: f64,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub google_maps_url: Option<String>,
    pub editorial_summary: Option<String>,
    /// `weekday_text` lines joined by newlines.
    pub opening_hours_text: Option<String>,
    /// `Some(true)` only when the API reported the shop open; otherwise unknown.
    pub is_open_now: Option<bool>,
    pub photo_reference: Option<String>,
    pub services: Vec<String>,
    pub reviews: Vec<Value>,
    pub amenities: Amenities,
    pub utc_offset_minutes: Option<i32>,
}

impl Barbershop {
    /// Places photo URL for the first photo, if the shop has one.
    #[must_use]
    pub fn photo_url(&self, api_key: &str) -> Option<String> {
        self.photo_reference.as_ref().map(|reference| {
            format!(
                "https://maps.googleapis.com/maps/api/place/photo?maxwidth=400&photo_reference={reference}&key={api_key}"
            )
        })
    }

    #[must_use]
    pub fn offers_any(&self, services: &[String]) -> bool {
        services.iter().any(|s| self.services.contains(s))
    }
}

impl Located for Barbershop {
    fn location(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// A pin a user dropped on the map to propose a new shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopLocation {
    pub lat: f64,
    pub lng: f64,
    pub name: String,
    /// Epoch milliseconds on the wire.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl Located for ShopLocation {
    fn location(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// Decode a field that the API ships as a JSON string.
///
/// Non-string values are ignored. Parse failures are logged with the shop name.
fn parse_embedded(shop_name: &str, field: &'static str, value: Option<&Value>) -> Option<Value> {
    let Some(Value::String(raw)) = value else {
        return None;
    };
    match serde_json::from_str(raw) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!(shop = %shop_name, field, error = %e, "failed to parse embedded JSON");
            None
        }
    }
}

/// Turn a place type like `"hair_care"` into a display label like `"Hair Care"`.
///
/// Underscores become spaces and every ASCII letter or digit that starts a
/// word is upper-cased.
#[must_use]
pub fn service_label(place_type: &str) -> String {
    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_';
    let mut out = String::with_capacity(place_type.len());
    let mut prev_is_word = false;
    for c in place_type.chars() {
        let c = if c == '_' { ' ' } else { c };
        if is_word(c) && !prev_is_word {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        prev_is_word = is_word(c);
    }
    out
}

fn services_from_types(types: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(types)) = types else {
        return Vec::new();
    };
    types
        .iter()
        .filter_map(Value::as_str)
        .filter(|t| !GENERIC_PLACE_TYPES.contains(t))
        .map(service_label)
        .collect()
}

fn legacy_id(id: Option<&Value>) -> Option<String> {
    match id? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Fill defaults and decode embedded JSON.
#[must_use]
pub fn normalize(raw: RawBarbershop) -> Barbershop {
    let opening_hours = parse_embedded(&raw.name, "opening_hours", raw.opening_hours.as_ref());
    let photos = parse_embedded(&raw.name, "photos", raw.photos.as_ref());
    let types = parse_embedded(&raw.name, "types", raw.types.as_ref());
    let reviews = parse_embedded(&raw.name, "reviews", raw.reviews.as_ref());

    let opening_hours_text = opening_hours
        .as_ref()
        .and_then(|h| h.get("weekday_text"))
        .and_then(Value::as_array)
        .map(|lines| {
            lines
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join("\n")
        })
        .filter(|text| !text.is_empty());

    let is_open_now = opening_hours
        .as_ref()
        .and_then(|h| h.get("open_now"))
        .and_then(Value::as_bool)
        .filter(|open| *open);

    let photo_reference = photos
        .as_ref()
        .and_then(|p| p.get(0))
        .and_then(|p| p.get("photo_reference"))
        .and_then(Value::as_str)
        .map(str::to_string);

    let mut services = services_from_types(types.as_ref());
    if services.is_empty() {
        services = raw.services.unwrap_or_default();
    }

    let price_level = raw.price_level.unwrap_or(0);
    let price = if price_level > 0 {
        f64::from(price_level)
    } else {
        raw.price.unwrap_or(0.0)
    };

    let reviews = match reviews {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    };

    let id = raw
        .place_id
        .clone()
        .filter(|p| !p.is_empty())
        .or_else(|| legacy_id(raw.id.as_ref()))
        .unwrap_or_default();

    Barbershop {
        id,
        name: raw.name,
        lat: raw.lat,
        lng: raw.lng,
        address: raw.address,
        business_status: raw.business_status,
        rating: raw.rating.unwrap_or(0.0),
        user_ratings_total: raw.user_ratings_total.unwrap_or(0),
        price_level,
        price,
        phone: raw
            .formatted_phone_number
            .or(raw.international_phone_number),
        website: raw.website,
        google_maps_url: raw.google_maps_url,
        editorial_summary: raw.editorial_summary,
        opening_hours_text,
        is_open_now,
        photo_reference,
        services,
        reviews,
        amenities: Amenities {
            curbside_pickup: raw.curbside_pickup.unwrap_or(false),
            delivery: raw.delivery.unwrap_or(false),
            dine_in: raw.dine_in.unwrap_or(false),
            takeout: raw.takeout.unwrap_or(false),
            reservable: raw.reservable.unwrap_or(false),
            wheelchair_accessible: raw.wheelchair_accessible.unwrap_or(false),
        },
        utc_offset_minutes: raw.utc_offset_minutes,
    }
}

/// Parse a places API response body (a JSON array of shops).
///
/// # Errors
///
/// Returns [`DataError::Deserialize`] if the body is not an array of shop objects.
pub fn parse_barbershops(body: &str) -> Result<Vec<Barbershop>, DataError> {
    let raw: Vec<RawBarbershop> =
        serde_json::from_str(body).map_err(|source| DataError::Deserialize {
            context: "barbershops".to_string(),
            source,
        })?;
    Ok(raw.into_iter().map(normalize).collect())
}

/// Load and normalize barbershops from a JSON file.
///
/// # Errors
///
/// Returns [`DataError`] if the file cannot be read or parsed.
pub fn load_barbershops(path: &Path) -> Result<Vec<Barbershop>, DataError> {
    let body = read_file(path)?;
    let shops = parse_barbershops(&body)?;
    tracing::debug!(path = %path.display(), count = shops.len(), "loaded barbershops");
    Ok(shops)
}

/// Load user-added shop pins from a JSON file.
///
/// # Errors
///
/// Returns [`DataError`] if the file cannot be read or parsed.
pub fn load_shop_locations(path: &Path) -> Result<Vec<ShopLocation>, DataError> {
    let body = read_file(path)?;
    serde_json::from_str(&body).map_err(|source| DataError::Deserialize {
        context: format!("shop locations in {}", path.display()),
        source,
    })
}

fn read_file(path: &Path) -> Result<String, DataError> {
    std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
#[path = "businesses_test.rs"]
mod tests;
