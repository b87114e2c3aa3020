//! # Domain models for the travel guide
//!
//! Typed rows for every backend table the app reads or writes. Each struct is
//! `Serialize + Deserialize` so the [`gateway`](../../gateway) client can decode
//! REST responses straight into it, and carries a `TABLE` constant naming its
//! backing table.
//!
//! | Struct | Table | Notes |
//! |--------|-------|-------|
//! | [`Category`] | `categories` | Top-level interest (Nature, Culture, ...). |
//! | [`Subcategory`] | `subcategories` | Back-references its owning category by `category_id`. |
//! | [`TouristSpot`] | `tourist_spots` | Multi-valued `category` tag set. |
//! | [`Accommodation`] | `accommodations` | Hotels and resorts. |
//! | [`Restaurant`] | `restaurants` | Single comma-separated `food_type` string. |
//! | [`Profile`] | `profiles` | Display name and onboarding flag. |
//! | [`Review`] | `reviews` | One row per rating; enriched into [`ReviewEntry`] for display. |
//!
//! Optional columns that the backend omits or returns as `null` decode to
//! `None` (or an empty `Vec` for list columns), so partially-filled rows never
//! fail to load.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A top-level interest category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
}

impl Category {
    pub const TABLE: &'static str = "categories";
}

/// A subcategory, owned by at most one [`Category`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: String,
    #[serde(default)]
    pub category_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Subcategory {
    pub const TABLE: &'static str = "subcategories";
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TouristSpot {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub municipality: Option<String>,
    /// Category tags, matched exactly (case-sensitive) by the destination filter.
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(default)]
    pub is_hidden_gem: Option<bool>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl TouristSpot {
    pub const TABLE: &'static str = "tourist_spots";

    pub fn display_location(&self) -> &str {
        display_location(self.municipality.as_deref(), &self.location)
    }

    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Accommodation {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub municipality: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub price_range: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amenities: Vec<String>,
}

impl Accommodation {
    pub const TABLE: &'static str = "accommodations";

    pub fn display_location(&self) -> &str {
        display_location(self.municipality.as_deref(), &self.location)
    }

    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub municipality: Option<String>,
    /// Comma-separated food types, e.g. `"Filipino, Grill"`.
    #[serde(default)]
    pub food_type: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub price_range: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amenities: Vec<String>,
}

impl Restaurant {
    pub const TABLE: &'static str = "restaurants";

    pub fn display_location(&self) -> &str {
        display_location(self.municipality.as_deref(), &self.location)
    }

    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    /// Food-type tokens as written: split on commas, trimmed, empties dropped.
    pub fn food_types(&self) -> impl Iterator<Item = &str> {
        self.food_type
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub onboarding_complete: bool,
}

impl Profile {
    pub const TABLE: &'static str = "profiles";
}

/// A stored review row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user_id: String,
}

impl Review {
    pub const TABLE: &'static str = "reviews";
}

/// A review with its author's display name resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct ReviewEntry {
    pub review: Review,
    pub user_name: String,
}

/// Name shown when a reviewer has no profile or no `full_name`.
pub const ANONYMOUS_REVIEWER: &str = "Anonymous";

/// A festival on the provincial events calendar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub location: String,
    /// Free-form date range as printed on the calendar: "May 1-31".
    pub date: String,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

fn display_location<'a>(municipality: Option<&'a str>, location: &'a str) -> &'a str {
    match municipality {
        Some(m) if !m.is_empty() => m,
        _ => location,
    }
}

/// Decode an explicit JSON `null` the same way as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spot_tolerates_null_columns() {
        let json = r#"{
            "id": "s1",
            "name": "Cagsawa Ruins",
            "location": "Daraga",
            "municipality": null,
            "category": null,
            "rating": null
        }"#;
        let spot: TouristSpot = serde_json::from_str(json).unwrap();
        assert!(spot.category.is_empty());
        assert_eq!(spot.rating, 0.0);
        assert_eq!(spot.display_location(), "Daraga");
        assert!(!spot.has_coordinates());
    }

    #[test]
    fn test_restaurant_food_types() {
        let r = Restaurant {
            id: "r1".into(),
            name: "A".into(),
            description: None,
            location: "Legazpi".into(),
            municipality: Some("Legazpi City".into()),
            food_type: Some("Filipino, Grill, ".into()),
            image_url: None,
            contact_number: None,
            rating: None,
            latitude: Some(13.1),
            longitude: Some(123.7),
            price_range: None,
            amenities: Vec::new(),
        };
        assert_eq!(r.food_types().collect::<Vec<_>>(), vec!["Filipino", "Grill"]);
        assert_eq!(r.display_location(), "Legazpi City");
        assert!(r.has_coordinates());
    }

    #[test]
    fn test_review_decodes_backend_timestamp() {
        let json = r#"{
            "id": "rv1",
            "rating": 4,
            "comment": null,
            "created_at": "2025-03-01T08:30:00.123456+00:00",
            "user_id": "u1"
        }"#;
        let review: Review = serde_json::from_str(json).unwrap();
        assert_eq!(review.rating, 4);
        assert!(review.comment.is_none());
    }
}
