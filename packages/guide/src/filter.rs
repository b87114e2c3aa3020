//! # Listing filters and tag chips
//!
//! Pure functions that derive the visible subset of an already-fetched
//! collection. Nothing here is async; views recompute the result on every
//! change of the collection, the query or the selection.
//!
//! Destinations and restaurants use different tag policies:
//!
//! - **Destinations** keep a spot only if it carries *every* selected
//!   category (AND).
//! - **Restaurants** keep a restaurant if *any* of its food types is selected
//!   (OR). The [`ALL_FOOD_TYPES`] sentinel means no food-type filter.
//!
//! Chip counts are always taken over the unfiltered collection.

use std::collections::BTreeSet;

use crate::models::{Accommodation, Restaurant, Subcategory, TouristSpot};

/// Sentinel food-type chip that disables the food-type filter.
pub const ALL_FOOD_TYPES: &str = "All";

/// Fields a free-text query is matched against.
pub trait Searchable {
    fn haystacks(&self) -> Vec<&str>;

    /// Case-insensitive substring match against any haystack. Only the empty
    /// query matches everything; whitespace is matched as typed.
    fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        self.haystacks()
            .into_iter()
            .any(|h| h.to_lowercase().contains(&query))
    }
}

impl Searchable for TouristSpot {
    fn haystacks(&self) -> Vec<&str> {
        let mut out = vec![self.name.as_str()];
        out.extend(self.municipality.as_deref());
        out
    }
}

impl Searchable for Restaurant {
    fn haystacks(&self) -> Vec<&str> {
        let mut out = vec![self.name.as_str()];
        out.extend(self.municipality.as_deref());
        out.push(&self.location);
        out
    }
}

impl Searchable for Accommodation {
    fn haystacks(&self) -> Vec<&str> {
        let mut out = vec![self.name.as_str()];
        out.extend(self.municipality.as_deref());
        out.push(&self.location);
        out
    }
}

/// Selected destination categories, in the order they were picked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategorySelection {
    selected: Vec<String>,
}

impl CategorySelection {
    pub fn toggle(&mut self, category: &str) {
        if let Some(pos) = self.selected.iter().position(|c| c == category) {
            self.selected.remove(pos);
        } else {
            self.selected.push(category.to_string());
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn contains(&self, category: &str) -> bool {
        self.selected.iter().any(|c| c == category)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.selected
    }
}

/// Active food-type chips. Never empty: falls back to [`ALL_FOOD_TYPES`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FoodTypeSelection {
    active: Vec<String>,
}

impl Default for FoodTypeSelection {
    fn default() -> Self {
        Self {
            active: vec![ALL_FOOD_TYPES.to_string()],
        }
    }
}

impl FoodTypeSelection {
    pub fn toggle(&mut self, food_type: &str) {
        if food_type == ALL_FOOD_TYPES {
            *self = Self::default();
            return;
        }
        self.active.retain(|t| t != ALL_FOOD_TYPES);
        if let Some(pos) = self
            .active
            .iter()
            .position(|t| t.eq_ignore_ascii_case(food_type))
        {
            self.active.remove(pos);
        } else {
            self.active.push(food_type.to_string());
        }
        if self.active.is_empty() {
            *self = Self::default();
        }
    }

    pub fn is_all(&self) -> bool {
        self.active.iter().all(|t| t == ALL_FOOD_TYPES)
    }

    pub fn contains(&self, food_type: &str) -> bool {
        self.active.iter().any(|t| t.eq_ignore_ascii_case(food_type))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.active
    }

    fn admits(&self, restaurant: &Restaurant) -> bool {
        if self.is_all() {
            return true;
        }
        let wanted: Vec<String> = self.active.iter().map(|t| t.to_lowercase()).collect();
        restaurant
            .food_types()
            .any(|token| wanted.contains(&token.to_lowercase()))
    }
}

/// Query first, then every selected category must be present.
pub fn filter_destinations<'a>(
    spots: &'a [TouristSpot],
    query: &str,
    selected: &CategorySelection,
) -> Vec<&'a TouristSpot> {
    spots
        .iter()
        .filter(|s| s.matches_query(query))
        .filter(|s| {
            selected
                .as_slice()
                .iter()
                .all(|c| s.category.iter().any(|tag| tag == c))
        })
        .collect()
}

/// Food types first (any selected type matches), then the query.
pub fn filter_restaurants<'a>(
    restaurants: &'a [Restaurant],
    query: &str,
    selected: &FoodTypeSelection,
) -> Vec<&'a Restaurant> {
    restaurants
        .iter()
        .filter(|r| selected.admits(r))
        .filter(|r| r.matches_query(query))
        .collect()
}

pub fn filter_accommodations<'a>(
    accommodations: &'a [Accommodation],
    query: &str,
) -> Vec<&'a Accommodation> {
    accommodations
        .iter()
        .filter(|a| a.matches_query(query))
        .collect()
}

/// A filter chip with its count over the unfiltered collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagChip {
    pub label: String,
    pub count: usize,
}

/// Baseline categories, subcategory names and every tag seen on a spot,
/// de-duplicated and sorted.
pub fn category_chips(
    baseline: &[String],
    subcategories: &[Subcategory],
    spots: &[TouristSpot],
) -> Vec<TagChip> {
    let labels: BTreeSet<&str> = baseline
        .iter()
        .map(String::as_str)
        .chain(subcategories.iter().map(|s| s.name.as_str()))
        .chain(spots.iter().flat_map(|s| s.category.iter().map(String::as_str)))
        .collect();

    labels
        .into_iter()
        .map(|label| TagChip {
            label: label.to_string(),
            count: spots
                .iter()
                .filter(|s| s.category.iter().any(|tag| tag == label))
                .count(),
        })
        .collect()
}

/// `"All"` first, then food types in first-seen order.
///
/// The `"All"` chip counts every restaurant; the others count restaurants
/// listing that type.
pub fn food_type_chips(restaurants: &[Restaurant]) -> Vec<TagChip> {
    let mut labels: Vec<&str> = vec![ALL_FOOD_TYPES];
    for token in restaurants.iter().flat_map(Restaurant::food_types) {
        if !labels.contains(&token) {
            labels.push(token);
        }
    }

    labels
        .into_iter()
        .map(|label| {
            let count = if label == ALL_FOOD_TYPES {
                restaurants.len()
            } else {
                restaurants
                    .iter()
                    .filter(|r| r.food_types().any(|t| t.eq_ignore_ascii_case(label)))
                    .count()
            };
            TagChip {
                label: label.to_string(),
                count,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spot(name: &str, municipality: Option<&str>, tags: &[&str]) -> TouristSpot {
        TouristSpot {
            id: name.to_lowercase(),
            name: name.into(),
            description: None,
            location: "Albay".into(),
            municipality: municipality.map(String::from),
            category: tags.iter().map(|t| t.to_string()).collect(),
            image_url: None,
            rating: 0.0,
            is_hidden_gem: None,
            latitude: None,
            longitude: None,
        }
    }

    fn restaurant(name: &str, food_type: Option<&str>, location: &str) -> Restaurant {
        Restaurant {
            id: name.to_lowercase(),
            name: name.into(),
            description: None,
            location: location.into(),
            municipality: None,
            food_type: food_type.map(String::from),
            image_url: None,
            contact_number: None,
            rating: None,
            latitude: None,
            longitude: None,
            price_range: None,
            amenities: Vec::new(),
        }
    }

    fn names<T: Searchable>(items: Vec<&T>) -> Vec<&str> {
        items.into_iter().map(|i| i.haystacks()[0]).collect()
    }

    fn selection(tags: &[&str]) -> CategorySelection {
        let mut s = CategorySelection::default();
        for t in tags {
            s.toggle(t);
        }
        s
    }

    #[test]
    fn test_destination_categories_use_and() {
        let spots = vec![
            spot("Cagsawa", Some("Daraga"), &["Nature", "Heritage"]),
            spot("Ligñon", Some("Legazpi"), &["Adventure"]),
        ];

        let both = filter_destinations(&spots, "", &selection(&["Nature", "Heritage"]));
        assert_eq!(names(both), vec!["Cagsawa"]);

        let none = filter_destinations(&spots, "", &selection(&["Nature", "Adventure"]));
        assert!(none.is_empty());

        let all = filter_destinations(&spots, "", &CategorySelection::default());
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_destination_query_matches_name_or_municipality() {
        let spots = vec![
            spot("Cagsawa", Some("Daraga"), &["Heritage"]),
            spot("Ligñon", Some("Legazpi"), &["Adventure"]),
        ];
        assert_eq!(names(filter_destinations(&spots, "DARA", &selection(&[]))), vec!["Cagsawa"]);
        assert_eq!(names(filter_destinations(&spots, "ligñ", &selection(&[]))), vec!["Ligñon"]);
        assert!(filter_destinations(&spots, "cagsawa", &selection(&["Adventure"])).is_empty());
    }

    #[test]
    fn test_restaurant_food_types_use_or() {
        let restaurants = vec![
            restaurant("A", Some("Filipino, Grill"), "Legazpi"),
            restaurant("B", Some("Korean"), "Daraga"),
            restaurant("C", None, "Tabaco"),
        ];
        let mut sel = FoodTypeSelection::default();
        sel.toggle("Grill");
        sel.toggle("korean");

        assert_eq!(names(filter_restaurants(&restaurants, "", &sel)), vec!["A", "B"]);
        assert_eq!(names(filter_restaurants(&restaurants, "daraga", &sel)), vec!["B"]);
        assert_eq!(
            filter_restaurants(&restaurants, "", &FoodTypeSelection::default()).len(),
            3
        );
    }

    #[test]
    fn test_all_sentinel_rules() {
        let mut sel = FoodTypeSelection::default();
        assert!(sel.is_all());

        sel.toggle("Grill");
        assert_eq!(sel.as_slice(), ["Grill"]);

        sel.toggle("Korean");
        sel.toggle(ALL_FOOD_TYPES);
        assert_eq!(sel.as_slice(), [ALL_FOOD_TYPES]);

        sel.toggle("Korean");
        sel.toggle("Korean");
        assert_eq!(sel.as_slice(), [ALL_FOOD_TYPES]);
    }

    #[test]
    fn test_query_whitespace_is_not_trimmed() {
        let spots = vec![
            spot("Mayon", None, &["Nature"]),
            spot("Cagsawa Ruins", Some("Daraga"), &["Heritage"]),
        ];
        assert!(filter_destinations(&spots, "mayon ", &selection(&[])).is_empty());
        assert!(filter_destinations(&spots, "   ", &selection(&[])).is_empty());
        assert_eq!(
            names(filter_destinations(&spots, "sawa ru", &selection(&[]))),
            vec!["Cagsawa Ruins"]
        );
        assert_eq!(filter_destinations(&spots, "", &selection(&[])).len(), 2);
    }

    #[test]
    fn test_food_type_toggle_ignores_case() {
        let mut sel = FoodTypeSelection::default();
        sel.toggle("Korean");
        sel.toggle("korean");
        assert_eq!(sel.as_slice(), [ALL_FOOD_TYPES]);

        sel.toggle("Grill");
        assert!(sel.contains("GRILL"));
        sel.toggle("Korean");
        assert_eq!(sel.as_slice(), ["Grill", "Korean"]);
    }

    #[test]
    fn test_accommodation_query() {
        let stay = Accommodation {
            id: "a1".into(),
            name: "Misibis Bay".into(),
            description: None,
            location: "Cagraray Island".into(),
            municipality: Some("Bacacay".into()),
            category: Vec::new(),
            image_url: None,
            contact_number: None,
            rating: None,
            latitude: None,
            longitude: None,
            price_range: None,
            amenities: Vec::new(),
        };
        let stays = vec![stay];
        assert_eq!(filter_accommodations(&stays, "cagraray").len(), 1);
        assert_eq!(filter_accommodations(&stays, "bacacay").len(), 1);
        assert!(filter_accommodations(&stays, "tabaco").is_empty());
    }

    #[test]
    fn test_category_chips_union_sorted_with_counts() {
        let baseline = vec!["Nature".to_string(), "Beach".to_string()];
        let subcategories = vec![Subcategory {
            id: "sc1".into(),
            category_id: None,
            name: "Volcano".into(),
            description: None,
        }];
        let spots = vec![
            spot("Cagsawa", None, &["Nature", "Heritage"]),
            spot("Mayon", None, &["Nature", "Volcano"]),
        ];

        let chips = category_chips(&baseline, &subcategories, &spots);
        let labels: Vec<&str> = chips.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Beach", "Heritage", "Nature", "Volcano"]);

        let count = |label: &str| chips.iter().find(|c| c.label == label).map(|c| c.count);
        assert_eq!(count("Nature"), Some(2));
        assert_eq!(count("Beach"), Some(0));
        assert_eq!(count("Volcano"), Some(1));
    }

    #[test]
    fn test_food_type_chips_keep_first_seen_order() {
        let restaurants = vec![
            restaurant("A", Some("Filipino, Grill"), "Legazpi"),
            restaurant("B", Some("Korean, Filipino"), "Daraga"),
            restaurant("C", Some(" , "), "Tabaco"),
        ];
        let chips = food_type_chips(&restaurants);
        assert_eq!(
            chips,
            vec![
                TagChip { label: "All".into(), count: 3 },
                TagChip { label: "Filipino".into(), count: 2 },
                TagChip { label: "Grill".into(), count: 1 },
                TagChip { label: "Korean".into(), count: 1 },
            ]
        );
    }
}
