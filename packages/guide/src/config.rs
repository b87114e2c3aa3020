//! # App configuration: `wanderer.toml`
//!
//! Behaviour that changes between deployments without touching code: the
//! baseline filter chips on the explore page and the option lists shown by
//! the onboarding flow. Backend credentials are not part of this file; the
//! `gateway` crate reads those from the environment.
//!
//! ```toml
//! [explore]
//! baseline_categories = ["Nature", "Culture", "Adventure", "Food", "Beach", "Heritage", "Cafes"]
//!
//! [onboarding]
//! variant = "classic"   # or "detailed"
//! travel_styles = ["Solo Traveler", "Couple", "Family", "Group of Friends"]
//! travel_paces = ["Relaxed", "Balanced", "Packed"]
//!
//! [[onboarding.categories]]
//! name = "Nature"
//! icon = "🌿"
//! description = "Mountains, lakes, and natural wonders"
//!
//! [[onboarding.districts]]
//! name = "District 1"
//! subtitle = "Coastal Wonders"
//! icon = "🐚"
//! ```
//!
//! Every section defaults, so a missing or empty file is the default
//! configuration. The classic flow takes its categories from this file; the
//! detailed flow uses the categories and subcategories stored in the backend.

use serde::{Deserialize, Serialize};

use crate::onboarding::FlowVariant;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WandererConfig {
    #[serde(default)]
    pub explore: ExploreConfig,
    #[serde(default)]
    pub onboarding: OnboardingConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExploreConfig {
    /// Category chips shown even when no fetched spot carries them.
    #[serde(default = "default_baseline_categories")]
    pub baseline_categories: Vec<String>,
}

impl Default for ExploreConfig {
    fn default() -> Self {
        Self {
            baseline_categories: default_baseline_categories(),
        }
    }
}

/// A category card in the classic onboarding flow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InterestOption {
    pub name: String,
    pub icon: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistrictOption {
    pub name: String,
    #[serde(default)]
    pub subtitle: String,
    pub icon: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OnboardingConfig {
    #[serde(default)]
    pub variant: FlowVariant,
    #[serde(default = "default_interests")]
    pub categories: Vec<InterestOption>,
    #[serde(default = "default_districts")]
    pub districts: Vec<DistrictOption>,
    #[serde(default = "default_travel_styles")]
    pub travel_styles: Vec<String>,
    #[serde(default = "default_travel_paces")]
    pub travel_paces: Vec<String>,
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            variant: FlowVariant::default(),
            categories: default_interests(),
            districts: default_districts(),
            travel_styles: default_travel_styles(),
            travel_paces: default_travel_paces(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_baseline_categories() -> Vec<String> {
    strings(&["Nature", "Culture", "Adventure", "Food", "Beach", "Heritage", "Cafes"])
}

fn default_interests() -> Vec<InterestOption> {
    [
        ("Nature", "🌿", "Mountains, lakes, and natural wonders"),
        ("Culture", "🎭", "Churches, heritage sites, and festivals"),
        ("Adventure", "🧗", "Hiking, ziplines, and outdoor activities"),
        ("Food", "🍴", "Local cuisine, cafés, and traditional dishes"),
        ("Beach", "🏖️", "Resorts, island hopping, and sunset spots"),
    ]
    .into_iter()
    .map(|(name, icon, description)| InterestOption {
        name: name.into(),
        icon: icon.into(),
        description: description.into(),
    })
    .collect()
}

fn default_districts() -> Vec<DistrictOption> {
    [
        ("District 1", "Coastal Wonders", "🐚"),
        ("District 2", "Central Adventure", "🌋"),
        ("District 3", "Countryside Escapes", "🌾"),
    ]
    .into_iter()
    .map(|(name, subtitle, icon)| DistrictOption {
        name: name.into(),
        subtitle: subtitle.into(),
        icon: icon.into(),
    })
    .collect()
}

fn default_travel_styles() -> Vec<String> {
    strings(&["Solo Traveler", "Couple", "Family", "Group of Friends"])
}

fn default_travel_paces() -> Vec<String> {
    strings(&["Relaxed", "Balanced", "Packed"])
}

impl WandererConfig {
    pub fn with_variant(mut self, variant: FlowVariant) -> Self {
        self.onboarding.variant = variant;
        self
    }

    pub fn filename() -> &'static str {
        "wanderer.toml"
    }

    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Parse `s`, falling back to the defaults when it is malformed.
    pub fn from_toml_or_default(s: &str) -> Self {
        Self::from_toml(s).unwrap_or_else(|e| {
            tracing::warn!(error = %e, file = Self::filename(), "Invalid config, using defaults");
            Self::default()
        })
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = WandererConfig::from_toml("").unwrap();
        assert_eq!(config, WandererConfig::default());
        assert_eq!(config.onboarding.variant, FlowVariant::Classic);
        assert_eq!(config.explore.baseline_categories.len(), 7);
        assert_eq!(config.onboarding.districts[1].subtitle, "Central Adventure");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = WandererConfig::from_toml(
            r#"
            [onboarding]
            variant = "detailed"
            travel_paces = ["Slow", "Fast"]
            "#,
        )
        .unwrap();
        assert_eq!(config.onboarding.variant, FlowVariant::Detailed);
        assert_eq!(config.onboarding.travel_paces, vec!["Slow", "Fast"]);
        assert_eq!(config.onboarding.categories.len(), 5);
        assert_eq!(config.explore, ExploreConfig::default());
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let config = WandererConfig::from_toml_or_default("[explore\nbaseline_categories = 3");
        assert_eq!(config, WandererConfig::default());
    }

    #[test]
    fn test_toml_round_trip_preserves_variant() {
        let config = WandererConfig::default().with_variant(FlowVariant::Detailed);
        let parsed = WandererConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }
}
