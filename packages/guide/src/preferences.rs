//! # Preference record and onboarding payload
//!
//! [`PreferenceRecord`] accumulates the answers collected by the onboarding
//! flow. Every set-valued field is a de-duplicated list kept in selection
//! order (the order is only used for display). Toggling a present label
//! removes it, toggling an absent one appends it, so toggling twice always
//! restores the previous state.
//!
//! [`OnboardingPayload`] is the single profile update written when the flow
//! completes. The same record is stored twice, once as free-form answers and
//! once as normalized preferences.
//!
//! ## Wire shape
//!
//! Fields serialize in camelCase and empty values are omitted, so the
//! three-step flow writes exactly:
//!
//! ```json
//! { "categories": ["Nature"], "districts": ["District 1"] }
//! ```

use serde::{Deserialize, Serialize};

/// Onboarding answers collected across the steps of the flow.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceRecord {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subcategories: Vec<String>,
    #[serde(default)]
    pub districts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_pace: Option<String>,
}

impl PreferenceRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_category(&mut self, name: &str) {
        toggle(&mut self.categories, name);
    }

    pub fn toggle_subcategory(&mut self, name: &str) {
        toggle(&mut self.subcategories, name);
    }

    pub fn toggle_district(&mut self, name: &str) {
        toggle(&mut self.districts, name);
    }

    /// Set the travel style. An empty label clears it.
    pub fn set_travel_style(&mut self, style: &str) {
        self.travel_style = non_empty(style);
    }

    /// Set the travel pace. An empty label clears it.
    pub fn set_travel_pace(&mut self, pace: &str) {
        self.travel_pace = non_empty(pace);
    }

    pub fn has_category(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c == name)
    }

    pub fn has_subcategory(&self, name: &str) -> bool {
        self.subcategories.iter().any(|s| s == name)
    }

    pub fn has_district(&self, name: &str) -> bool {
        self.districts.iter().any(|d| d == name)
    }
}

fn toggle(set: &mut Vec<String>, label: &str) {
    if let Some(pos) = set.iter().position(|existing| existing == label) {
        set.remove(pos);
    } else {
        set.push(label.to_string());
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// The profile update issued once, when onboarding completes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OnboardingPayload {
    pub onboarding_complete: bool,
    pub onboarding_answers: PreferenceRecord,
    pub user_preferences: PreferenceRecord,
}

impl OnboardingPayload {
    /// Build the completion payload. Both copies carry identical content.
    pub fn from_record(record: &PreferenceRecord) -> Self {
        Self {
            onboarding_complete: true,
            onboarding_answers: record.clone(),
            user_preferences: record.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut record = PreferenceRecord::new();
        record.toggle_category("Nature");
        record.toggle_category("Beach");
        assert_eq!(record.categories, vec!["Nature", "Beach"]);

        record.toggle_category("Nature");
        assert_eq!(record.categories, vec!["Beach"]);
    }

    #[test]
    fn test_empty_style_clears() {
        let mut record = PreferenceRecord::new();
        record.set_travel_style("Family");
        assert_eq!(record.travel_style.as_deref(), Some("Family"));
        record.set_travel_style("");
        assert!(record.travel_style.is_none());
    }

    #[test]
    fn test_classic_record_wire_shape() {
        let mut record = PreferenceRecord::new();
        record.toggle_category("Nature");
        record.toggle_district("District 1");

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "categories": ["Nature"], "districts": ["District 1"] })
        );
    }

    #[test]
    fn test_detailed_record_uses_camel_case() {
        let mut record = PreferenceRecord::new();
        record.toggle_category("Nature");
        record.toggle_subcategory("Volcanoes");
        record.toggle_district("District 2");
        record.set_travel_style("Solo");
        record.set_travel_pace("Relaxed");

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["travelStyle"], "Solo");
        assert_eq!(json["travelPace"], "Relaxed");
        assert_eq!(json["subcategories"][0], "Volcanoes");
    }

    #[test]
    fn test_payload_duplicates_record() {
        let mut record = PreferenceRecord::new();
        record.toggle_category("Culture");
        let payload = OnboardingPayload::from_record(&record);
        assert!(payload.onboarding_complete);
        assert_eq!(payload.onboarding_answers, record);
        assert_eq!(payload.user_preferences, record);
    }

    proptest! {
        #[test]
        fn category_present_iff_toggled_odd_times(
            toggles in proptest::collection::vec(0usize..4, 0..40)
        ) {
            let labels = ["Nature", "Culture", "Adventure", "Beach"];
            let mut record = PreferenceRecord::new();
            for &i in &toggles {
                record.toggle_category(labels[i]);
            }
            for (i, label) in labels.iter().enumerate() {
                let count = toggles.iter().filter(|&&t| t == i).count();
                prop_assert_eq!(record.has_category(label), count % 2 == 1);
            }
            let mut deduped = record.categories.clone();
            deduped.sort();
            deduped.dedup();
            prop_assert_eq!(deduped.len(), record.categories.len());
        }
    }
}
