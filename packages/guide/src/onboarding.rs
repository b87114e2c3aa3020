//! # Onboarding flow controller
//!
//! A linear wizard that walks a new user through a fixed sequence of
//! [`Step`]s, gates forward navigation on the current step's answers, and
//! finishes with exactly one profile write.
//!
//! ## Variants
//!
//! | Variant | Steps |
//! |---------|-------|
//! | [`FlowVariant::Classic`] | Welcome → Categories → Districts |
//! | [`FlowVariant::Detailed`] | Categories → Subcategories → Districts → Travel style → Travel pace → Summary |
//!
//! ## State machine
//!
//! States are the 1-based step indices plus a terminal `completed` state.
//! [`advance`](OnboardingFlow::advance) moves `+1` when the current step is
//! satisfied; on the last step it reports [`Transition::Finalize`] instead,
//! and only a successful write (see [`finish_finalize`](OnboardingFlow::finish_finalize))
//! reaches `completed`. [`retreat`](OnboardingFlow::retreat) moves `-1` and
//! never touches collected answers. Answers gate *whether* a move is allowed,
//! never *where* it goes.
//!
//! ## Finalizing from a UI
//!
//! A component cannot hold `&mut OnboardingFlow` across an `await`, so the
//! write is split in two: [`begin_finalize`](OnboardingFlow::begin_finalize)
//! sets the busy flag and yields the payload, the caller performs the write,
//! and [`finish_finalize`](OnboardingFlow::finish_finalize) records the
//! outcome. [`finalize`](OnboardingFlow::finalize) does all three for callers
//! that own the flow outright.

use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, OnboardingError};
use crate::gateway::ProfileRepository;
use crate::models::{Category, Subcategory};
use crate::preferences::{OnboardingPayload, PreferenceRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Welcome,
    Categories,
    Subcategories,
    Districts,
    TravelStyle,
    TravelPace,
    Summary,
}

impl Step {
    pub fn label(self) -> &'static str {
        match self {
            Self::Welcome => "Welcome",
            Self::Categories => "Interests",
            Self::Subcategories => "Specific Interests",
            Self::Districts => "Districts",
            Self::TravelStyle => "Travel Style",
            Self::TravelPace => "Travel Pace",
            Self::Summary => "Summary",
        }
    }

    /// Whether the answers in `record` satisfy this step.
    pub fn is_satisfied(self, record: &PreferenceRecord) -> bool {
        match self {
            Self::Welcome | Self::Summary => true,
            Self::Categories => !record.categories.is_empty(),
            Self::Subcategories => !record.subcategories.is_empty(),
            Self::Districts => !record.districts.is_empty(),
            Self::TravelStyle => record.travel_style.is_some(),
            Self::TravelPace => record.travel_pace.is_some(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowVariant {
    #[default]
    Classic,
    Detailed,
}

const CLASSIC_STEPS: &[Step] = &[Step::Welcome, Step::Categories, Step::Districts];

const DETAILED_STEPS: &[Step] = &[
    Step::Categories,
    Step::Subcategories,
    Step::Districts,
    Step::TravelStyle,
    Step::TravelPace,
    Step::Summary,
];

impl FlowVariant {
    pub fn steps(self) -> &'static [Step] {
        match self {
            Self::Classic => CLASSIC_STEPS,
            Self::Detailed => DETAILED_STEPS,
        }
    }
}

/// Outcome of [`OnboardingFlow::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Moved forward; carries the new 1-based step index.
    Moved(usize),
    /// On the last step with valid answers: the caller should finalize.
    Finalize,
    /// Current answers don't satisfy the step, or a save is in flight.
    Blocked,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OnboardingFlow {
    variant: FlowVariant,
    step: usize,
    record: PreferenceRecord,
    saving: bool,
    completed: bool,
}

impl OnboardingFlow {
    pub fn new(variant: FlowVariant) -> Self {
        Self {
            variant,
            step: 1,
            record: PreferenceRecord::new(),
            saving: false,
            completed: false,
        }
    }

    pub fn variant(&self) -> FlowVariant {
        self.variant
    }

    /// Current 1-based step index.
    pub fn step_index(&self) -> usize {
        self.step
    }

    pub fn total_steps(&self) -> usize {
        self.variant.steps().len()
    }

    pub fn current_step(&self) -> Step {
        self.variant.steps()[self.step - 1]
    }

    pub fn is_first_step(&self) -> bool {
        self.step == 1
    }

    pub fn is_final_step(&self) -> bool {
        self.step == self.total_steps()
    }

    pub fn record(&self) -> &PreferenceRecord {
        &self.record
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn can_advance(&self) -> bool {
        self.current_step().is_satisfied(&self.record)
    }

    pub fn advance(&mut self) -> Transition {
        if self.saving || self.completed || !self.can_advance() {
            return Transition::Blocked;
        }
        if self.is_final_step() {
            return Transition::Finalize;
        }
        self.step += 1;
        Transition::Moved(self.step)
    }

    /// Step back once. Returns `false` (and does nothing) on the first step
    /// or while saving.
    pub fn retreat(&mut self) -> bool {
        if self.saving || self.completed || self.step <= 1 {
            return false;
        }
        self.step -= 1;
        true
    }

    pub fn toggle_category(&mut self, name: &str) {
        self.record.toggle_category(name);
    }

    pub fn toggle_subcategory(&mut self, name: &str) {
        self.record.toggle_subcategory(name);
    }

    pub fn toggle_district(&mut self, name: &str) {
        self.record.toggle_district(name);
    }

    pub fn set_travel_style(&mut self, style: &str) {
        self.record.set_travel_style(style);
    }

    pub fn set_travel_pace(&mut self, pace: &str) {
        self.record.set_travel_pace(pace);
    }

    /// Mark the flow busy and produce the payload to write.
    pub fn begin_finalize(&mut self) -> Result<OnboardingPayload, OnboardingError> {
        if self.completed {
            return Err(OnboardingError::AlreadyCompleted);
        }
        if self.saving {
            return Err(OnboardingError::Busy);
        }
        if !self.is_final_step() {
            return Err(OnboardingError::NotOnFinalStep);
        }
        if let Some(step) = self
            .variant
            .steps()
            .iter()
            .copied()
            .find(|s| !s.is_satisfied(&self.record))
        {
            return Err(OnboardingError::Incomplete(step));
        }
        self.saving = true;
        Ok(OnboardingPayload::from_record(&self.record))
    }

    /// Record the result of the write started by [`begin_finalize`](Self::begin_finalize).
    ///
    /// On failure the flow stays on the final step with the busy flag cleared
    /// so the user can retry.
    pub fn finish_finalize(
        &mut self,
        outcome: Result<(), GatewayError>,
    ) -> Result<(), OnboardingError> {
        self.saving = false;
        match outcome {
            Ok(()) => {
                self.completed = true;
                Ok(())
            }
            Err(e) => Err(OnboardingError::Save(e)),
        }
    }

    /// Write the completed answers to the user's profile.
    pub async fn finalize<P: ProfileRepository>(
        &mut self,
        profiles: &P,
        user_id: &str,
    ) -> Result<(), OnboardingError> {
        let payload = self.begin_finalize()?;
        let outcome = profiles.update_onboarding(user_id, &payload).await;
        match &outcome {
            Ok(()) => tracing::info!(
                user_id,
                variant = ?self.variant,
                categories = payload.user_preferences.categories.len(),
                districts = payload.user_preferences.districts.len(),
                "Onboarding completed"
            ),
            Err(e) => tracing::error!(user_id, error = %e, "Error saving preferences"),
        }
        self.finish_finalize(outcome)
    }

    /// Text for the forward button.
    pub fn primary_label(&self) -> &'static str {
        if self.saving {
            "Saving..."
        } else if self.current_step() == Step::Welcome {
            "Start Onboarding"
        } else if self.is_final_step() {
            "Explore Albay"
        } else {
            "Continue"
        }
    }

    /// "Step k of M", counting only the question steps. `None` on the welcome screen.
    pub fn progress_label(&self) -> Option<String> {
        if self.current_step() == Step::Welcome {
            return None;
        }
        let steps = self.variant.steps();
        let questions: Vec<&Step> = steps.iter().filter(|s| **s != Step::Welcome).collect();
        let position = steps[..self.step]
            .iter()
            .filter(|s| **s != Step::Welcome)
            .count();
        Some(format!("Step {position} of {}", questions.len()))
    }
}

/// Subcategories to offer given the categories picked so far.
///
/// With no category selected every subcategory is offered; otherwise only
/// those whose owning category (matched by name) was picked.
pub fn filtered_subcategories<'a>(
    record: &PreferenceRecord,
    subcategories: &'a [Subcategory],
    categories: &[Category],
) -> Vec<&'a Subcategory> {
    if record.categories.is_empty() {
        return subcategories.iter().collect();
    }
    let selected_ids: Vec<&str> = categories
        .iter()
        .filter(|c| record.has_category(&c.name))
        .map(|c| c.id.as_str())
        .collect();
    subcategories
        .iter()
        .filter(|s| {
            s.category_id
                .as_deref()
                .is_some_and(|id| selected_ids.contains(&id))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryGateway;

    fn detailed_on_final_step() -> OnboardingFlow {
        let mut flow = OnboardingFlow::new(FlowVariant::Detailed);
        flow.toggle_category("Nature");
        assert_eq!(flow.advance(), Transition::Moved(2));
        flow.toggle_subcategory("Volcanoes");
        assert_eq!(flow.advance(), Transition::Moved(3));
        flow.toggle_district("District 2");
        assert_eq!(flow.advance(), Transition::Moved(4));
        flow.set_travel_style("Solo");
        assert_eq!(flow.advance(), Transition::Moved(5));
        flow.set_travel_pace("Relaxed");
        assert_eq!(flow.advance(), Transition::Moved(6));
        flow
    }

    #[test]
    fn test_classic_sequence() {
        let mut flow = OnboardingFlow::new(FlowVariant::Classic);
        assert_eq!(flow.total_steps(), 3);
        assert_eq!(flow.current_step(), Step::Welcome);
        assert!(flow.can_advance());
        assert_eq!(flow.primary_label(), "Start Onboarding");
        assert_eq!(flow.progress_label(), None);

        assert_eq!(flow.advance(), Transition::Moved(2));
        assert!(!flow.can_advance());
        assert_eq!(flow.advance(), Transition::Blocked);
        assert_eq!(flow.progress_label().as_deref(), Some("Step 1 of 2"));

        flow.toggle_category("Beach");
        assert_eq!(flow.advance(), Transition::Moved(3));
        assert_eq!(flow.primary_label(), "Explore Albay");
        assert_eq!(flow.advance(), Transition::Blocked);

        flow.toggle_district("District 1");
        assert_eq!(flow.advance(), Transition::Finalize);
        assert_eq!(flow.step_index(), 3);
    }

    #[test]
    fn test_subcategory_gate_ignores_other_fields() {
        let mut flow = OnboardingFlow::new(FlowVariant::Detailed);
        flow.toggle_category("Nature");
        flow.advance();
        assert_eq!(flow.current_step(), Step::Subcategories);

        flow.toggle_district("District 1");
        flow.set_travel_style("Family");
        flow.set_travel_pace("Packed");
        assert!(!flow.can_advance());

        flow.toggle_subcategory("Volcanoes");
        assert!(flow.can_advance());

        flow.toggle_category("Nature");
        assert!(flow.can_advance());
    }

    #[test]
    fn test_style_and_pace_gates_block_until_chosen() {
        let mut flow = OnboardingFlow::new(FlowVariant::Detailed);
        flow.toggle_category("Nature");
        flow.advance();
        flow.toggle_subcategory("Volcanoes");
        flow.advance();
        flow.toggle_district("District 2");
        assert_eq!(flow.advance(), Transition::Moved(4));

        assert_eq!(flow.current_step(), Step::TravelStyle);
        assert!(!flow.can_advance());
        assert_eq!(flow.advance(), Transition::Blocked);
        assert_eq!(flow.step_index(), 4);
        flow.set_travel_style("Couple");
        assert_eq!(flow.advance(), Transition::Moved(5));

        assert_eq!(flow.current_step(), Step::TravelPace);
        assert!(!flow.can_advance());
        assert_eq!(flow.advance(), Transition::Blocked);
        assert_eq!(flow.step_index(), 5);
        flow.set_travel_pace("Balanced");
        assert_eq!(flow.advance(), Transition::Moved(6));

        assert_eq!(flow.current_step(), Step::Summary);
        assert_eq!(flow.advance(), Transition::Finalize);
        assert_eq!(flow.step_index(), 6);
        assert!(!flow.is_saving());
        assert!(!flow.is_completed());
    }

    #[test]
    fn test_retreat_keeps_answers() {
        let mut flow = OnboardingFlow::new(FlowVariant::Classic);
        assert!(!flow.retreat());
        flow.advance();
        flow.toggle_category("Culture");
        flow.advance();
        flow.toggle_district("District 3");

        assert!(flow.retreat());
        assert!(flow.retreat());
        assert!(!flow.retreat());
        assert_eq!(flow.step_index(), 1);
        assert_eq!(flow.record().categories, vec!["Culture"]);
        assert_eq!(flow.record().districts, vec!["District 3"]);
    }

    #[test]
    fn test_detailed_progress_counts_all_steps() {
        let flow = detailed_on_final_step();
        assert_eq!(flow.current_step(), Step::Summary);
        assert_eq!(flow.progress_label().as_deref(), Some("Step 6 of 6"));
    }

    #[test]
    fn test_begin_finalize_off_final_step() {
        let mut flow = OnboardingFlow::new(FlowVariant::Classic);
        assert_eq!(flow.begin_finalize(), Err(OnboardingError::NotOnFinalStep));
        assert!(!flow.is_saving());
    }

    #[test]
    fn test_busy_blocks_navigation() {
        let mut flow = detailed_on_final_step();
        flow.begin_finalize().unwrap();
        assert!(flow.is_saving());
        assert_eq!(flow.primary_label(), "Saving...");
        assert_eq!(flow.advance(), Transition::Blocked);
        assert!(!flow.retreat());
        assert_eq!(flow.begin_finalize(), Err(OnboardingError::Busy));
    }

    #[tokio::test]
    async fn test_finalize_success_completes() {
        let gateway = MemoryGateway::new();
        gateway.add_profile("u1", Some("Juan"));
        let mut flow = detailed_on_final_step();

        flow.finalize(&gateway, "u1").await.unwrap();

        assert!(flow.is_completed());
        assert!(!flow.is_saving());
        let saved = gateway.onboarding_payload("u1").unwrap();
        assert!(saved.onboarding_complete);
        assert_eq!(saved.user_preferences.travel_pace.as_deref(), Some("Relaxed"));
        assert_eq!(gateway.onboarding_writes(), 1);
    }

    #[tokio::test]
    async fn test_finalize_failure_stays_on_final_step() {
        let gateway = MemoryGateway::new();
        gateway.fail_writes(true);
        let mut flow = detailed_on_final_step();

        let err = flow.finalize(&gateway, "u1").await.unwrap_err();

        assert!(matches!(err, OnboardingError::Save(GatewayError::Network(_))));
        assert_eq!(flow.step_index(), 6);
        assert!(!flow.is_saving());
        assert!(!flow.is_completed());

        gateway.fail_writes(false);
        flow.finalize(&gateway, "u1").await.unwrap();
        assert!(flow.is_completed());
    }

    #[test]
    fn test_filtered_subcategories() {
        let categories = vec![
            Category { id: "c1".into(), name: "Nature".into(), icon: None },
            Category { id: "c2".into(), name: "Culture".into(), icon: None },
        ];
        let sub = |id: &str, cat: Option<&str>| Subcategory {
            id: id.into(),
            category_id: cat.map(String::from),
            name: id.to_uppercase(),
            description: None,
        };
        let subcategories = vec![sub("volcano", Some("c1")), sub("church", Some("c2")), sub("misc", None)];

        let mut record = PreferenceRecord::new();
        assert_eq!(filtered_subcategories(&record, &subcategories, &categories).len(), 3);

        record.toggle_category("Nature");
        let offered = filtered_subcategories(&record, &subcategories, &categories);
        assert_eq!(offered.len(), 1);
        assert_eq!(offered[0].id, "volcano");
    }
}
