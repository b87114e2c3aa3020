//! The onboarding survey shown to signed-in users who have not finished it.
//!
//! The modal has no close control: it goes away only when the answers are
//! saved.

use dioxus::prelude::*;
use guide::onboarding::filtered_subcategories;
use guide::{
    Category, FlowVariant, GatewayResult, OnboardingFlow, ProfileRepository, Step, Subcategory,
    TaxonomyRepository, Transition,
};

use crate::backend::{use_config, use_fetch_scope, use_gateway};
use crate::notices::{push_notice, use_notices, NoticeLevel};

/// Backend categories for the detailed flow.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Taxonomy {
    /// The classic flow uses the configured cards instead.
    Unused,
    Loading,
    Failed(String),
    Loaded {
        categories: Vec<Category>,
        subcategories: Vec<Subcategory>,
    },
}

impl Taxonomy {
    fn from_results(
        categories: GatewayResult<Vec<Category>>,
        subcategories: GatewayResult<Vec<Subcategory>>,
    ) -> Self {
        match (categories, subcategories) {
            (Ok(categories), Ok(subcategories)) => Self::Loaded {
                categories,
                subcategories,
            },
            (Err(e), _) | (_, Err(e)) => Self::Failed(e.to_string()),
        }
    }

    fn categories(&self) -> &[Category] {
        match self {
            Self::Loaded { categories, .. } => categories,
            _ => &[],
        }
    }

    fn subcategories(&self) -> &[Subcategory] {
        match self {
            Self::Loaded { subcategories, .. } => subcategories,
            _ => &[],
        }
    }
}

/// Text shown in place of the subcategory options, if any.
fn subcategory_placeholder(taxonomy: &Taxonomy, offered: usize) -> Option<&'static str> {
    match taxonomy {
        Taxonomy::Loading => Some("Loading options..."),
        Taxonomy::Failed(_) => None,
        Taxonomy::Unused | Taxonomy::Loaded { .. } if offered == 0 => Some(
            "No specific interests for these picks. Go back and choose other interests.",
        ),
        Taxonomy::Unused | Taxonomy::Loaded { .. } => None,
    }
}

#[component]
pub fn OnboardingModal(user_id: String, on_complete: EventHandler<()>) -> Element {
    let config = use_config();
    let gateway = use_gateway();
    let scope = use_fetch_scope();
    let mut notices = use_notices();
    let variant = config.onboarding.variant;
    let mut flow = use_signal(|| OnboardingFlow::new(variant));
    let mut taxonomy = use_signal(|| {
        if variant == FlowVariant::Detailed {
            Taxonomy::Loading
        } else {
            Taxonomy::Unused
        }
    });

    // Only the detailed flow reads its options from the backend.
    let mut taxonomy_loader = use_resource({
        let gateway = gateway.clone();
        move || {
            let gateway = gateway.clone();
            let scope = scope.clone();
            async move {
                if variant != FlowVariant::Detailed {
                    return;
                }
                taxonomy.set(Taxonomy::Loading);
                let fetched = scope
                    .run(async { (gateway.list_categories().await, gateway.list_subcategories().await) })
                    .await;
                let Some((cats, subs)) = fetched else {
                    return;
                };
                let loaded = Taxonomy::from_results(cats, subs);
                if let Taxonomy::Failed(reason) = &loaded {
                    tracing::error!(error = %reason, "Error loading categories");
                    push_notice(&mut notices, NoticeLevel::Error, "Failed to load categories");
                }
                taxonomy.set(loaded);
            }
        }
    });

    let handle_primary = move |_| {
        if flow.write().advance() != Transition::Finalize {
            return;
        }
        let payload = match flow.write().begin_finalize() {
            Ok(payload) => payload,
            Err(e) => {
                push_notice(&mut notices, NoticeLevel::Warning, &e.to_string());
                return;
            }
        };
        let gateway = gateway.clone();
        let user_id = user_id.clone();
        spawn(async move {
            let outcome = gateway.update_onboarding(&user_id, &payload).await;
            if let Err(e) = &outcome {
                tracing::error!(user_id = %user_id, error = %e, "Error saving preferences");
            }
            match flow.write().finish_finalize(outcome) {
                Ok(()) => {
                    tracing::info!(user_id = %user_id, "Onboarding completed");
                    push_notice(&mut notices, NoticeLevel::Success, "Preferences saved. Welcome to Albay!");
                    on_complete.call(());
                }
                Err(e) => push_notice(&mut notices, NoticeLevel::Error, &e.to_string()),
            }
        });
    };

    let current = flow();
    let step = current.current_step();

    rsx! {
        div {
            class: "modal-backdrop",
            div {
                class: "modal-card",
                if let Some(progress) = current.progress_label() {
                    p { class: "card-subtitle", "{progress}" }
                }
                if let Taxonomy::Failed(_) = taxonomy() {
                    div {
                        class: "empty-state",
                        p { "We couldn't load the list of interests." }
                        button {
                            class: "secondary",
                            onclick: move |_| taxonomy_loader.restart(),
                            "Retry"
                        }
                    }
                }
                match step {
                    Step::Welcome => rsx! { WelcomeStep {} },
                    Step::Categories => rsx! {
                        CategoriesStep { flow: flow, taxonomy: taxonomy() }
                    },
                    Step::Subcategories => rsx! {
                        SubcategoriesStep { flow: flow, taxonomy: taxonomy() }
                    },
                    Step::Districts => rsx! { DistrictsStep { flow: flow } },
                    Step::TravelStyle => rsx! {
                        SingleChoiceStep {
                            title: "What's your travel style?",
                            options: config.onboarding.travel_styles.clone(),
                            selected: current.record().travel_style.clone(),
                            on_pick: move |choice: String| flow.write().set_travel_style(&choice),
                        }
                    },
                    Step::TravelPace => rsx! {
                        SingleChoiceStep {
                            title: "How do you like to pace your trips?",
                            options: config.onboarding.travel_paces.clone(),
                            selected: current.record().travel_pace.clone(),
                            on_pick: move |choice: String| flow.write().set_travel_pace(&choice),
                        }
                    },
                    Step::Summary => rsx! { SummaryStep { flow: flow } },
                }
                div {
                    class: "modal-actions",
                    button {
                        class: "secondary",
                        disabled: current.is_first_step() || current.is_saving(),
                        onclick: move |_| {
                            flow.write().retreat();
                        },
                        "Back"
                    }
                    button {
                        class: "primary",
                        disabled: !current.can_advance() || current.is_saving(),
                        onclick: handle_primary,
                        {current.primary_label()}
                    }
                }
            }
        }
    }
}

#[component]
fn WelcomeStep() -> Element {
    rsx! {
        h2 { "Welcome to Wanderer!" }
        p {
            "Tell us what you love and we'll help you discover the best of Albay, "
            "from the slopes of Mayon to its quiet coastal towns."
        }
    }
}

#[component]
fn CategoriesStep(flow: Signal<OnboardingFlow>, taxonomy: Taxonomy) -> Element {
    let config = use_config();
    let record = flow().record().clone();

    // The classic flow uses the configured cards; the detailed flow uses the
    // categories stored in the backend.
    let options: Vec<(String, String, String)> = if flow().variant() == FlowVariant::Detailed {
        taxonomy
            .categories()
            .iter()
            .map(|c| (c.name.clone(), c.icon.clone().unwrap_or_default(), String::new()))
            .collect()
    } else {
        config
            .onboarding
            .categories
            .into_iter()
            .map(|c| (c.name, c.icon, c.description))
            .collect()
    };

    rsx! {
        h2 { "What interests you?" }
        p { class: "card-subtitle", "Pick as many as you like." }
        if taxonomy == Taxonomy::Loading {
            p { class: "empty-state", "Loading interests..." }
        }
        div {
            class: "option-grid",
            for (name, icon, description) in options {
                button {
                    key: "{name}",
                    class: if record.has_category(&name) { "option selected" } else { "option" },
                    onclick: {
                        let name = name.clone();
                        move |_| flow.write().toggle_category(&name)
                    },
                    div { "{icon} " strong { "{name}" } }
                    if !description.is_empty() {
                        p { class: "card-subtitle", "{description}" }
                    }
                }
            }
        }
    }
}

#[component]
fn SubcategoriesStep(flow: Signal<OnboardingFlow>, taxonomy: Taxonomy) -> Element {
    let record = flow().record().clone();
    let offered: Vec<Subcategory> =
        filtered_subcategories(&record, taxonomy.subcategories(), taxonomy.categories())
            .into_iter()
            .cloned()
            .collect();
    let placeholder = subcategory_placeholder(&taxonomy, offered.len());

    rsx! {
        h2 { "Narrow it down" }
        p { class: "card-subtitle", "Which of these would you like to explore?" }
        if let Some(text) = placeholder {
            p { class: "empty-state", "{text}" }
        }
        div {
            class: "option-grid",
            for sub in offered {
                button {
                    key: "{sub.id}",
                    class: if record.has_subcategory(&sub.name) { "option selected" } else { "option" },
                    onclick: {
                        let name = sub.name.clone();
                        move |_| flow.write().toggle_subcategory(&name)
                    },
                    strong { "{sub.name}" }
                    if let Some(description) = &sub.description {
                        p { class: "card-subtitle", "{description}" }
                    }
                }
            }
        }
    }
}

#[component]
fn DistrictsStep(flow: Signal<OnboardingFlow>) -> Element {
    let config = use_config();
    let record = flow().record().clone();

    rsx! {
        h2 { "Choose Your Districts" }
        p { class: "card-subtitle", "Where in Albay would you like to go?" }
        div {
            class: "option-grid",
            for district in config.onboarding.districts {
                button {
                    key: "{district.name}",
                    class: if record.has_district(&district.name) { "option selected" } else { "option" },
                    onclick: {
                        let name = district.name.clone();
                        move |_| flow.write().toggle_district(&name)
                    },
                    div { "{district.icon}" }
                    strong { "{district.name}" }
                    p { class: "card-subtitle", "{district.subtitle}" }
                }
            }
        }
    }
}

#[component]
fn SingleChoiceStep(
    title: String,
    options: Vec<String>,
    selected: Option<String>,
    on_pick: EventHandler<String>,
) -> Element {
    rsx! {
        h2 { "{title}" }
        div {
            class: "option-grid",
            for option in options {
                button {
                    key: "{option}",
                    class: if selected.as_deref() == Some(option.as_str()) { "option selected" } else { "option" },
                    onclick: {
                        let option = option.clone();
                        move |_| on_pick.call(option.clone())
                    },
                    strong { "{option}" }
                }
            }
        }
    }
}

#[component]
fn SummaryStep(flow: Signal<OnboardingFlow>) -> Element {
    let record = flow().record().clone();
    let join = |items: &[String]| {
        if items.is_empty() {
            "None".to_string()
        } else {
            items.join(", ")
        }
    };

    rsx! {
        h2 { "You're all set" }
        p { class: "card-subtitle", "Here's what we'll use to tailor your trip." }
        dl {
            dt { "Interests" }
            dd { {join(&record.categories)} }
            dt { "Specific interests" }
            dd { {join(&record.subcategories)} }
            dt { "Districts" }
            dd { {join(&record.districts)} }
            dt { "Travel style" }
            dd { {record.travel_style.clone().unwrap_or_else(|| "None".into())} }
            dt { "Travel pace" }
            dd { {record.travel_pace.clone().unwrap_or_else(|| "None".into())} }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guide::GatewayError;

    fn category(id: &str, name: &str) -> Category {
        Category { id: id.into(), name: name.into(), icon: None }
    }

    #[test]
    fn test_either_failure_marks_taxonomy_failed() {
        let failed = Taxonomy::from_results(
            Ok(vec![category("c1", "Nature")]),
            Err(GatewayError::Network("offline".into())),
        );
        assert!(matches!(failed, Taxonomy::Failed(_)));
        assert!(failed.categories().is_empty());

        let failed = Taxonomy::from_results(Err(GatewayError::Network("offline".into())), Ok(vec![]));
        assert!(matches!(failed, Taxonomy::Failed(_)));

        let loaded = Taxonomy::from_results(Ok(vec![category("c1", "Nature")]), Ok(vec![]));
        assert_eq!(loaded.categories().len(), 1);
    }

    #[test]
    fn test_subcategory_placeholder_distinguishes_empty_from_loading() {
        assert_eq!(subcategory_placeholder(&Taxonomy::Loading, 0), Some("Loading options..."));
        assert_eq!(subcategory_placeholder(&Taxonomy::Failed("offline".into()), 0), None);

        let loaded = Taxonomy::Loaded { categories: vec![], subcategories: vec![] };
        let empty = subcategory_placeholder(&loaded, 0);
        assert!(empty.is_some_and(|text| text.starts_with("No specific interests")));
        assert_eq!(subcategory_placeholder(&loaded, 3), None);
    }
}
