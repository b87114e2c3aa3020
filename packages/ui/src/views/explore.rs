use dioxus::prelude::*;
use guide::filter::{
    category_chips, filter_accommodations, filter_destinations, filter_restaurants,
    food_type_chips, CategorySelection, FoodTypeSelection,
};
use guide::{
    Accommodation, AccommodationRepository, ProfileRepository, Restaurant, RestaurantRepository,
    SpotRepository, Subcategory, TaxonomyRepository, TouristSpot,
};

use crate::auth::use_auth;
use crate::backend::{use_config, use_fetch_scope, use_gateway};
use crate::icons::{FaLocationDot, FaMagnifyingGlass};
use crate::notices::{push_notice, use_notices, NoticeLevel};
use crate::onboarding_modal::OnboardingModal;
use crate::reviews::StarRating;
use crate::Icon;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExploreTab {
    #[default]
    Destinations,
    Restaurants,
    Accommodations,
}

impl ExploreTab {
    const ALL: [ExploreTab; 3] = [Self::Destinations, Self::Restaurants, Self::Accommodations];

    fn label(self) -> &'static str {
        match self {
            Self::Destinations => "Destinations",
            Self::Restaurants => "Restaurants",
            Self::Accommodations => "Accommodations",
        }
    }
}

/// Listings for the whole province, with the onboarding survey on top for
/// signed-in users who have not taken it yet.
#[component]
pub fn ExploreView(
    on_open_spot: EventHandler<String>,
    on_open_accommodation: EventHandler<String>,
    on_open_restaurant: EventHandler<String>,
    #[props(default)] initial_tab: ExploreTab,
) -> Element {
    let gateway = use_gateway();
    let scope = use_fetch_scope();
    let auth = use_auth();
    let mut notices = use_notices();

    let mut tab = use_signal(|| initial_tab);
    let mut loading = use_signal(|| true);
    let mut spots = use_signal(Vec::<TouristSpot>::new);
    let mut restaurants = use_signal(Vec::<Restaurant>::new);
    let mut accommodations = use_signal(Vec::<Accommodation>::new);
    let mut subcategories = use_signal(Vec::<Subcategory>::new);
    let mut needs_onboarding = use_signal(|| false);

    let _listings = use_resource({
        let gateway = gateway.clone();
        let scope = scope.clone();
        move || {
            let gateway = gateway.clone();
            let scope = scope.clone();
            async move {
                let fetched = scope
                    .run(async {
                        (
                            gateway.list_spots().await,
                            gateway.list_restaurants().await,
                            gateway.list_accommodations().await,
                            gateway.list_subcategories().await,
                        )
                    })
                    .await;
                let Some((spot_rows, restaurant_rows, accommodation_rows, subcategory_rows)) =
                    fetched
                else {
                    return;
                };

                match spot_rows {
                    Ok(rows) => spots.set(rows),
                    Err(e) => {
                        tracing::error!(error = %e, "Error fetching tourist spots");
                        push_notice(&mut notices, NoticeLevel::Error, "Failed to load destinations");
                    }
                }
                match restaurant_rows {
                    Ok(rows) => restaurants.set(rows),
                    Err(e) => {
                        tracing::error!(error = %e, "Error fetching restaurants");
                        push_notice(&mut notices, NoticeLevel::Error, "Failed to load restaurants");
                    }
                }
                match accommodation_rows {
                    Ok(rows) => accommodations.set(rows),
                    Err(e) => {
                        tracing::error!(error = %e, "Error fetching accommodations");
                        push_notice(&mut notices, NoticeLevel::Error, "Failed to load accommodations");
                    }
                }
                // Chips still work from the baseline and the spot tags.
                match subcategory_rows {
                    Ok(rows) => subcategories.set(rows),
                    Err(e) => tracing::warn!(error = %e, "Error fetching subcategories"),
                }
                loading.set(false);
            }
        }
    });

    let _onboarding = use_resource(move || {
        let user_id = auth().user_id().map(str::to_string);
        let gateway = gateway.clone();
        let scope = scope.clone();
        async move {
            let Some(user_id) = user_id else {
                needs_onboarding.set(false);
                return;
            };
            let Some(result) = scope.run(gateway.onboarding_complete(&user_id)).await else {
                return;
            };
            match result {
                Ok(complete) => needs_onboarding.set(!complete),
                Err(e) => tracing::warn!(user_id = %user_id, error = %e, "Error checking onboarding status"),
            }
        }
    });

    let state = auth();

    rsx! {
        div {
            class: "page",
            h1 { "Explore Albay" }
            div {
                class: "tabs",
                for each in ExploreTab::ALL {
                    button {
                        key: "{each:?}",
                        class: if tab() == each { "tab active" } else { "tab" },
                        onclick: move |_| tab.set(each),
                        {each.label()}
                    }
                }
            }
            match tab() {
                ExploreTab::Destinations => rsx! {
                    DestinationsTab {
                        spots: spots(),
                        subcategories: subcategories(),
                        loading: loading(),
                        on_open: on_open_spot,
                    }
                },
                ExploreTab::Restaurants => rsx! {
                    RestaurantsTab {
                        restaurants: restaurants(),
                        loading: loading(),
                        on_open: on_open_restaurant,
                    }
                },
                ExploreTab::Accommodations => rsx! {
                    AccommodationsTab {
                        accommodations: accommodations(),
                        loading: loading(),
                        on_open: on_open_accommodation,
                    }
                },
            }
        }
        if let Some(user_id) = state.user_id().filter(|_| needs_onboarding()) {
            OnboardingModal {
                user_id: user_id.to_string(),
                on_complete: move |_| needs_onboarding.set(false),
            }
        }
    }
}

#[component]
fn SearchBox(placeholder: String, query: Signal<String>) -> Element {
    let mut query = query;
    rsx! {
        div {
            class: "search-row",
            Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
            input {
                class: "search-box",
                r#type: "search",
                placeholder: "{placeholder}",
                value: query(),
                oninput: move |evt| query.set(evt.value()),
            }
        }
    }
}

#[component]
fn DestinationsTab(
    spots: Vec<TouristSpot>,
    subcategories: Vec<Subcategory>,
    loading: bool,
    on_open: EventHandler<String>,
) -> Element {
    let config = use_config();
    let query = use_signal(String::new);
    let mut selected = use_signal(CategorySelection::default);

    let chips = category_chips(&config.explore.baseline_categories, &subcategories, &spots);
    let selection = selected();
    let visible: Vec<TouristSpot> = filter_destinations(&spots, &query(), &selection)
        .into_iter()
        .cloned()
        .collect();
    let total = spots.len();

    rsx! {
        SearchBox { placeholder: "Search destinations or municipalities", query: query }
        div {
            class: "chips",
            button {
                class: if selection.is_empty() { "chip active" } else { "chip" },
                onclick: move |_| selected.write().clear(),
                "All ({total})"
            }
            for chip in chips {
                button {
                    key: "{chip.label}",
                    class: if selection.contains(&chip.label) { "chip active" } else { "chip" },
                    onclick: {
                        let label = chip.label.clone();
                        move |_| selected.write().toggle(&label)
                    },
                    "{chip.label} ({chip.count})"
                }
            }
        }
        if loading {
            p { class: "empty-state", "Loading destinations..." }
        } else if visible.is_empty() {
            p { class: "empty-state", "No destinations found" }
        } else {
            div {
                class: "card-grid",
                for spot in visible {
                    ListingCard {
                        key: "{spot.id}",
                        id: spot.id.clone(),
                        name: spot.name.clone(),
                        location: spot.display_location().to_string(),
                        image_url: spot.image_url.clone(),
                        rating: Some(spot.rating).filter(|r| *r > 0.0),
                        badges: spot.category.clone(),
                        highlight: spot.is_hidden_gem.unwrap_or(false).then(|| "Hidden Gem".to_string()),
                        on_open: on_open,
                    }
                }
            }
        }
    }
}

#[component]
fn RestaurantsTab(
    restaurants: Vec<Restaurant>,
    loading: bool,
    on_open: EventHandler<String>,
) -> Element {
    let query = use_signal(String::new);
    let mut selected = use_signal(FoodTypeSelection::default);

    let chips = food_type_chips(&restaurants);
    let selection = selected();
    let visible: Vec<Restaurant> = filter_restaurants(&restaurants, &query(), &selection)
        .into_iter()
        .cloned()
        .collect();

    rsx! {
        SearchBox { placeholder: "Search restaurants or municipalities", query: query }
        div {
            class: "chips",
            for chip in chips {
                button {
                    key: "{chip.label}",
                    class: if selection.contains(&chip.label) { "chip active" } else { "chip" },
                    onclick: {
                        let label = chip.label.clone();
                        move |_| selected.write().toggle(&label)
                    },
                    "{chip.label} ({chip.count})"
                }
            }
        }
        if loading {
            p { class: "empty-state", "Loading restaurants..." }
        } else if visible.is_empty() {
            p { class: "empty-state", "No restaurants found" }
        } else {
            div {
                class: "card-grid",
                for restaurant in visible {
                    ListingCard {
                        key: "{restaurant.id}",
                        id: restaurant.id.clone(),
                        name: restaurant.name.clone(),
                        location: restaurant.display_location().to_string(),
                        image_url: restaurant.image_url.clone(),
                        rating: restaurant.rating,
                        badges: restaurant.food_types().map(str::to_string).collect::<Vec<_>>(),
                        highlight: restaurant.price_range.clone(),
                        on_open: on_open,
                    }
                }
            }
        }
    }
}

#[component]
fn AccommodationsTab(
    accommodations: Vec<Accommodation>,
    loading: bool,
    on_open: EventHandler<String>,
) -> Element {
    let query = use_signal(String::new);
    let visible: Vec<Accommodation> = filter_accommodations(&accommodations, &query())
        .into_iter()
        .cloned()
        .collect();

    rsx! {
        SearchBox { placeholder: "Search hotels and resorts", query: query }
        if loading {
            p { class: "empty-state", "Loading accommodations..." }
        } else if visible.is_empty() {
            p { class: "empty-state", "No accommodations found" }
        } else {
            div {
                class: "card-grid",
                for stay in visible {
                    ListingCard {
                        key: "{stay.id}",
                        id: stay.id.clone(),
                        name: stay.name.clone(),
                        location: stay.display_location().to_string(),
                        image_url: stay.image_url.clone(),
                        rating: stay.rating,
                        badges: stay.category.clone(),
                        highlight: stay.price_range.clone(),
                        on_open: on_open,
                    }
                }
            }
        }
    }
}

/// One clickable listing in a card grid.
#[component]
pub fn ListingCard(
    id: String,
    name: String,
    location: String,
    image_url: Option<String>,
    rating: Option<f64>,
    #[props(default)] badges: Vec<String>,
    #[props(default)] highlight: Option<String>,
    on_open: EventHandler<String>,
) -> Element {
    rsx! {
        div {
            class: "card",
            onclick: move |_| on_open.call(id.clone()),
            if let Some(url) = &image_url {
                img { class: "card-image", src: "{url}", alt: "{name}" }
            }
            div {
                class: "card-body",
                h3 { class: "card-title", "{name}" }
                p {
                    class: "card-subtitle",
                    Icon { icon: FaLocationDot, width: 12, height: 12 }
                    " {location}"
                }
                div {
                    if let Some(label) = &highlight {
                        span { class: "badge highlight", "{label}" }
                    }
                    for badge in badges {
                        span { key: "{badge}", class: "badge", "{badge}" }
                    }
                }
                if let Some(rating) = rating {
                    StarRating { rating: rating }
                }
            }
        }
    }
}
