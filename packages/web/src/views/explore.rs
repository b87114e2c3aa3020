use dioxus::prelude::*;
use ui::views::{ExploreTab, ExploreView};

use crate::Route;

#[component]
fn ExploreWithTab(tab: ExploreTab) -> Element {
    let nav = use_navigator();
    rsx! {
        ExploreView {
            initial_tab: tab,
            on_open_spot: move |id: String| {
                nav.push(Route::SpotDetail { id });
            },
            on_open_accommodation: move |id: String| {
                nav.push(Route::AccommodationDetail { id });
            },
            on_open_restaurant: move |id: String| {
                nav.push(Route::RestaurantDetail { id });
            },
        }
    }
}

#[component]
pub fn Explore() -> Element {
    rsx! { ExploreWithTab { tab: ExploreTab::Destinations } }
}

/// `/explore/restaurants`, where "Back to Restaurants" lands.
#[component]
pub fn Restaurants() -> Element {
    rsx! { ExploreWithTab { tab: ExploreTab::Restaurants } }
}

#[component]
pub fn Accommodations() -> Element {
    rsx! { ExploreWithTab { tab: ExploreTab::Accommodations } }
}
