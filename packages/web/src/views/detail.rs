use dioxus::prelude::*;
use ui::views::{AccommodationDetailView, RestaurantDetailView, SpotDetailView};

use crate::Route;

#[component]
pub fn SpotDetail(id: String) -> Element {
    let nav = use_navigator();
    rsx! {
        SpotDetailView {
            spot_id: id,
            on_back: move |_| {
                nav.push(Route::Explore {});
            },
        }
    }
}

#[component]
pub fn AccommodationDetail(id: String) -> Element {
    let nav = use_navigator();
    rsx! {
        AccommodationDetailView {
            accommodation_id: id,
            on_back: move |_| {
                nav.push(Route::Accommodations {});
            },
        }
    }
}

#[component]
pub fn RestaurantDetail(id: String) -> Element {
    let nav = use_navigator();
    rsx! {
        RestaurantDetailView {
            restaurant_id: id,
            on_back: move |_| {
                nav.push(Route::Restaurants {});
            },
        }
    }
}
