use dioxus::prelude::*;
use guide::{Restaurant, RestaurantRepository, ReviewTarget};

use super::detail::{BackButton, DetailHeader, LocationCard, Lookup, NotFound, PracticalCard};
use crate::backend::{use_fetch_scope, use_gateway};
use crate::notices::{push_notice, use_notices, NoticeLevel};
use crate::reviews::ReviewsPanel;

/// Restaurant page. Food types are shown as badges.
#[component]
pub fn RestaurantDetailView(restaurant_id: String, on_back: EventHandler<()>) -> Element {
    let gateway = use_gateway();
    let scope = use_fetch_scope();
    let mut notices = use_notices();
    let mut restaurant = use_signal(|| Lookup::<Restaurant>::Loading);

    let mut id_signal = use_signal(|| restaurant_id.clone());
    if *id_signal.peek() != restaurant_id {
        id_signal.set(restaurant_id.clone());
    }

    let _loader = use_resource(move || {
        let id = id_signal();
        let gateway = gateway.clone();
        let scope = scope.clone();
        async move {
            restaurant.set(Lookup::Loading);
            let Some(result) = scope.run(gateway.get_restaurant(&id)).await else {
                return;
            };
            match result {
                Ok(Some(found)) => restaurant.set(Lookup::Found(found)),
                Ok(None) => restaurant.set(Lookup::Missing),
                Err(e) => {
                    tracing::error!(restaurant_id = %id, error = %e, "Error fetching restaurant");
                    push_notice(&mut notices, NoticeLevel::Error, "Failed to load restaurant");
                    restaurant.set(Lookup::Missing);
                }
            }
        }
    });

    let restaurant = match restaurant() {
        Lookup::Loading => return rsx! { p { class: "empty-state", "Loading restaurant..." } },
        Lookup::Missing => {
            return rsx! {
                NotFound { what: "Restaurant", back_label: "Back to Restaurants", on_back: on_back }
            }
        }
        Lookup::Found(restaurant) => restaurant,
    };
    let food_types: Vec<String> = restaurant.food_types().map(str::to_string).collect();

    rsx! {
        div {
            class: "page",
            BackButton { label: "Back to Restaurants", on_back: on_back }
            DetailHeader {
                name: restaurant.name.clone(),
                image_url: restaurant.image_url.clone(),
                badges: food_types,
                rating: restaurant.rating,
            }
            div {
                class: "detail-grid",
                div {
                    if let Some(description) = &restaurant.description {
                        h2 { "About" }
                        p { "{description}" }
                    }
                    ReviewsPanel { target: ReviewTarget::Restaurant(restaurant.id.clone()) }
                }
                aside {
                    PracticalCard {
                        contact_number: restaurant.contact_number.clone(),
                        price_range: restaurant.price_range.clone(),
                        amenities: restaurant.amenities.clone(),
                    }
                    LocationCard {
                        location: restaurant.location.clone(),
                        municipality: restaurant.municipality.clone(),
                        latitude: restaurant.latitude,
                        longitude: restaurant.longitude,
                    }
                }
            }
        }
    }
}
