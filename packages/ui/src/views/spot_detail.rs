use dioxus::prelude::*;
use guide::{ReviewTarget, SpotRepository, TouristSpot};

use super::detail::{BackButton, DetailHeader, LocationCard, Lookup, NotFound};
use crate::backend::{use_fetch_scope, use_gateway};
use crate::notices::{push_notice, use_notices, NoticeLevel};
use crate::reviews::ReviewsPanel;

/// Tourist spot page.
#[component]
pub fn SpotDetailView(
    /// Row id from the route.
    spot_id: String,
    /// Back to the explore page.
    on_back: EventHandler<()>,
) -> Element {
    let gateway = use_gateway();
    let scope = use_fetch_scope();
    let mut notices = use_notices();
    let mut spot = use_signal(|| Lookup::<TouristSpot>::Loading);

    // Track the id in a signal so the loader re-runs on route param change
    let mut id_signal = use_signal(|| spot_id.clone());
    if *id_signal.peek() != spot_id {
        id_signal.set(spot_id.clone());
    }

    let _loader = use_resource(move || {
        let id = id_signal();
        let gateway = gateway.clone();
        let scope = scope.clone();
        async move {
            spot.set(Lookup::Loading);
            let Some(result) = scope.run(gateway.get_spot(&id)).await else {
                return;
            };
            match result {
                Ok(Some(found)) => spot.set(Lookup::Found(found)),
                Ok(None) => spot.set(Lookup::Missing),
                Err(e) => {
                    tracing::error!(spot_id = %id, error = %e, "Error fetching spot");
                    push_notice(&mut notices, NoticeLevel::Error, "Failed to load destination");
                    spot.set(Lookup::Missing);
                }
            }
        }
    });

    let current = spot();
    let spot = match current {
        Lookup::Loading => return rsx! { p { class: "empty-state", "Loading destination..." } },
        Lookup::Missing => {
            return rsx! {
                NotFound { what: "Destination", back_label: "Back to Explore", on_back: on_back }
            }
        }
        Lookup::Found(spot) => spot,
    };

    rsx! {
        div {
            class: "page",
            BackButton { label: "Back to Explore", on_back: on_back }
            DetailHeader {
                name: spot.name.clone(),
                image_url: spot.image_url.clone(),
                badges: spot.category.clone(),
                rating: Some(spot.rating).filter(|r| *r > 0.0),
            }
            if spot.is_hidden_gem == Some(true) {
                span { class: "badge highlight", "Hidden Gem" }
            }
            div {
                class: "detail-grid",
                div {
                    h2 { "About" }
                    p { {spot.description.clone().unwrap_or_else(|| "No description available.".into())} }
                    ReviewsPanel { target: ReviewTarget::Spot(spot.id.clone()) }
                }
                aside {
                    LocationCard {
                        location: spot.location.clone(),
                        municipality: spot.municipality.clone(),
                        latitude: spot.latitude,
                        longitude: spot.longitude,
                    }
                }
            }
        }
    }
}
