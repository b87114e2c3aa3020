use dioxus::prelude::*;
use guide::{Accommodation, AccommodationRepository, ReviewTarget};

use super::detail::{BackButton, DetailHeader, LocationCard, Lookup, NotFound, PracticalCard};
use crate::backend::{use_fetch_scope, use_gateway};
use crate::notices::{push_notice, use_notices, NoticeLevel};
use crate::reviews::ReviewsPanel;

#[component]
pub fn AccommodationDetailView(accommodation_id: String, on_back: EventHandler<()>) -> Element {
    let gateway = use_gateway();
    let scope = use_fetch_scope();
    let mut notices = use_notices();
    let mut stay = use_signal(|| Lookup::<Accommodation>::Loading);

    let mut id_signal = use_signal(|| accommodation_id.clone());
    if *id_signal.peek() != accommodation_id {
        id_signal.set(accommodation_id.clone());
    }

    let _loader = use_resource(move || {
        let id = id_signal();
        let gateway = gateway.clone();
        let scope = scope.clone();
        async move {
            stay.set(Lookup::Loading);
            let Some(result) = scope.run(gateway.get_accommodation(&id)).await else {
                return;
            };
            match result {
                Ok(Some(found)) => stay.set(Lookup::Found(found)),
                Ok(None) => stay.set(Lookup::Missing),
                Err(e) => {
                    tracing::error!(accommodation_id = %id, error = %e, "Error fetching accommodation");
                    push_notice(&mut notices, NoticeLevel::Error, "Failed to load accommodation");
                    stay.set(Lookup::Missing);
                }
            }
        }
    });

    let stay = match stay() {
        Lookup::Loading => return rsx! { p { class: "empty-state", "Loading accommodation..." } },
        Lookup::Missing => {
            return rsx! {
                NotFound { what: "Accommodation", back_label: "Back to Accommodations", on_back: on_back }
            }
        }
        Lookup::Found(stay) => stay,
    };

    rsx! {
        div {
            class: "page",
            BackButton { label: "Back to Accommodations", on_back: on_back }
            DetailHeader {
                name: stay.name.clone(),
                image_url: stay.image_url.clone(),
                badges: stay.category.clone(),
                rating: stay.rating,
            }
            div {
                class: "detail-grid",
                div {
                    if let Some(description) = &stay.description {
                        h2 { "About" }
                        p { "{description}" }
                    }
                    ReviewsPanel { target: ReviewTarget::Accommodation(stay.id.clone()) }
                }
                aside {
                    PracticalCard {
                        contact_number: stay.contact_number.clone(),
                        price_range: stay.price_range.clone(),
                        amenities: stay.amenities.clone(),
                    }
                    LocationCard {
                        location: stay.location.clone(),
                        municipality: stay.municipality.clone(),
                        latitude: stay.latitude,
                        longitude: stay.longitude,
                    }
                }
            }
        }
    }
}
