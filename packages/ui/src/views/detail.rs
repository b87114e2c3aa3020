//! Pieces shared by the spot, accommodation and restaurant pages.

use dioxus::prelude::*;

use crate::icons::{FaArrowLeft, FaLocationDot, FaPhone};
use crate::reviews::StarRating;
use crate::Icon;

/// Loading state of a single-row lookup.
#[derive(Clone, Debug, PartialEq)]
pub enum Lookup<T> {
    Loading,
    Found(T),
    Missing,
}

#[component]
pub fn BackButton(label: String, on_back: EventHandler<()>) -> Element {
    rsx! {
        button {
            class: "back-button",
            onclick: move |_| on_back.call(()),
            Icon { icon: FaArrowLeft, width: 12, height: 12 }
            " {label}"
        }
    }
}

/// Empty state for an id with no row behind it.
#[component]
pub fn NotFound(what: String, back_label: String, on_back: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "page",
            div {
                class: "empty-state",
                h2 { "{what} not found" }
                BackButton { label: back_label, on_back: on_back }
            }
        }
    }
}

#[component]
pub fn DetailHeader(
    name: String,
    image_url: Option<String>,
    #[props(default)] badges: Vec<String>,
    rating: Option<f64>,
) -> Element {
    rsx! {
        if let Some(url) = &image_url {
            img { class: "detail-hero", src: "{url}", alt: "{name}" }
        }
        h1 { "{name}" }
        div {
            for badge in badges {
                span { key: "{badge}", class: "badge", "{badge}" }
            }
            if let Some(rating) = rating {
                " "
                StarRating { rating: rating }
            }
        }
    }
}

/// Where the place is. Coordinates are shown as text; there is no map.
#[component]
pub fn LocationCard(
    location: String,
    municipality: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Element {
    rsx! {
        div {
            class: "side-card",
            h3 {
                Icon { icon: FaLocationDot, width: 14, height: 14 }
                " Location"
            }
            dl {
                if !location.is_empty() {
                    dt { "Address" }
                    dd { "{location}" }
                }
                if let Some(municipality) = &municipality {
                    dt { "Municipality" }
                    dd { "{municipality}" }
                }
                if let (Some(lat), Some(lng)) = (latitude, longitude) {
                    dt { "Coordinates" }
                    dd { {format!("{lat:.5}, {lng:.5}")} }
                }
            }
        }
    }
}

/// Contact, price and amenities for bookable places.
#[component]
pub fn PracticalCard(
    contact_number: Option<String>,
    price_range: Option<String>,
    #[props(default)] amenities: Vec<String>,
) -> Element {
    if contact_number.is_none() && price_range.is_none() && amenities.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "side-card",
            h3 { "Good to know" }
            dl {
                if let Some(phone) = &contact_number {
                    dt { "Contact" }
                    dd {
                        Icon { icon: FaPhone, width: 12, height: 12 }
                        " {phone}"
                    }
                }
                if let Some(price) = &price_range {
                    dt { "Price range" }
                    dd { "{price}" }
                }
                if !amenities.is_empty() {
                    dt { "Amenities" }
                    dd {
                        class: "amenities",
                        for amenity in amenities {
                            span { key: "{amenity}", class: "badge", "{amenity}" }
                        }
                    }
                }
            }
        }
    }
}
