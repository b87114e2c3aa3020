use dioxus::prelude::*;
use guide::events::festivals;

use crate::icons::{FaCalendarDays, FaLocationDot};
use crate::Icon;

/// The festival calendar. Static, so nothing is fetched.
#[component]
pub fn EventsView() -> Element {
    let events = use_hook(festivals);

    rsx! {
        div {
            class: "page",
            h1 { "Festivals & Events" }
            p { class: "card-subtitle", "Celebrations across Albay, month by month." }
            div {
                class: "card-grid",
                for event in events {
                    div {
                        key: "{event.id}",
                        class: "event-card",
                        if let Some(url) = &event.image_url {
                            img { class: "card-image", src: "{url}", alt: "{event.title}" }
                        }
                        h3 { class: "card-title", "{event.title}" }
                        div {
                            class: "event-meta",
                            span {
                                Icon { icon: FaLocationDot, width: 12, height: 12 }
                                " {event.location}"
                            }
                            span {
                                Icon { icon: FaCalendarDays, width: 12, height: 12 }
                                " {event.date}"
                            }
                        }
                        p { "{event.description}" }
                    }
                }
            }
        }
    }
}
