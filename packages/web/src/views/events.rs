use dioxus::prelude::*;
use ui::views::EventsView;

#[component]
pub fn Events() -> Element {
    rsx! { EventsView {} }
}
