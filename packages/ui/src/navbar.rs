use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::icons::FaCompass;
use crate::Icon;

pub const WANDERER_CSS: Asset = asset!("/assets/wanderer.css");

/// Top bar with the brand, the platform's links as `children`, and who is
/// signed in.
#[component]
pub fn Navbar(children: Element) -> Element {
    let auth = use_auth();
    let state = auth();

    rsx! {
        document::Stylesheet { href: WANDERER_CSS }
        nav {
            class: "navbar",
            span {
                class: "navbar-brand",
                Icon { icon: FaCompass, width: 18, height: 18 }
                " Wanderer"
            }
            div { class: "navbar-links", {children} }
            if !state.loading {
                span {
                    class: "navbar-user",
                    match state.session.as_ref().and_then(|s| s.email.clone()) {
                        Some(email) => rsx! { "{email}" },
                        None if state.session.is_some() => rsx! { "Signed in" },
                        None => rsx! { "Browsing as guest" },
                    }
                }
            }
        }
    }
}
