use dioxus::prelude::*;
use ui::Navbar;

use crate::Route;

/// Navbar above every page.
#[component]
pub fn AppLayout() -> Element {
    rsx! {
        Navbar {
            Link { to: Route::Explore {}, "Explore" }
            Link { to: Route::Events {}, "Events" }
        }
        Outlet::<Route> {}
    }
}
