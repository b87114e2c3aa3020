use dioxus::prelude::*;

use ui::{AuthProvider, GatewayProvider, NoticeLog, NoticeStack};
use views::{
    AccommodationDetail, Accommodations, AppLayout, Events, Explore, RestaurantDetail,
    Restaurants, SpotDetail,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[layout(AppLayout)]
        #[route("/explore")]
        Explore {},
        #[route("/explore/restaurants")]
        Restaurants {},
        #[route("/explore/accommodations")]
        Accommodations {},
        #[route("/spot/:id")]
        SpotDetail { id: String },
        #[route("/accommodation/:id")]
        AccommodationDetail { id: String },
        #[route("/restaurant/:id")]
        RestaurantDetail { id: String },
        #[route("/events")]
        Events {},
}

/// App behaviour: onboarding variant, chip baseline, survey options.
const WANDERER_TOML: &str = include_str!("../wanderer.toml");

fn main() {
    #[cfg(feature = "server")]
    {
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime,
            Err(e) => {
                eprintln!("Failed to start the async runtime: {e}");
                std::process::exit(1);
            }
        };
        if let Err(e) = runtime.block_on(launch_server()) {
            tracing::error!(error = %e, "Server exited");
            std::process::exit(1);
        }
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
async fn launch_server() -> std::io::Result<()> {
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use tracing_subscriber::EnvFilter;

    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,web=debug")),
        )
        .init();

    let router = axum::Router::new().serve_dioxus_application(ServeConfig::new(), App);

    // Use the address from dx serve or default to localhost:8080
    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router.into_make_service()).await
}

#[component]
fn App() -> Element {
    use_context_provider(|| Signal::new(NoticeLog::default()));

    rsx! {
        document::Title { "Wanderer | Albay Travel Guide" }
        GatewayProvider {
            config_toml: WANDERER_TOML.to_string(),
            AuthProvider {
                Router::<Route> {}
            }
        }
        NoticeStack {}
    }
}

/// Redirect `/` to `/explore`
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Explore {});
    rsx! {}
}
