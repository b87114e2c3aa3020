//! Backend client and app configuration in context.

use std::rc::Rc;

use dioxus::prelude::*;
use gateway::{GatewayConfig, SupabaseGateway};
use guide::{FetchScope, WandererConfig};

use crate::notices::{push_notice, use_notices, NoticeLevel};

pub fn use_gateway() -> SupabaseGateway {
    use_context::<SupabaseGateway>()
}

pub fn use_config() -> WandererConfig {
    use_context::<WandererConfig>()
}

/// A fetch scope cancelled when the calling component unmounts.
pub fn use_fetch_scope() -> FetchScope {
    let guard = use_hook(|| Rc::new(FetchScope::new().guard()));
    guard.scope().clone()
}

/// Puts one [`SupabaseGateway`] and the parsed `wanderer.toml` into context.
///
/// A missing backend configuration is reported as a notice; the app still
/// renders and every fetch fails with a visible error.
#[component]
pub fn GatewayProvider(
    /// Contents of `wanderer.toml`. Empty means defaults.
    #[props(default)]
    config_toml: String,
    children: Element,
) -> Element {
    let mut notices = use_notices();

    use_context_provider(|| WandererConfig::from_toml_or_default(&config_toml));
    let gateway_config = use_hook(|| GatewayConfig::from_env().map_err(|e| e.to_string()));
    let missing = gateway_config.clone().err();
    use_context_provider(|| {
        SupabaseGateway::new(gateway_config.unwrap_or_else(|_| GatewayConfig::new("", "")))
    });

    use_effect(move || {
        if let Some(reason) = &missing {
            push_notice(
                &mut notices,
                NoticeLevel::Error,
                &format!("Backend is not configured: {reason}"),
            );
        }
    });

    rsx! {
        {children}
    }
}
