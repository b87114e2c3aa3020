//! Session context and hooks for the UI.

use std::rc::Rc;

use dioxus::prelude::*;
use guide::{Session, SessionContext, SessionSource};

use crate::backend::use_gateway;
use crate::notices::{push_notice, use_notices, NoticeLevel};

/// How often the stored session is re-read from the backend.
#[cfg(target_arch = "wasm32")]
const SESSION_REFRESH_MS: u32 = 30_000;

#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub session: Option<Session>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            session: None,
            loading: true,
        }
    }
}

impl AuthState {
    pub fn user_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.user_id.as_str())
    }
}

/// Returns a signal that updates when the user signs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

pub fn use_session() -> SessionContext {
    use_context::<SessionContext>()
}

/// Owns the [`SessionContext`] and mirrors it into a [`Signal<AuthState>`].
///
/// Must sit inside a [`GatewayProvider`](crate::GatewayProvider).
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let gateway = use_gateway();
    let mut notices = use_notices();
    let mut auth_state = use_signal(AuthState::default);
    let session = use_context_provider(SessionContext::new);
    use_context_provider(|| auth_state);

    // Dropped with the component, which unsubscribes the listener.
    let _subscription = use_hook(|| {
        Rc::new(session.subscribe(move |current| {
            let mut auth_state = auth_state;
            auth_state.set(AuthState {
                session: current.cloned(),
                loading: false,
            });
        }))
    });

    let _loader = use_resource({
        let gateway = gateway.clone();
        let session = session.clone();
        move || {
            let gateway = gateway.clone();
            let session = session.clone();
            async move {
                match gateway.fetch_session().await {
                    Ok(current) => {
                        tracing::debug!(signed_in = current.is_some(), "Loaded session");
                        session.set(current);
                    }
                    Err(e) => {
                        push_notice(&mut notices, NoticeLevel::Warning, &format!("Could not load session: {e}"));
                    }
                }
                if auth_state.peek().loading {
                    auth_state.write().loading = false;
                }
            }
        }
    });

    #[cfg(target_arch = "wasm32")]
    use_effect(move || {
        let gateway = gateway.clone();
        let session = session.clone();
        spawn(async move {
            loop {
                gloo_timers::future::TimeoutFuture::new(SESSION_REFRESH_MS).await;
                match gateway.fetch_session().await {
                    Ok(current) => session.set(current),
                    Err(e) => tracing::warn!(error = %e, "Session refresh failed"),
                }
            }
        });
    });

    rsx! {
        {children}
    }
}
