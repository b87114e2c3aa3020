//! This crate contains all shared UI for the workspace.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod backend;
pub use backend::{use_config, use_fetch_scope, use_gateway, GatewayProvider};

mod auth;
pub use auth::{use_auth, use_session, AuthProvider, AuthState};

pub mod notices;
pub use notices::{push_notice, use_notices, NoticeLevel, NoticeLog, NoticeStack};

mod navbar;
pub use navbar::{Navbar, WANDERER_CSS};

mod onboarding_modal;
pub use onboarding_modal::OnboardingModal;

mod reviews;
pub use reviews::{ReviewList, ReviewsPanel, StarRating};

pub mod views;
