//! Error types shared by the gateway, onboarding flow and review gate.

use crate::onboarding::Step;

/// Failure of a call to the remote backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend returned {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("Could not read backend response: {0}")]
    Decode(String),

    #[error("You need to be signed in to do that")]
    Unauthenticated,

    #[error("Backend is not configured: {0}")]
    Config(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OnboardingError {
    #[error("Your preferences are already being saved")]
    Busy,

    #[error("Preferences can only be saved from the last step")]
    NotOnFinalStep,

    #[error("Please complete the {} step first", .0.label())]
    Incomplete(Step),

    #[error("Onboarding is already complete")]
    AlreadyCompleted,

    #[error("Failed to save preferences. Please try again.")]
    Save(#[from] GatewayError),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReviewError {
    #[error("Sign in to write a review")]
    SignInRequired,

    #[error("You have already reviewed this place")]
    AlreadyReviewed,

    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("Failed to submit review: {0}")]
    Gateway(#[from] GatewayError),
}
