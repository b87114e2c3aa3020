pub mod config;
pub mod error;
pub mod events;
pub mod fetch;
pub mod filter;
pub mod gateway;
pub mod models;
pub mod onboarding;
pub mod preferences;
pub mod reviews;
pub mod session;

mod memory;
pub use memory::MemoryGateway;

pub use config::WandererConfig;
pub use error::{GatewayError, OnboardingError, ReviewError};
pub use fetch::{FetchGuard, FetchScope};
pub use gateway::{
    AccommodationRepository, Gateway, GatewayResult, ProfileRepository, RestaurantRepository,
    ReviewRepository, SessionSource, SpotRepository, TaxonomyRepository,
};
pub use models::{
    Accommodation, Category, Event, Profile, Restaurant, Review, ReviewEntry, Subcategory,
    TouristSpot,
};
pub use onboarding::{FlowVariant, OnboardingFlow, Step, Transition};
pub use preferences::{OnboardingPayload, PreferenceRecord};
pub use reviews::{NewReview, ReviewAffordance, ReviewDraft, ReviewTarget};
pub use session::{Session, SessionContext, Subscription};
