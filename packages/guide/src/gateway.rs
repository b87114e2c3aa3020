//! # Gateway: typed repository interfaces to the hosted backend
//!
//! The backend owns all persistent state. The app talks to it through one
//! narrow trait per table, so every call site names the rows it expects
//! instead of passing untyped table names around. Implementations live
//! elsewhere: [`crate::MemoryGateway`] for tests and offline demos, and the
//! REST client in the `gateway` crate for the real backend.
//!
//! | Trait | Operations |
//! |-------|-----------|
//! | [`SpotRepository`] | `list_spots`, `get_spot` |
//! | [`AccommodationRepository`] | `list_accommodations`, `get_accommodation` |
//! | [`RestaurantRepository`] | `list_restaurants`, `get_restaurant` |
//! | [`TaxonomyRepository`] | `list_categories`, `list_subcategories` |
//! | [`ProfileRepository`] | `update_onboarding`, `profile_names`, `onboarding_complete` |
//! | [`ReviewRepository`] | `list_reviews`, `insert_review` |
//! | [`SessionSource`] | `fetch_session` |
//!
//! Collections come back ordered by name, reviews newest first. Single-row
//! lookups return `Ok(None)` when the row does not exist, leaving the
//! not-found empty state to the caller.
//!
//! The returned futures are not required to be `Send`: everything runs on
//! the single UI thread.

use std::collections::HashMap;
use std::future::Future;

use crate::error::GatewayError;
use crate::models::{Accommodation, Category, Restaurant, Review, Subcategory, TouristSpot};
use crate::preferences::OnboardingPayload;
use crate::reviews::{NewReview, ReviewTarget};
use crate::session::Session;

pub type GatewayResult<T> = Result<T, GatewayError>;

pub trait SpotRepository {
    fn list_spots(&self) -> impl Future<Output = GatewayResult<Vec<TouristSpot>>>;
    fn get_spot(&self, id: &str) -> impl Future<Output = GatewayResult<Option<TouristSpot>>>;
}

pub trait AccommodationRepository {
    fn list_accommodations(&self) -> impl Future<Output = GatewayResult<Vec<Accommodation>>>;
    fn get_accommodation(
        &self,
        id: &str,
    ) -> impl Future<Output = GatewayResult<Option<Accommodation>>>;
}

pub trait RestaurantRepository {
    fn list_restaurants(&self) -> impl Future<Output = GatewayResult<Vec<Restaurant>>>;
    fn get_restaurant(&self, id: &str)
        -> impl Future<Output = GatewayResult<Option<Restaurant>>>;
}

pub trait TaxonomyRepository {
    fn list_categories(&self) -> impl Future<Output = GatewayResult<Vec<Category>>>;
    fn list_subcategories(&self) -> impl Future<Output = GatewayResult<Vec<Subcategory>>>;
}

pub trait ProfileRepository {
    /// Write the completed onboarding answers to the user's profile.
    fn update_onboarding(
        &self,
        user_id: &str,
        payload: &OnboardingPayload,
    ) -> impl Future<Output = GatewayResult<()>>;

    /// Look up display names for many users in one round trip.
    ///
    /// Users without a profile or without a name are absent from the map.
    fn profile_names(
        &self,
        user_ids: &[String],
    ) -> impl Future<Output = GatewayResult<HashMap<String, String>>>;

    /// Whether the user has already finished onboarding.
    fn onboarding_complete(&self, user_id: &str) -> impl Future<Output = GatewayResult<bool>>;
}

pub trait ReviewRepository {
    fn list_reviews(
        &self,
        target: &ReviewTarget,
    ) -> impl Future<Output = GatewayResult<Vec<Review>>>;
    fn insert_review(&self, review: &NewReview) -> impl Future<Output = GatewayResult<()>>;
}

pub trait SessionSource {
    fn fetch_session(&self) -> impl Future<Output = GatewayResult<Option<Session>>>;
}

/// Everything the app needs from the backend.
pub trait Gateway:
    SpotRepository
    + AccommodationRepository
    + RestaurantRepository
    + TaxonomyRepository
    + ProfileRepository
    + ReviewRepository
    + SessionSource
{
}

impl<T> Gateway for T where
    T: SpotRepository
        + AccommodationRepository
        + RestaurantRepository
        + TaxonomyRepository
        + ProfileRepository
        + ReviewRepository
        + SessionSource
{
}
