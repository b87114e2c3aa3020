use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::error::GatewayError;
use crate::gateway::{
    AccommodationRepository, GatewayResult, ProfileRepository, RestaurantRepository,
    ReviewRepository, SessionSource, SpotRepository, TaxonomyRepository,
};
use crate::models::{Accommodation, Category, Profile, Restaurant, Review, Subcategory, TouristSpot};
use crate::preferences::OnboardingPayload;
use crate::reviews::{NewReview, ReviewTarget};
use crate::session::Session;

#[derive(Debug, Default)]
struct Tables {
    spots: Vec<TouristSpot>,
    accommodations: Vec<Accommodation>,
    restaurants: Vec<Restaurant>,
    categories: Vec<Category>,
    subcategories: Vec<Subcategory>,
    profiles: HashMap<String, Profile>,
    onboarding: HashMap<String, OnboardingPayload>,
    /// Keyed by (foreign-key column, entity id), as the backend stores them.
    reviews: Vec<((&'static str, String), Review)>,
    session: Option<Session>,
    fail_reads: bool,
    fail_writes: bool,
    profile_lookups: usize,
    onboarding_writes: usize,
    next_id: u64,
}

/// In-memory gateway for tests and offline demos.
#[derive(Clone, Debug, Default)]
pub struct MemoryGateway {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        // A poisoned lock only means a test panicked mid-write.
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn read(&self) -> GatewayResult<MutexGuard<'_, Tables>> {
        let tables = self.tables();
        if tables.fail_reads {
            return Err(GatewayError::Network("simulated read failure".into()));
        }
        Ok(tables)
    }

    fn write(&self) -> GatewayResult<MutexGuard<'_, Tables>> {
        let tables = self.tables();
        if tables.fail_writes {
            return Err(GatewayError::Network("simulated write failure".into()));
        }
        Ok(tables)
    }

    pub fn fail_reads(&self, fail: bool) {
        self.tables().fail_reads = fail;
    }

    pub fn fail_writes(&self, fail: bool) {
        self.tables().fail_writes = fail;
    }

    pub fn set_session(&self, session: Option<Session>) {
        self.tables().session = session;
    }

    pub fn seed_spots(&self, spots: impl IntoIterator<Item = TouristSpot>) {
        self.tables().spots.extend(spots);
    }

    pub fn seed_accommodations(&self, items: impl IntoIterator<Item = Accommodation>) {
        self.tables().accommodations.extend(items);
    }

    pub fn seed_restaurants(&self, items: impl IntoIterator<Item = Restaurant>) {
        self.tables().restaurants.extend(items);
    }

    pub fn seed_categories(&self, items: impl IntoIterator<Item = Category>) {
        self.tables().categories.extend(items);
    }

    pub fn seed_subcategories(&self, items: impl IntoIterator<Item = Subcategory>) {
        self.tables().subcategories.extend(items);
    }

    pub fn add_profile(&self, id: &str, full_name: Option<&str>) {
        self.tables().profiles.insert(
            id.to_string(),
            Profile {
                id: id.to_string(),
                full_name: full_name.map(String::from),
                onboarding_complete: false,
            },
        );
    }

    /// Add a review row. `created_at` is RFC 3339; unparseable values use the epoch.
    pub fn add_review(
        &self,
        target: &ReviewTarget,
        user_id: &str,
        rating: u8,
        comment: Option<&str>,
        created_at: &str,
    ) {
        let created_at = DateTime::parse_from_rfc3339(created_at)
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_default();
        let mut tables = self.tables();
        let id = tables.next_review_id();
        tables.reviews.push((
            (target.column(), target.id().to_string()),
            Review {
                id,
                rating,
                comment: comment.map(String::from),
                created_at,
                user_id: user_id.to_string(),
            },
        ));
    }

    /// The last onboarding payload written for `user_id`.
    pub fn onboarding_payload(&self, user_id: &str) -> Option<OnboardingPayload> {
        self.tables().onboarding.get(user_id).cloned()
    }

    pub fn onboarding_writes(&self) -> usize {
        self.tables().onboarding_writes
    }

    /// Number of `profile_names` calls served so far.
    pub fn profile_lookups(&self) -> usize {
        self.tables().profile_lookups
    }
}

impl Tables {
    fn next_review_id(&mut self) -> String {
        self.next_id += 1;
        format!("review-{}", self.next_id)
    }
}

fn sorted_by_name<T: Clone>(items: &[T], name: impl Fn(&T) -> &str) -> Vec<T> {
    let mut out = items.to_vec();
    out.sort_by(|a, b| name(a).cmp(name(b)));
    out
}

impl SpotRepository for MemoryGateway {
    async fn list_spots(&self) -> GatewayResult<Vec<TouristSpot>> {
        Ok(sorted_by_name(&self.read()?.spots, |s| &s.name))
    }

    async fn get_spot(&self, id: &str) -> GatewayResult<Option<TouristSpot>> {
        Ok(self.read()?.spots.iter().find(|s| s.id == id).cloned())
    }
}

impl AccommodationRepository for MemoryGateway {
    async fn list_accommodations(&self) -> GatewayResult<Vec<Accommodation>> {
        Ok(sorted_by_name(&self.read()?.accommodations, |a| &a.name))
    }

    async fn get_accommodation(&self, id: &str) -> GatewayResult<Option<Accommodation>> {
        Ok(self.read()?.accommodations.iter().find(|a| a.id == id).cloned())
    }
}

impl RestaurantRepository for MemoryGateway {
    async fn list_restaurants(&self) -> GatewayResult<Vec<Restaurant>> {
        Ok(sorted_by_name(&self.read()?.restaurants, |r| &r.name))
    }

    async fn get_restaurant(&self, id: &str) -> GatewayResult<Option<Restaurant>> {
        Ok(self.read()?.restaurants.iter().find(|r| r.id == id).cloned())
    }
}

impl TaxonomyRepository for MemoryGateway {
    async fn list_categories(&self) -> GatewayResult<Vec<Category>> {
        Ok(sorted_by_name(&self.read()?.categories, |c| &c.name))
    }

    async fn list_subcategories(&self) -> GatewayResult<Vec<Subcategory>> {
        Ok(sorted_by_name(&self.read()?.subcategories, |s| &s.name))
    }
}

impl ProfileRepository for MemoryGateway {
    async fn update_onboarding(
        &self,
        user_id: &str,
        payload: &OnboardingPayload,
    ) -> GatewayResult<()> {
        let mut tables = self.write()?;
        tables.onboarding_writes += 1;
        tables.onboarding.insert(user_id.to_string(), payload.clone());
        if let Some(profile) = tables.profiles.get_mut(user_id) {
            profile.onboarding_complete = payload.onboarding_complete;
        }
        Ok(())
    }

    async fn profile_names(&self, user_ids: &[String]) -> GatewayResult<HashMap<String, String>> {
        let mut tables = self.read()?;
        tables.profile_lookups += 1;
        Ok(user_ids
            .iter()
            .filter_map(|id| {
                let name = tables.profiles.get(id)?.full_name.clone()?;
                Some((id.clone(), name))
            })
            .collect())
    }

    async fn onboarding_complete(&self, user_id: &str) -> GatewayResult<bool> {
        let tables = self.read()?;
        Ok(tables
            .profiles
            .get(user_id)
            .is_some_and(|p| p.onboarding_complete))
    }
}

impl ReviewRepository for MemoryGateway {
    async fn list_reviews(&self, target: &ReviewTarget) -> GatewayResult<Vec<Review>> {
        let tables = self.read()?;
        let mut reviews: Vec<Review> = tables
            .reviews
            .iter()
            .filter(|((column, id), _)| *column == target.column() && id == target.id())
            .map(|(_, review)| review.clone())
            .collect();
        reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(reviews)
    }

    async fn insert_review(&self, review: &NewReview) -> GatewayResult<()> {
        let mut tables = self.write()?;
        let id = tables.next_review_id();
        tables.reviews.push((
            (review.target.column(), review.target.id().to_string()),
            Review {
                id,
                rating: review.rating,
                comment: review.comment.clone(),
                created_at: Utc::now(),
                user_id: review.user_id.clone(),
            },
        ));
        Ok(())
    }
}

impl SessionSource for MemoryGateway {
    async fn fetch_session(&self) -> GatewayResult<Option<Session>> {
        Ok(self.read()?.session.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spot(id: &str, name: &str) -> TouristSpot {
        TouristSpot {
            id: id.into(),
            name: name.into(),
            description: None,
            location: "Albay".into(),
            municipality: None,
            category: Vec::new(),
            image_url: None,
            rating: 0.0,
            is_hidden_gem: None,
            latitude: None,
            longitude: None,
        }
    }

    #[tokio::test]
    async fn test_collections_sorted_by_name() {
        let gateway = MemoryGateway::new();
        gateway.seed_spots([spot("2", "Mayon Volcano"), spot("1", "Cagsawa Ruins")]);

        let spots = gateway.list_spots().await.unwrap();
        assert_eq!(spots[0].name, "Cagsawa Ruins");
        assert_eq!(spots[1].name, "Mayon Volcano");

        assert!(gateway.get_spot("2").await.unwrap().is_some());
        assert!(gateway.get_spot("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_read_failure_injection() {
        let gateway = MemoryGateway::new();
        gateway.fail_reads(true);
        assert!(matches!(
            gateway.list_restaurants().await,
            Err(GatewayError::Network(_))
        ));
        gateway.fail_reads(false);
        assert!(gateway.list_restaurants().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_onboarding_marks_profile() {
        let gateway = MemoryGateway::new();
        gateway.add_profile("u1", Some("Ana"));
        assert!(!gateway.onboarding_complete("u1").await.unwrap());

        let payload = OnboardingPayload::from_record(&Default::default());
        gateway.update_onboarding("u1", &payload).await.unwrap();

        assert!(gateway.onboarding_complete("u1").await.unwrap());
        assert_eq!(gateway.onboarding_writes(), 1);
    }

    #[tokio::test]
    async fn test_spot_and_accommodation_share_review_column() {
        let gateway = MemoryGateway::new();
        gateway.add_review(&ReviewTarget::Spot("x".into()), "u1", 5, None, "2025-01-01T00:00:00Z");
        let reviews = gateway
            .list_reviews(&ReviewTarget::Accommodation("x".into()))
            .await
            .unwrap();
        assert_eq!(reviews.len(), 1);
        assert!(gateway
            .list_reviews(&ReviewTarget::Restaurant("x".into()))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_session_roundtrip() {
        let gateway = MemoryGateway::new();
        assert!(gateway.fetch_session().await.unwrap().is_none());
        gateway.set_session(Some(Session {
            user_id: "u1".into(),
            email: Some("u1@example.com".into()),
            access_token: None,
        }));
        assert_eq!(gateway.fetch_session().await.unwrap().unwrap().user_id, "u1");
    }
}
