//! REST client for the hosted backend.
//!
//! Tables are read and written through the PostgREST endpoint
//! (`/rest/v1/<table>`); the signed-in user comes from the auth endpoint
//! (`/auth/v1/user`). Every request carries the project's anonymous key as
//! `apikey` and, when a user is signed in, their access token as the bearer.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use guide::gateway::{
    AccommodationRepository, GatewayResult, ProfileRepository, RestaurantRepository,
    ReviewRepository, SessionSource, SpotRepository, TaxonomyRepository,
};
use guide::{
    Accommodation, Category, NewReview, OnboardingPayload, Profile, Restaurant, Review,
    ReviewTarget, Session, Subcategory, TouristSpot,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::GatewayConfig;
use crate::error::ClientError;
use crate::rest::{Order, Query};

#[derive(Clone, Debug)]
pub struct SupabaseGateway {
    client: reqwest::Client,
    config: Arc<GatewayConfig>,
    access_token: Arc<RwLock<Option<String>>>,
}

#[derive(Debug, Deserialize)]
struct ProfileName {
    id: String,
    #[serde(default)]
    full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StoredSession {
    access_token: String,
}

impl SupabaseGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a gateway reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: GatewayConfig) -> Self {
        Self {
            client,
            config: Arc::new(config),
            access_token: Arc::new(RwLock::new(None)),
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Use `token` for subsequent requests instead of the stored browser
    /// session. `None` falls back to the stored session.
    pub fn set_access_token(&self, token: Option<String>) {
        if let Ok(mut slot) = self.access_token.write() {
            *slot = token;
        }
    }

    fn access_token(&self) -> Option<String> {
        let explicit = self.access_token.read().ok().and_then(|t| t.clone());
        explicit.or_else(|| stored_access_token(&self.config.session_storage_key))
    }

    fn request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        let bearer = self
            .access_token()
            .unwrap_or_else(|| self.config.anon_key.clone());
        self.client
            .request(method, url)
            .header("apikey", &self.config.anon_key)
            .header("Authorization", format!("Bearer {bearer}"))
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: Query,
    ) -> Result<Vec<T>, ClientError> {
        let response = self
            .request(reqwest::Method::GET, self.config.rest_url(table))
            .query(query.params())
            .send()
            .await?;
        let rows = parse_json(response).await?;
        Ok(rows)
    }

    async fn select_by_name<T: DeserializeOwned>(&self, table: &str) -> GatewayResult<Vec<T>> {
        let rows = self
            .select(table, Query::new().select("*").order("name", Order::Asc))
            .await?;
        Ok(rows)
    }

    async fn select_one<T: DeserializeOwned>(&self, table: &str, id: &str) -> GatewayResult<Option<T>> {
        let rows: Vec<T> = self
            .select(table, Query::new().select("*").eq("id", id).limit(1))
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn fetch_user(&self, token: &str) -> Result<AuthUser, ClientError> {
        let response = self
            .client
            .get(self.config.auth_user_url())
            .header("apikey", &self.config.anon_key)
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await?;
        parse_json(response).await
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let body = ensure_success(response).await?.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// Row inserted into `reviews`, keyed by the target's foreign-key column.
fn review_row(review: &NewReview) -> serde_json::Value {
    let mut row = serde_json::json!({
        "user_id": review.user_id,
        "rating": review.rating,
        "comment": review.comment,
    });
    row[review.target.column()] = serde_json::Value::String(review.target.id().to_string());
    row
}

fn names_by_id(rows: Vec<ProfileName>) -> HashMap<String, String> {
    rows.into_iter()
        .filter_map(|row| Some((row.id, row.full_name?)))
        .collect()
}

#[cfg(target_arch = "wasm32")]
fn stored_access_token(key: &str) -> Option<String> {
    let raw = web_sys::window()?.local_storage().ok()??.get_item(key).ok()??;
    parse_stored_session(&raw)
}

#[cfg(not(target_arch = "wasm32"))]
fn stored_access_token(_key: &str) -> Option<String> {
    None
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn parse_stored_session(raw: &str) -> Option<String> {
    serde_json::from_str::<StoredSession>(raw)
        .ok()
        .map(|s| s.access_token)
}

impl SpotRepository for SupabaseGateway {
    async fn list_spots(&self) -> GatewayResult<Vec<TouristSpot>> {
        self.select_by_name(TouristSpot::TABLE).await
    }

    async fn get_spot(&self, id: &str) -> GatewayResult<Option<TouristSpot>> {
        self.select_one(TouristSpot::TABLE, id).await
    }
}

impl AccommodationRepository for SupabaseGateway {
    async fn list_accommodations(&self) -> GatewayResult<Vec<Accommodation>> {
        self.select_by_name(Accommodation::TABLE).await
    }

    async fn get_accommodation(&self, id: &str) -> GatewayResult<Option<Accommodation>> {
        self.select_one(Accommodation::TABLE, id).await
    }
}

impl RestaurantRepository for SupabaseGateway {
    async fn list_restaurants(&self) -> GatewayResult<Vec<Restaurant>> {
        self.select_by_name(Restaurant::TABLE).await
    }

    async fn get_restaurant(&self, id: &str) -> GatewayResult<Option<Restaurant>> {
        self.select_one(Restaurant::TABLE, id).await
    }
}

impl TaxonomyRepository for SupabaseGateway {
    async fn list_categories(&self) -> GatewayResult<Vec<Category>> {
        self.select_by_name(Category::TABLE).await
    }

    async fn list_subcategories(&self) -> GatewayResult<Vec<Subcategory>> {
        self.select_by_name(Subcategory::TABLE).await
    }
}

impl ProfileRepository for SupabaseGateway {
    async fn update_onboarding(
        &self,
        user_id: &str,
        payload: &OnboardingPayload,
    ) -> GatewayResult<()> {
        let query = Query::new().eq("id", user_id);
        let response = self
            .request(reqwest::Method::PATCH, self.config.rest_url(Profile::TABLE))
            .query(query.params())
            .header("Prefer", "return=minimal")
            .json(payload)
            .send()
            .await
            .map_err(ClientError::from)?;
        ensure_success(response).await?;
        tracing::info!(user_id, "Saved onboarding preferences");
        Ok(())
    }

    async fn profile_names(&self, user_ids: &[String]) -> GatewayResult<HashMap<String, String>> {
        if user_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows: Vec<ProfileName> = self
            .select(
                Profile::TABLE,
                Query::new().select("id,full_name").in_list("id", user_ids),
            )
            .await?;
        Ok(names_by_id(rows))
    }

    async fn onboarding_complete(&self, user_id: &str) -> GatewayResult<bool> {
        let profile: Option<Profile> = self.select_one(Profile::TABLE, user_id).await?;
        Ok(profile.is_some_and(|p| p.onboarding_complete))
    }
}

impl ReviewRepository for SupabaseGateway {
    async fn list_reviews(&self, target: &ReviewTarget) -> GatewayResult<Vec<Review>> {
        let query = Query::new()
            .select("*")
            .eq(target.column(), target.id())
            .order("created_at", Order::Desc);
        let rows = self.select(Review::TABLE, query).await?;
        Ok(rows)
    }

    async fn insert_review(&self, review: &NewReview) -> GatewayResult<()> {
        if self.access_token().is_none() {
            return Err(ClientError::Unauthenticated.into());
        }
        let response = self
            .request(reqwest::Method::POST, self.config.rest_url(Review::TABLE))
            .header("Prefer", "return=minimal")
            .json(&review_row(review))
            .send()
            .await
            .map_err(ClientError::from)?;
        ensure_success(response).await?;
        Ok(())
    }
}

impl SessionSource for SupabaseGateway {
    async fn fetch_session(&self) -> GatewayResult<Option<Session>> {
        let Some(token) = self.access_token() else {
            return Ok(None);
        };
        match self.fetch_user(&token).await {
            Ok(user) => Ok(Some(Session {
                user_id: user.id,
                email: user.email,
                access_token: Some(token),
            })),
            Err(ClientError::Status { status: 401 | 403, .. }) => {
                tracing::warn!("Stored session was rejected, treating as signed out");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_row_uses_target_column() {
        let review = NewReview {
            target: ReviewTarget::Restaurant("r1".into()),
            user_id: "u1".into(),
            rating: 4,
            comment: None,
        };
        assert_eq!(
            review_row(&review),
            serde_json::json!({
                "restaurant_id": "r1",
                "user_id": "u1",
                "rating": 4,
                "comment": null,
            })
        );

        let review = NewReview {
            target: ReviewTarget::Accommodation("a1".into()),
            ..review
        };
        assert_eq!(review_row(&review)["spot_id"], "a1");
    }

    #[test]
    fn test_names_skip_profiles_without_name() {
        let rows: Vec<ProfileName> = serde_json::from_str(
            r#"[{"id":"u1","full_name":"Maria"},{"id":"u2","full_name":null},{"id":"u3"}]"#,
        )
        .unwrap();
        let names = names_by_id(rows);
        assert_eq!(names.len(), 1);
        assert_eq!(names["u1"], "Maria");
    }

    #[test]
    fn test_stored_session_parsing() {
        let raw = r#"{"access_token":"jwt","refresh_token":"r","user":{"id":"u1"}}"#;
        assert_eq!(parse_stored_session(raw).as_deref(), Some("jwt"));
        assert_eq!(parse_stored_session("not json"), None);
    }

    #[test]
    fn test_explicit_token_overrides_storage() {
        let gateway = SupabaseGateway::new(GatewayConfig::new("https://x.supabase.co", "anon"));
        assert_eq!(gateway.access_token(), None);
        gateway.set_access_token(Some("jwt".into()));
        assert_eq!(gateway.access_token().as_deref(), Some("jwt"));
    }
}
