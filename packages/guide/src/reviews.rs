//! # Reviews: loading, enrichment and the one-review-per-user gate
//!
//! Detail pages show the reviews for one entity together with each author's
//! display name, and offer a "write review" affordance until the signed-in
//! user has reviewed the entity.
//!
//! ## Loading
//!
//! [`load_reviews`] fetches the review rows and then resolves every distinct
//! author in a single batched profile lookup, merging names back by user id.
//! Authors without a name show as [`ANONYMOUS_REVIEWER`].
//!
//! ## The gate
//!
//! [`ReviewAffordance::evaluate`] scans the fetched list for the session's
//! user id. This is a best-effort check over data already on screen: two
//! sessions submitting at the same time can both pass it. [`submit_review`]
//! applies the same check before writing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, ReviewError};
use crate::gateway::{ProfileRepository, ReviewRepository};
use crate::models::{Review, ReviewEntry, ANONYMOUS_REVIEWER};
use crate::session::Session;

/// The entity a review is attached to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ReviewTarget {
    Spot(String),
    Accommodation(String),
    Restaurant(String),
}

impl ReviewTarget {
    pub fn id(&self) -> &str {
        match self {
            Self::Spot(id) | Self::Accommodation(id) | Self::Restaurant(id) => id,
        }
    }

    /// Foreign-key column on the `reviews` table.
    ///
    /// Spots and accommodations share `spot_id`; restaurants have their own.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Spot(_) | Self::Accommodation(_) => "spot_id",
            Self::Restaurant(_) => "restaurant_id",
        }
    }
}

/// A validated review ready to be inserted.
#[derive(Clone, Debug, PartialEq)]
pub struct NewReview {
    pub target: ReviewTarget,
    pub user_id: String,
    pub rating: u8,
    pub comment: Option<String>,
}

/// What the user typed into the review form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReviewDraft {
    pub rating: u8,
    pub comment: String,
}

impl ReviewDraft {
    pub fn validate(
        &self,
        target: ReviewTarget,
        user_id: &str,
    ) -> Result<NewReview, ReviewError> {
        if !(1..=5).contains(&self.rating) {
            return Err(ReviewError::InvalidRating(self.rating));
        }
        let comment = self.comment.trim();
        Ok(NewReview {
            target,
            user_id: user_id.to_string(),
            rating: self.rating,
            comment: (!comment.is_empty()).then(|| comment.to_string()),
        })
    }
}

/// Distinct author ids, in the order they first appear.
pub fn reviewer_ids(reviews: &[Review]) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for review in reviews {
        if !ids.contains(&review.user_id) {
            ids.push(review.user_id.clone());
        }
    }
    ids
}

pub fn enrich(reviews: Vec<Review>, names: &HashMap<String, String>) -> Vec<ReviewEntry> {
    reviews
        .into_iter()
        .map(|review| {
            let user_name = names
                .get(&review.user_id)
                .cloned()
                .unwrap_or_else(|| ANONYMOUS_REVIEWER.to_string());
            ReviewEntry { review, user_name }
        })
        .collect()
}

/// Fetch the reviews for `target` with author names resolved.
pub async fn load_reviews<G>(gateway: &G, target: &ReviewTarget) -> Result<Vec<ReviewEntry>, GatewayError>
where
    G: ReviewRepository + ProfileRepository,
{
    let reviews = gateway.list_reviews(target).await?;
    if reviews.is_empty() {
        return Ok(Vec::new());
    }
    let ids = reviewer_ids(&reviews);
    let names = gateway.profile_names(&ids).await?;
    tracing::debug!(
        entity = target.id(),
        reviews = reviews.len(),
        authors = ids.len(),
        "Loaded reviews"
    );
    Ok(enrich(reviews, &names))
}

pub fn has_user_reviewed(entries: &[ReviewEntry], user_id: Option<&str>) -> bool {
    let Some(user_id) = user_id else {
        return false;
    };
    entries.iter().any(|e| e.review.user_id == user_id)
}

/// Mean rating of the entries, or `None` when there are none.
pub fn average_rating(entries: &[ReviewEntry]) -> Option<f64> {
    if entries.is_empty() {
        return None;
    }
    let total: u32 = entries.iter().map(|e| u32::from(e.review.rating)).sum();
    Some(f64::from(total) / entries.len() as f64)
}

/// What the review tab should offer the current visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAffordance {
    SignIn,
    Write,
    AlreadyReviewed,
}

impl ReviewAffordance {
    pub fn evaluate(session: Option<&Session>, entries: &[ReviewEntry]) -> Self {
        match session {
            None => Self::SignIn,
            Some(s) if has_user_reviewed(entries, Some(&s.user_id)) => Self::AlreadyReviewed,
            Some(_) => Self::Write,
        }
    }

    pub fn tab_label(self) -> &'static str {
        match self {
            Self::SignIn => "Login to Review",
            Self::Write | Self::AlreadyReviewed => "Write Review",
        }
    }
}

/// Validate and insert a review after re-checking the gate.
pub async fn submit_review<G: ReviewRepository>(
    gateway: &G,
    target: ReviewTarget,
    session: Option<&Session>,
    entries: &[ReviewEntry],
    draft: &ReviewDraft,
) -> Result<NewReview, ReviewError> {
    let session = match ReviewAffordance::evaluate(session, entries) {
        ReviewAffordance::SignIn => return Err(ReviewError::SignInRequired),
        ReviewAffordance::AlreadyReviewed => return Err(ReviewError::AlreadyReviewed),
        ReviewAffordance::Write => session.ok_or(ReviewError::SignInRequired)?,
    };
    let review = draft.validate(target, &session.user_id)?;
    gateway.insert_review(&review).await?;
    tracing::info!(
        entity = review.target.id(),
        user_id = %review.user_id,
        rating = review.rating,
        "Review submitted"
    );
    Ok(review)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryGateway;

    fn session(id: &str) -> Session {
        Session {
            user_id: id.to_string(),
            email: None,
            access_token: None,
        }
    }

    fn seeded() -> (MemoryGateway, ReviewTarget) {
        let gateway = MemoryGateway::new();
        gateway.add_profile("u1", Some("Maria"));
        gateway.add_profile("u2", None);
        let target = ReviewTarget::Restaurant("r1".into());
        gateway.add_review(&target, "u1", 5, Some("Masarap!"), "2025-01-02T00:00:00Z");
        gateway.add_review(&target, "u2", 3, None, "2025-01-03T00:00:00Z");
        gateway.add_review(&target, "u1", 4, None, "2025-01-01T00:00:00Z");
        gateway.add_review(&ReviewTarget::Spot("s1".into()), "u3", 2, None, "2025-01-04T00:00:00Z");
        (gateway, target)
    }

    #[test]
    fn test_target_columns() {
        assert_eq!(ReviewTarget::Restaurant("x".into()).column(), "restaurant_id");
        assert_eq!(ReviewTarget::Accommodation("x".into()).column(), "spot_id");
        assert_eq!(ReviewTarget::Spot("x".into()).column(), "spot_id");
    }

    #[tokio::test]
    async fn test_load_reviews_single_batched_lookup() {
        let (gateway, target) = seeded();

        let entries = load_reviews(&gateway, &target).await.unwrap();

        assert_eq!(entries.len(), 3);
        // newest first
        assert_eq!(entries[0].user_name, ANONYMOUS_REVIEWER);
        assert_eq!(entries[1].user_name, "Maria");
        assert_eq!(entries[2].user_name, "Maria");
        assert_eq!(gateway.profile_lookups(), 1);
    }

    #[tokio::test]
    async fn test_load_reviews_skips_lookup_when_empty() {
        let gateway = MemoryGateway::new();
        let entries = load_reviews(&gateway, &ReviewTarget::Spot("none".into()))
            .await
            .unwrap();
        assert!(entries.is_empty());
        assert_eq!(gateway.profile_lookups(), 0);
    }

    #[tokio::test]
    async fn test_gate_follows_session() {
        let (gateway, target) = seeded();
        let entries = load_reviews(&gateway, &target).await.unwrap();

        assert!(has_user_reviewed(&entries, Some("u1")));
        assert!(!has_user_reviewed(&entries, Some("u9")));
        assert!(!has_user_reviewed(&entries, None));

        assert_eq!(ReviewAffordance::evaluate(None, &entries), ReviewAffordance::SignIn);
        assert_eq!(
            ReviewAffordance::evaluate(Some(&session("u2")), &entries),
            ReviewAffordance::AlreadyReviewed
        );
        assert_eq!(
            ReviewAffordance::evaluate(Some(&session("u9")), &entries),
            ReviewAffordance::Write
        );
    }

    #[tokio::test]
    async fn test_submit_review_checks_gate_and_rating() {
        let (gateway, target) = seeded();
        let entries = load_reviews(&gateway, &target).await.unwrap();
        let draft = ReviewDraft { rating: 4, comment: "  Great view ".into() };

        let err = submit_review(&gateway, target.clone(), Some(&session("u1")), &entries, &draft)
            .await
            .unwrap_err();
        assert_eq!(err, ReviewError::AlreadyReviewed);

        let err = submit_review(&gateway, target.clone(), None, &entries, &draft)
            .await
            .unwrap_err();
        assert_eq!(err, ReviewError::SignInRequired);

        let bad = ReviewDraft { rating: 0, comment: String::new() };
        let err = submit_review(&gateway, target.clone(), Some(&session("u9")), &entries, &bad)
            .await
            .unwrap_err();
        assert_eq!(err, ReviewError::InvalidRating(0));

        let review = submit_review(&gateway, target.clone(), Some(&session("u9")), &entries, &draft)
            .await
            .unwrap();
        assert_eq!(review.comment.as_deref(), Some("Great view"));
        assert_eq!(gateway.list_reviews(&target).await.unwrap().len(), 4);
    }

    #[test]
    fn test_average_rating() {
        assert_eq!(average_rating(&[]), None);
        let entry = |rating| ReviewEntry {
            review: Review {
                id: "x".into(),
                rating,
                comment: None,
                created_at: chrono::Utc::now(),
                user_id: "u".into(),
            },
            user_name: "n".into(),
        };
        assert_eq!(average_rating(&[entry(5), entry(2)]), Some(3.5));
    }
}
