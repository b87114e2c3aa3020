//! Reviews panel shared by the detail pages.

use dioxus::prelude::*;
use guide::reviews::{average_rating, load_reviews, submit_review};
use guide::{ReviewAffordance, ReviewDraft, ReviewEntry, ReviewError, ReviewTarget};

use crate::auth::use_auth;
use crate::backend::{use_fetch_scope, use_gateway};
use crate::icons::FaStar;
use crate::notices::{push_notice, use_notices, NoticeLevel};
use crate::Icon;

#[component]
pub fn StarRating(rating: f64) -> Element {
    rsx! {
        span {
            class: "rating",
            Icon { icon: FaStar, width: 14, height: 14 }
            {format!("{rating:.1}")}
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum ReviewTab {
    All,
    Write,
}

/// "Reviews & Ratings" card: the review list and, when allowed, the form.
#[component]
pub fn ReviewsPanel(target: ReviewTarget) -> Element {
    let gateway = use_gateway();
    let scope = use_fetch_scope();
    let auth = use_auth();
    let mut notices = use_notices();
    let mut entries = use_signal(Vec::<ReviewEntry>::new);
    let mut loading = use_signal(|| true);
    let mut refresh = use_signal(|| 0u32);
    let mut tab = use_signal(|| ReviewTab::All);

    let mut target_signal = use_signal(|| target.clone());
    if *target_signal.peek() != target {
        target_signal.set(target.clone());
    }

    let _loader = use_resource(move || {
        let target = target_signal();
        let _ = refresh();
        let gateway = gateway.clone();
        let scope = scope.clone();
        async move {
            loading.set(true);
            let Some(result) = scope.run(load_reviews(&gateway, &target)).await else {
                return;
            };
            match result {
                Ok(loaded) => entries.set(loaded),
                Err(e) => {
                    tracing::error!(entity = target.id(), error = %e, "Error fetching reviews");
                    push_notice(&mut notices, NoticeLevel::Error, "Failed to load reviews");
                }
            }
            loading.set(false);
        }
    });

    let state = auth();
    let affordance = ReviewAffordance::evaluate(state.session.as_ref(), &entries.read());
    let average = average_rating(&entries.read());
    let count = entries.read().len();

    rsx! {
        section {
            class: "reviews",
            h2 { "Reviews & Ratings" }
            if let Some(average) = average {
                p {
                    class: "card-subtitle",
                    StarRating { rating: average }
                    " from {count} reviews"
                }
            }
            div {
                class: "tabs",
                button {
                    class: if tab() == ReviewTab::All { "tab active" } else { "tab" },
                    onclick: move |_| tab.set(ReviewTab::All),
                    "All Reviews"
                }
                button {
                    class: if tab() == ReviewTab::Write { "tab active" } else { "tab" },
                    disabled: affordance == ReviewAffordance::SignIn,
                    onclick: move |_| tab.set(ReviewTab::Write),
                    {affordance.tab_label()}
                }
            }
            match tab() {
                ReviewTab::All => rsx! {
                    ReviewList { entries: entries(), loading: loading() }
                },
                ReviewTab::Write => rsx! {
                    ReviewForm {
                        target: target_signal(),
                        entries: entries(),
                        affordance,
                        on_submitted: move |_| {
                            tab.set(ReviewTab::All);
                            refresh += 1;
                        },
                    }
                },
            }
        }
    }
}

#[component]
pub fn ReviewList(entries: Vec<ReviewEntry>, loading: bool) -> Element {
    if loading {
        return rsx! { p { class: "empty-state", "Loading reviews..." } };
    }
    if entries.is_empty() {
        return rsx! { p { class: "empty-state", "No reviews yet. Be the first to share your experience!" } };
    }

    rsx! {
        div {
            for entry in entries {
                div {
                    key: "{entry.review.id}",
                    class: "review",
                    div {
                        strong { "{entry.user_name}" }
                        " "
                        StarRating { rating: f64::from(entry.review.rating) }
                    }
                    if let Some(comment) = &entry.review.comment {
                        p { "{comment}" }
                    }
                    span {
                        class: "review-meta",
                        {entry.review.created_at.format("%B %-d, %Y").to_string()}
                    }
                }
            }
        }
    }
}

#[component]
fn ReviewForm(
    target: ReviewTarget,
    entries: Vec<ReviewEntry>,
    affordance: ReviewAffordance,
    on_submitted: EventHandler<()>,
) -> Element {
    let gateway = use_gateway();
    let auth = use_auth();
    let mut notices = use_notices();
    let mut rating = use_signal(|| 0u8);
    let mut comment = use_signal(String::new);
    let mut submitting = use_signal(|| false);

    if affordance == ReviewAffordance::AlreadyReviewed {
        return rsx! {
            p { class: "empty-state", "You have already reviewed this place. Thank you!" }
        };
    }

    let handle_submit = move |_| {
        let gateway = gateway.clone();
        let target = target.clone();
        let entries = entries.clone();
        spawn(async move {
            submitting.set(true);
            let session = auth().session;
            let draft = ReviewDraft {
                rating: rating(),
                comment: comment(),
            };
            match submit_review(&gateway, target, session.as_ref(), &entries, &draft).await {
                Ok(_) => {
                    push_notice(&mut notices, NoticeLevel::Success, "Review submitted!");
                    rating.set(0);
                    comment.set(String::new());
                    on_submitted.call(());
                }
                Err(e @ ReviewError::Gateway(_)) => {
                    push_notice(&mut notices, NoticeLevel::Error, &e.to_string());
                }
                Err(e) => push_notice(&mut notices, NoticeLevel::Warning, &e.to_string()),
            }
            submitting.set(false);
        });
    };

    rsx! {
        div {
            class: "review-form",
            div {
                class: "star-picker",
                for value in 1..=5u8 {
                    button {
                        key: "{value}",
                        class: if value <= rating() { "lit" } else { "" },
                        title: "{value} star",
                        onclick: move |_| rating.set(value),
                        Icon { icon: FaStar, width: 20, height: 20 }
                    }
                }
            }
            textarea {
                placeholder: "Share your experience (optional)",
                value: comment(),
                oninput: move |evt| comment.set(evt.value()),
            }
            button {
                class: "primary",
                disabled: submitting() || rating() == 0,
                onclick: handle_submit,
                if submitting() { "Submitting..." } else { "Submit Review" }
            }
        }
    }
}
