//! Cancellation scopes for in-flight fetches.
//!
//! A view creates one [`FetchGuard`] for its mounted lifetime and runs every
//! remote call through [`FetchScope::run`]. When the view goes away the guard
//! cancels the scope and any result that arrives afterwards is dropped instead
//! of being written into state the view no longer owns.

use std::future::Future;

use tokio_util::sync::CancellationToken;

#[derive(Clone, Debug, Default)]
pub struct FetchScope {
    token: CancellationToken,
}

impl FetchScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scope cancelled together with this one (but not the other way round).
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Await `fut` and hand its output back only if the scope is still live.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        if self.is_cancelled() {
            return None;
        }
        let output = fut.await;
        if self.is_cancelled() {
            tracing::debug!("Discarding fetch result that arrived after teardown");
            return None;
        }
        Some(output)
    }

    /// Guard that cancels this scope when dropped.
    pub fn guard(&self) -> FetchGuard {
        FetchGuard {
            scope: self.clone(),
        }
    }
}

#[derive(Debug)]
pub struct FetchGuard {
    scope: FetchScope,
}

impl FetchGuard {
    pub fn scope(&self) -> &FetchScope {
        &self.scope
    }
}

impl Drop for FetchGuard {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_live_scope_delivers() {
        let scope = FetchScope::new();
        assert_eq!(scope.run(async { 7 }).await, Some(7));
    }

    #[tokio::test]
    async fn test_result_after_cancel_is_dropped() {
        let scope = FetchScope::new();
        let canceller = scope.clone();
        let out = scope
            .run(async move {
                canceller.cancel();
                "late"
            })
            .await;
        assert_eq!(out, None);
    }

    #[tokio::test]
    async fn test_guard_cancels_children() {
        let scope = FetchScope::new();
        let child = scope.child();
        {
            let _guard = scope.guard();
        }
        assert!(scope.is_cancelled());
        assert!(child.is_cancelled());
        assert_eq!(child.run(async { 1 }).await, None);
    }

    #[test]
    fn test_child_cancel_leaves_parent() {
        let scope = FetchScope::new();
        let child = scope.child();
        child.cancel();
        assert!(!scope.is_cancelled());
    }
}
