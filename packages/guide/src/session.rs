//! Session context passed explicitly to the views that need it.
//!
//! A [`SessionContext`] holds the signed-in [`Session`] (if any) and a list of
//! listeners. Views subscribe on mount and keep the returned [`Subscription`];
//! dropping it (or calling [`Subscription::unsubscribe`]) removes the listener.
//! The context is single-threaded: it lives on the UI thread and is cloned by
//! handle.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

/// The signed-in user as reported by the backend's session API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, skip_serializing)]
    pub access_token: Option<String>,
}

type Listener = Rc<dyn Fn(Option<&Session>)>;

#[derive(Default)]
struct Inner {
    current: Option<Session>,
    listeners: Vec<(u64, Listener)>,
    next_id: u64,
}

#[derive(Clone, Default)]
pub struct SessionContext {
    inner: Rc<RefCell<Inner>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Session> {
        self.inner.borrow().current.clone()
    }

    pub fn user_id(&self) -> Option<String> {
        self.inner.borrow().current.as_ref().map(|s| s.user_id.clone())
    }

    /// Replace the session. Listeners run once, and only if the value changed.
    pub fn set(&self, session: Option<Session>) {
        let listeners: Vec<Listener> = {
            let mut inner = self.inner.borrow_mut();
            if inner.current == session {
                return;
            }
            inner.current = session.clone();
            inner.listeners.iter().map(|(_, l)| l.clone()).collect()
        };
        tracing::debug!(
            signed_in = session.is_some(),
            listeners = listeners.len(),
            "Session changed"
        );
        // Borrow released: a listener may read the context or unsubscribe.
        for listener in listeners {
            listener(session.as_ref());
        }
    }

    pub fn subscribe(&self, listener: impl Fn(Option<&Session>) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Rc::new(listener)));
        Subscription {
            id,
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("SessionContext")
            .field("current", &inner.current)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

/// Handle for a registered listener. Unsubscribes on drop.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    inner: Weak<RefCell<Inner>>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        // Drop does the work.
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.borrow_mut().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn session(id: &str) -> Session {
        Session {
            user_id: id.to_string(),
            email: None,
            access_token: None,
        }
    }

    #[test]
    fn test_listener_sees_changes() {
        let ctx = SessionContext::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _sub = ctx.subscribe(move |s| sink.borrow_mut().push(s.map(|s| s.user_id.clone())));

        ctx.set(Some(session("u1")));
        ctx.set(Some(session("u1")));
        ctx.set(None);

        assert_eq!(*seen.borrow(), vec![Some("u1".to_string()), None]);
        assert_eq!(ctx.user_id(), None);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let ctx = SessionContext::new();
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let sub = ctx.subscribe(move |_| counter.set(counter.get() + 1));
        assert_eq!(ctx.listener_count(), 1);

        ctx.set(Some(session("u1")));
        sub.unsubscribe();
        ctx.set(None);

        assert_eq!(calls.get(), 1);
        assert_eq!(ctx.listener_count(), 0);
    }

    #[test]
    fn test_subscription_outliving_context() {
        let ctx = SessionContext::new();
        let sub = ctx.subscribe(|_| {});
        drop(ctx);
        drop(sub);
    }
}
