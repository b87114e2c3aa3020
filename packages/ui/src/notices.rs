//! Transient user-visible notices.
//!
//! Every notice is mirrored to `tracing` at the matching level, so a failure
//! the user sees is also in the logs.

use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn class(self) -> &'static str {
        match self {
            Self::Info => "notice info",
            Self::Success => "notice success",
            Self::Warning => "notice warning",
            Self::Error => "notice error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub timestamp: String,
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct NoticeLog {
    pub entries: Vec<Notice>,
    next_id: u64,
}

/// How long a notice stays on screen before it is dismissed.
pub const NOTICE_TTL_MS: u32 = 5_000;

/// Oldest notices are dropped beyond this many.
const MAX_NOTICES: usize = 5;

impl NoticeLog {
    pub fn push(&mut self, level: NoticeLevel, message: &str, timestamp: String) -> u64 {
        self.next_id += 1;
        self.entries.push(Notice {
            id: self.next_id,
            timestamp,
            level,
            message: message.to_string(),
        });
        if self.entries.len() > MAX_NOTICES {
            let excess = self.entries.len() - MAX_NOTICES;
            self.entries.drain(..excess);
        }
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|n| n.id != id);
    }
}

pub fn use_notices() -> Signal<NoticeLog> {
    use_context::<Signal<NoticeLog>>()
}

pub fn push_notice(log: &mut Signal<NoticeLog>, level: NoticeLevel, message: &str) {
    match level {
        NoticeLevel::Error => tracing::error!("{message}"),
        NoticeLevel::Warning => tracing::warn!("{message}"),
        NoticeLevel::Info | NoticeLevel::Success => tracing::info!("{message}"),
    }
    let id = log.write().push(level, message, current_time());

    #[cfg(target_arch = "wasm32")]
    {
        let mut log = *log;
        spawn(async move {
            gloo_timers::future::TimeoutFuture::new(NOTICE_TTL_MS).await;
            log.write().dismiss(id);
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = id;
}

#[cfg(target_arch = "wasm32")]
fn current_time() -> String {
    let date = js_sys::Date::new_0();
    let h = date.get_hours();
    let m = date.get_minutes();
    format!("{h:02}:{m:02}")
}

#[cfg(not(target_arch = "wasm32"))]
fn current_time() -> String {
    "00:00".to_string()
}

#[component]
pub fn NoticeStack() -> Element {
    let mut log = use_notices();
    let entries = log().entries.clone();

    if entries.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "notice-stack",
            for notice in entries {
                div {
                    key: "{notice.id}",
                    class: notice.level.class(),
                    span { class: "notice-time", "{notice.timestamp}" }
                    span { "{notice.message}" }
                    button {
                        onclick: move |_| log.write().dismiss(notice.id),
                        "×"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let mut log = NoticeLog::default();
        let first = log.push(NoticeLevel::Error, "Failed to load spots", "10:00".into());
        let second = log.push(NoticeLevel::Success, "Review submitted", "10:01".into());
        assert_ne!(first, second);

        log.dismiss(first);
        assert_eq!(log.entries.len(), 1);
        assert_eq!(log.entries[0].message, "Review submitted");
    }

    #[test]
    fn test_oldest_dropped_past_limit() {
        let mut log = NoticeLog::default();
        for i in 0..8 {
            log.push(NoticeLevel::Info, &format!("n{i}"), String::new());
        }
        assert_eq!(log.entries.len(), MAX_NOTICES);
        assert_eq!(log.entries[0].message, "n3");
    }
}
