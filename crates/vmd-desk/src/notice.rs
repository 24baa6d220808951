use std::time::{Duration, Instant};

pub const SAVE_SUCCESS_MESSAGE: &str = "Sıralama kaydedildi!";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient banner. Success notices expire; error notices stay until the
/// next action replaces them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub expires_at: Option<Instant>,
}

impl Notice {
    pub fn success(message: impl Into<String>, ttl: Duration, now: Instant) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
            expires_at: Some(now + ttl),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
            expires_at: None,
        }
    }

    pub fn is_visible_at(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |t| now < t)
    }
}
