//! Transient user-facing messages.

use std::time::Duration;

use crate::error::ErrorKind;

/// How long a front end should keep a notification on screen.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    /// Set for failures only.
    pub kind: Option<ErrorKind>,
    pub title: String,
    pub text: String,
    pub ttl: Duration,
}

impl Notification {
    pub fn success(title: &str, text: &str) -> Self {
        Self {
            level: Level::Success,
            kind: None,
            title: title.to_string(),
            text: text.to_string(),
            ttl: NOTIFICATION_TTL,
        }
    }

    pub fn failure(kind: ErrorKind, text: &str) -> Self {
        Self {
            level: Level::Error,
            kind: Some(kind),
            title: "Error".to_string(),
            text: text.to_string(),
            ttl: NOTIFICATION_TTL,
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}
