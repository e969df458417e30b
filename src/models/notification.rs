//! In-app notification model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::NotificationId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Info,
    Warning,
    Success,
    Alert,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Success => write!(f, "success"),
            Self::Alert => write!(f, "alert"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppNotification {
    pub id: NotificationId,

    /// Stable key used to avoid pushing the same reminder twice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    pub title: String,

    pub message: String,

    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub is_read: bool,

    #[serde(rename = "type")]
    pub kind: NotificationKind,
}

impl AppNotification {
    pub fn new(kind: NotificationKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            key: None,
            title: title.into(),
            message: message.into(),
            created_at: Utc::now(),
            is_read: false,
            kind,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn mark_read(&mut self) {
        self.is_read = true;
    }
}

impl fmt::Display for AppNotification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.title, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_unread() {
        let n = AppNotification::new(NotificationKind::Warning, "Budget Warning", "80%");
        assert!(!n.is_read);
        assert!(n.key.is_none());
        assert_eq!(n.to_string(), "[warning] Budget Warning: 80%");
    }

    #[test]
    fn test_with_key_and_serialize() {
        let n = AppNotification::new(NotificationKind::Alert, "t", "m").with_key("bill-1");
        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["key"], "bill-1");
        assert_eq!(json["type"], "alert");
    }
}
