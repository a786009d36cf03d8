//! User-facing notices (toasts).

use serde::{Deserialize, Serialize};

/// Tone of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
    /// Order confirmed; presentation layers play their celebration here.
    Celebrate,
}

impl NoticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
            NoticeKind::Celebrate => "celebrate",
        }
    }
}

/// A short message for the customer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, title, description)
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, title, description)
    }

    pub fn celebrate(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(NoticeKind::Celebrate, title, description)
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.title, self.description)
    }
}
