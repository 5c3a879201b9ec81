use std::fmt;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
    Warning,
}

impl NoticeKind {
    /// CSS modifier used by the toast component
    pub fn css_class(&self) -> &'static str {
        match self {
            NoticeKind::Success => "toast-success",
            NoticeKind::Error => "toast-error",
            NoticeKind::Info => "toast-info",
            NoticeKind::Warning => "toast-warning",
        }
    }
}

/// User-facing outcome of an action, rendered by the frontend as a toast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Warning, message)
    }

    /// Error notice carrying the error's message, or `fallback` when that is blank
    pub fn from_error(err: &ApiError, fallback: &str) -> Self {
        let message = err.to_string();
        if message.trim().is_empty() {
            Self::error(fallback)
        } else {
            Self::error(message)
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
