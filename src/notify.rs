//! Transient notifications
//!
//! Every outcome a user should hear about (a saved record, a failed request)
//! becomes a [`Notification`]. The browser shows it as a toast that expires
//! after `duration_ms`; the CLI prints it once.

use std::fmt;

use crate::api::{ApiError, FALLBACK_MESSAGE, NETWORK_MESSAGE};
use crate::models::RecordId;

pub const SUCCESS_DURATION_MS: u32 = 3000;
pub const INFO_DURATION_MS: u32 = 3000;
pub const WARNING_DURATION_MS: u32 = 5000;
pub const ERROR_DURATION_MS: u32 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl NotificationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationLevel::Success => "success",
            NotificationLevel::Info => "info",
            NotificationLevel::Warning => "warning",
            NotificationLevel::Error => "error",
        }
    }

    pub fn default_duration_ms(&self) -> u32 {
        match self {
            NotificationLevel::Success => SUCCESS_DURATION_MS,
            NotificationLevel::Info => INFO_DURATION_MS,
            NotificationLevel::Warning => WARNING_DURATION_MS,
            NotificationLevel::Error => ERROR_DURATION_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: Option<String>,
    pub duration_ms: u32,
}

impl Notification {
    pub fn new(level: NotificationLevel, title: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            description: None,
            duration_ms: level.default_duration_ms(),
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Success, title)
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Info, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Warning, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(NotificationLevel::Error, title)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Map a failed request to what the user sees
    ///
    /// A 403 is a warning (typically an account awaiting approval), an
    /// unreachable server is a "Network Error", anything else an "Error".
    pub fn from_error(err: &ApiError) -> Self {
        let notification = match err {
            ApiError::Forbidden(_) => Notification::warning("Warning"),
            ApiError::Network(_) => Notification::error("Network Error"),
            _ => Notification::error("Error"),
        };
        notification.with_description(err.message())
    }

    pub fn login_succeeded() -> Self {
        Notification::success("Login successful.").with_description("Redirecting to dashboard.")
    }

    /// A rejected login: pending accounts warn, bad credentials error
    pub fn login_failed(err: &ApiError) -> Self {
        match err {
            ApiError::Network(_) => {
                Notification::error("Network Error.").with_description(NETWORK_MESSAGE)
            }
            ApiError::Forbidden(message) => {
                Notification::warning("Login Failed.").with_description(message.clone())
            }
            other => Notification::error("Login Failed.")
                .with_description(message_or(other, "Invalid email or password.")),
        }
    }

    pub fn registration_succeeded() -> Self {
        Notification::success("Registration successful!").with_description("You can now log in.")
    }

    pub fn registration_failed(err: &ApiError) -> Self {
        match err {
            ApiError::Network(_) => {
                Notification::error("Network Error.").with_description(NETWORK_MESSAGE)
            }
            ApiError::Validation(e) => Notification::error("Error").with_description(e.to_string()),
            other => Notification::error("Registration failed.").with_description(other.message()),
        }
    }

    pub fn logged_out() -> Self {
        Notification::success("Logged out successfully.")
    }

    /// A failed record request; `what` reads like "Failed to add property."
    pub fn request_failed(err: &ApiError, what: &str) -> Self {
        match err {
            ApiError::Network(_) => {
                Notification::error("Network Error")
                    .with_description("Please check your connection.")
            }
            ApiError::Forbidden(_) => Notification::from_error(err).with_title("Failed"),
            _ => Notification::error("Failed")
                .with_description(format!("{} {}", what, err.message())),
        }
    }

    /// A record was added, updated or deleted: "Property added successfully."
    pub fn record_changed(noun: &str, past: &str) -> Self {
        Notification::success("Success!")
            .with_description(format!("{} {} successfully.", capitalize(noun), past))
    }
}

/// Whether a record form creates or updates
///
/// Shared by the CLI page controller and the browser pages, which word
/// their outcomes the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(RecordId),
}

impl FormMode {
    pub fn verb(&self) -> &'static str {
        match self {
            FormMode::Create => "add",
            FormMode::Edit(_) => "update",
        }
    }

    fn past(&self) -> &'static str {
        match self {
            FormMode::Create => "added",
            FormMode::Edit(_) => "updated",
        }
    }

    /// "Failed to add property."
    pub fn failed(&self, noun: &str) -> String {
        format!("Failed to {} {}.", self.verb(), noun)
    }

    /// "Property added successfully."
    pub fn succeeded(&self, noun: &str) -> Notification {
        Notification::record_changed(noun, self.past())
    }
}

/// "Failed to fetch property list."
pub fn list_failed(noun: &str) -> String {
    format!("Failed to fetch {} list.", noun)
}

/// "Failed to delete property."
pub fn delete_failed(noun: &str) -> String {
    format!("Failed to delete {}.", noun)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn message_or(err: &ApiError, fallback: &str) -> String {
    let message = err.message();
    if message == FALLBACK_MESSAGE {
        fallback.to_string()
    } else {
        message
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(description) => {
                write!(f, "{}: {}", self.title.trim_end_matches('.'), description)
            }
            None => write!(f, "{}", self.title),
        }
    }
}
