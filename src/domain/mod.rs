/// Domain models for the application
use crate::errors::ErrorKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Provider classification of the day's content.
///
/// Only `"image"` maps to [`MediaType::Image`]; every other value the
/// provider sends, including null or a missing field, is displayed as a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Option<Value>")]
pub enum MediaType {
    Image,
    #[default]
    Video,
}

impl From<Option<Value>> for MediaType {
    fn from(raw: Option<Value>) -> Self {
        match raw {
            Some(Value::String(s)) if s == "image" => MediaType::Image,
            _ => MediaType::Video,
        }
    }
}

/// Astronomy Picture of the Day, as received from the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApodRecord {
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub media_type: MediaType,
    #[serde(default)]
    pub url: String,
    pub explanation: String,
    #[serde(default)]
    pub copyright: Option<String>,
}

/// Classified result of the most recent fetch attempt
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestOutcome {
    #[default]
    Idle,
    Loading,
    Success {
        payload: ApodRecord,
    },
    Failure {
        message: String,
        kind: ErrorKind,
    },
}

impl RequestOutcome {
    /// Failure outcome whose message is the kind's user-facing text
    pub fn failure(kind: ErrorKind) -> Self {
        RequestOutcome::Failure {
            message: kind.to_string(),
            kind,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, RequestOutcome::Failure { .. })
    }

    /// Short state name for logs
    pub fn label(&self) -> &'static str {
        match self {
            RequestOutcome::Idle => "idle",
            RequestOutcome::Loading => "loading",
            RequestOutcome::Success { .. } => "success",
            RequestOutcome::Failure { .. } => "failure",
        }
    }
}

/// Health check response
#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub now: DateTime<Utc>,
}
