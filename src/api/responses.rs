//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{CountdownView, IntentResult};

/// API response structure for intent endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub view: CountdownView,
}

impl IntentResponse {
    /// Create a new intent response
    pub fn new(status: &str, message: String, view: CountdownView) -> Self {
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            view,
        }
    }

    /// Build the response for an intent, whether or not the engine accepted it
    pub fn from_result(intent: &str, result: IntentResult) -> Self {
        if result.applied {
            Self::new("applied", format!("{} applied", intent), result.view)
        } else {
            let message = format!("{} ignored while {:?}", intent, result.view.state);
            Self::new("ignored", message, result.view)
        }
    }
}

/// Body of a field change request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldInput {
    pub raw: String,
}

/// Status response with server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub view: CountdownView,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
