use serde::{Deserialize, Serialize};

pub mod order;
pub mod quote;
pub mod submission;

pub use order::{Order, OrderDraft, Side};
pub use quote::TriggerQuote;
pub use submission::{SubmissionReport, SubmissionResult, SubmittedOrder};

// ==================================================
// ORDER INTAKE ACK
// ==================================================

/// Body of a 2xx answer from `POST /order`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderAck {
    #[serde(rename = "requestId")]
    pub request_id: Option<String>,
    pub status: Option<String>,
    pub execute_in_seconds: Option<u64>,
}

// ==================================================
// NOTIFICATIONS
// ==================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}
