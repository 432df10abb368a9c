// ── Hookchat Atoms: Core Types ─────────────────────────────────────────────
// The canonical reply record, the outbound request envelope, and their
// building blocks. Data definitions and deterministic helpers only.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::atoms::constants::MSG_UNEXPECTED;

// ── Reply status ───────────────────────────────────────────────────────────

/// Status vocabulary shared with the remote workflow engine. The remote side
/// may set `status` explicitly; otherwise it is inferred from the payload
/// shape during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStatus {
    Success,
    Error,
    Timeout,
    ValidationError,
    ServerError,
    NetworkError,
}

impl ResponseStatus {
    pub fn is_success(self) -> bool {
        self == ResponseStatus::Success
    }
}

// ── Suggestions ────────────────────────────────────────────────────────────

/// Remediation hints. The wire format sends either one string or an ordered
/// list; both shapes round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Suggestions {
    One(String),
    Many(Vec<String>),
}

impl Suggestions {
    /// Flatten to a list for rendering.
    pub fn as_list(&self) -> Vec<&str> {
        match self {
            Suggestions::One(s) => vec![s.as_str()],
            Suggestions::Many(v) => v.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&[&str]> for Suggestions {
    fn from(items: &[&str]) -> Self {
        Suggestions::Many(items.iter().map(|s| s.to_string()).collect())
    }
}

// ── Canonical reply ────────────────────────────────────────────────────────

/// The one record the service layer hands to its caller, for success and
/// failure alike. Built once per request/response cycle and never mutated.
///
/// Invariants (upheld by the constructors and the normalizer):
///   • `status == Success` implies `code` is `None`.
///   • a non-success reply carries a non-empty `message`, unless
///     `suggestions` stand in for one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Suggestions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl ChatReply {
    /// Successful reply with just a message.
    pub fn success(message: impl Into<String>) -> Self {
        ChatReply {
            status: ResponseStatus::Success,
            message: Some(message.into()),
            code: None,
            details: None,
            suggestions: None,
            metadata: None,
        }
    }

    /// Failure reply with a status, message, and optional code. Falls back
    /// to the generic message when given an empty one.
    pub fn failure(status: ResponseStatus, message: impl Into<String>, code: Option<String>) -> Self {
        let message = message.into();
        let message = if message.is_empty() { MSG_UNEXPECTED.to_string() } else { message };
        ChatReply {
            status,
            message: Some(message),
            code: if status.is_success() { None } else { code },
            details: None,
            suggestions: None,
            metadata: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_suggestions(mut self, suggestions: Suggestions) -> Self {
        self.suggestions = Some(suggestions);
        self
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

// ── Request envelope ───────────────────────────────────────────────────────

/// Caller identity embedded in every envelope. Field names follow the wire
/// contract of the remote workflows (`user_metadata`, not `metadata`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvelopeUser {
    pub email: String,
    pub id: String,
    pub user_metadata: Value,
}

/// The JSON body of one outbound webhook call. Built fresh per call, never
/// reused.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatEnvelope {
    pub message: String,
    #[serde(rename = "chatId")]
    pub chat_id: String,
    pub user: EnvelopeUser,
    /// ISO-8601, captured at call time.
    pub timestamp: String,
}

impl ChatEnvelope {
    pub fn new(message: impl Into<String>, chat_id: impl Into<String>, user: EnvelopeUser) -> Self {
        ChatEnvelope {
            message: message.into(),
            chat_id: chat_id.into(),
            user,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(serde_json::to_value(ResponseStatus::NetworkError).unwrap(), json!("network_error"));
        assert_eq!(
            serde_json::from_value::<ResponseStatus>(json!("validation_error")).unwrap(),
            ResponseStatus::ValidationError
        );
    }

    #[test]
    fn suggestions_accept_string_or_list() {
        let one: Suggestions = serde_json::from_value(json!("try again")).unwrap();
        assert_eq!(one.as_list(), vec!["try again"]);

        let many: Suggestions = serde_json::from_value(json!(["a", "b"])).unwrap();
        assert_eq!(many.as_list(), vec!["a", "b"]);
    }

    #[test]
    fn success_reply_never_carries_code() {
        let reply = ChatReply::failure(ResponseStatus::Success, "ok", Some("X1".into()));
        assert!(reply.code.is_none());
    }

    #[test]
    fn failure_reply_fills_empty_message() {
        let reply = ChatReply::failure(ResponseStatus::Error, "", Some("X1".into()));
        assert_eq!(reply.message.as_deref(), Some("An unexpected error occurred"));
        assert_eq!(reply.code.as_deref(), Some("X1"));
    }

    #[test]
    fn reply_omits_absent_fields_on_the_wire() {
        let reply = ChatReply::success("Hello");
        let json = serde_json::to_string(&reply).unwrap();
        assert!(json.contains("\"status\":\"success\""));
        assert!(!json.contains("\"code\""));
        assert!(!json.contains("\"metadata\""));
    }

    #[test]
    fn envelope_uses_wire_field_names() {
        let user = EnvelopeUser {
            email: "donna@example.com".into(),
            id: "u-1".into(),
            user_metadata: json!({"role": "hr"}),
        };
        let envelope = ChatEnvelope::new("hi", "HRV1_0412_sde4", user);
        let v = serde_json::to_value(&envelope).unwrap();
        assert_eq!(v["chatId"], json!("HRV1_0412_sde4"));
        assert_eq!(v["user"]["user_metadata"]["role"], json!("hr"));
        assert!(v["timestamp"].as_str().unwrap().contains('T'));
    }
}
