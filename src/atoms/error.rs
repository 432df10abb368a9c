// ── Hookchat Atoms: Error Types ────────────────────────────────────────────
// Single canonical error enum for the crate, built with `thiserror`.
//
// Design rules:
//   • Variants are coarse-grained by failure domain (auth, timeout, network,
//     wire format, remote application error).
//   • `#[from]` wires the reqwest/serde_json conversions automatically.
//   • Every variant is classifiable: `engine::classify` maps any value of
//     this enum into a renderable `ChatReply` without panicking.
//   • No variant carries secret material (bearer tokens) in its message.

use crate::atoms::types::ChatReply;
use thiserror::Error;

// ── Primary error enum ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ChatError {
    /// No authenticated session. Raised before any network call.
    #[error("Auth error: {0}")]
    Auth(String),

    /// The per-call deadline expired and the in-flight request was dropped.
    /// `message` is the cancellation's own text, when it had one.
    #[error("{}", message.as_deref().unwrap_or(crate::atoms::constants::MSG_TIMEOUT))]
    Timeout { message: Option<String> },

    /// Connection to the endpoint could not be established.
    #[error("Network error: {0}")]
    Network(String),

    /// The endpoint answered with a content type other than JSON.
    #[error("Invalid response format: Server did not return JSON")]
    InvalidFormat { content_type: Option<String> },

    /// The endpoint answered with an empty or unparseable JSON body.
    #[error("Failed to parse server response: {details}")]
    Parse { details: String },

    /// The payload was JSON but lacks the required shape.
    #[error("Response validation failed: {0}")]
    Validation(String),

    /// Non-2xx HTTP status with a parsed JSON body. The body may itself be a
    /// structured error payload; classification runs it through the
    /// normalizer.
    #[error("Remote error (HTTP {status})")]
    RemoteBody { status: u16, body: serde_json::Value },

    /// The remote workflow reported an application-level failure (including
    /// 200 responses whose normalized status is not success).
    #[error("{}", reply.message.as_deref().unwrap_or(crate::atoms::constants::MSG_UNEXPECTED))]
    Remote { reply: Box<ChatReply> },

    /// Transport-layer failure from the HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization failure (history blobs, envelopes).
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Agent catalog or endpoint configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catch-all for failures without a dedicated variant.
    /// Prefer adding a specific variant over using this in new code.
    #[error("{0}")]
    Other(String),
}

// ── Convenience constructors ───────────────────────────────────────────────

impl ChatError {
    /// Timeout with no message from the cancellation source.
    pub fn timed_out() -> Self {
        ChatError::Timeout { message: None }
    }

    /// Remote application-level failure carrying its normalized reply.
    pub fn remote(reply: ChatReply) -> Self {
        ChatError::Remote { reply: Box::new(reply) }
    }
}

// ── Migration bridge: String → ChatError ──────────────────────────────────
// Allows `?` on helpers still returning `Result<T, String>`.

impl From<String> for ChatError {
    fn from(s: String) -> Self {
        ChatError::Other(s)
    }
}

impl From<&str> for ChatError {
    fn from(s: &str) -> Self {
        ChatError::Other(s.to_string())
    }
}

// ── Convenience alias ──────────────────────────────────────────────────────

/// All crate operations return this type.
pub type ChatResult<T> = Result<T, ChatError>;
