// Hookchat Engine — Response Normalizer
//
// The workflow engine's reply shape is inconsistent: success text arrives in
// a top-level `output`, failures arrive either flat or nested under `error`,
// and `status` / `suggestions` / `metadata` may or may not be present. The
// normalizer reads both shapes into one `ChatReply` so no caller ever
// branches on payload shape.
//
// The parse step is an explicit tagged union (output-bearing vs error-only)
// rather than duck-typed field probing.

use serde::Deserialize;
use serde_json::Value;

use crate::atoms::error::{ChatError, ChatResult};
use crate::atoms::types::{ChatReply, ResponseStatus, Suggestions};

// ── Wire shapes ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct WireReply {
    #[serde(default)]
    status: Option<ResponseStatus>,
    #[serde(default)]
    metadata: Option<Value>,
    #[serde(default)]
    suggestions: Option<Suggestions>,
    #[serde(flatten)]
    body: WireBody,
}

/// The two payload shapes the engine emits. `Output` may still carry an
/// `error` object alongside the text (observed on partial failures).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireBody {
    Output {
        output: String,
        #[serde(default)]
        error: Option<WireError>,
    },
    Failed {
        error: WireError,
    },
}

#[derive(Debug, Deserialize)]
struct WireError {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    suggestions: Option<Suggestions>,
}

// ── Normalization ──────────────────────────────────────────────────────────

/// Validate and reshape a raw payload into the canonical reply.
///
/// Fails with `ChatError::Validation` when the payload is null, not an
/// object, or carries neither `output` nor `error`.
pub fn normalize(raw: &Value) -> ChatResult<ChatReply> {
    if raw.is_null() {
        return Err(ChatError::Validation("Empty response received".into()));
    }
    let Some(fields) = raw.as_object() else {
        return Err(ChatError::Validation("Invalid response format: Expected an object".into()));
    };
    if !fields.contains_key("output") && !fields.contains_key("error") {
        return Err(ChatError::Validation("Invalid response format: Missing output field".into()));
    }

    let wire: WireReply = serde_json::from_value(raw.clone())
        .map_err(|e| ChatError::Validation(e.to_string()))?;

    let (message, error) = match wire.body {
        WireBody::Output { output, error } => (Some(output), error),
        WireBody::Failed { error } => (error.message.clone(), Some(error)),
    };

    let status = wire.status.unwrap_or(if error.is_some() {
        ResponseStatus::Error
    } else {
        ResponseStatus::Success
    });

    let (code, details, error_suggestions) = match error {
        Some(e) => (e.code, e.details, e.suggestions),
        None => (None, None, None),
    };
    let suggestions = wire.suggestions.or(error_suggestions);

    // Uphold the reply invariants regardless of what the engine sent.
    let code = if status.is_success() { None } else { code };
    let message = match (&message, &suggestions) {
        (None, None) if !status.is_success() => {
            Some(crate::atoms::constants::MSG_UNEXPECTED.to_string())
        }
        _ => message,
    };

    Ok(ChatReply { status, message, code, details, suggestions, metadata: wire.metadata })
}

// ── Tests ──────────────────────────────────────────────────────────────────
