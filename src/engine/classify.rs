// Hookchat Engine — Error Classifier
//
// Maps every failure the dispatch path can produce into one renderable
// `ChatReply`. Total: any `ChatError`, and any raw JSON value via
// `classify_value`, yields a reply. Nothing in this module panics or
// returns an error.
//
// Classification order, first match wins:
//   1. cancellation (deadline)   → timeout / TIMEOUT_ERROR
//   2. connect failure           → network_error / NETWORK_ERROR
//   3. embedded response body    → normalizer, falling back to UNKNOWN_ERROR
//   4. everything else           → error / UNKNOWN_ERROR

use serde_json::Value;

use crate::atoms::constants::{
    CODE_INVALID_FORMAT, CODE_NETWORK, CODE_PARSE, CODE_TIMEOUT, CODE_UNKNOWN, MSG_INVALID_FORMAT,
    MSG_NETWORK, MSG_PARSE, MSG_TIMEOUT, MSG_UNEXPECTED, PARSE_SUGGESTIONS,
};
use crate::atoms::error::ChatError;
use crate::atoms::types::{ChatReply, ResponseStatus, Suggestions};
use crate::engine::response::normalize;

// ── Classification over crate errors ───────────────────────────────────────

/// Classify a dispatch failure. Never fails.
pub fn classify(err: &ChatError) -> ChatReply {
    match err {
        ChatError::Timeout { message } => timeout_reply(message.as_deref()),

        ChatError::Network(_) => network_reply(),

        // Transport errors from the HTTP client: a connect failure means the
        // service was unreachable; a client-side timeout is a cancellation.
        ChatError::Http(e) if e.is_connect() => network_reply(),
        ChatError::Http(e) if e.is_timeout() => timeout_reply(None),

        // Non-2xx with a JSON body: the body often is a structured error
        // payload. Let the normalizer read it; fall back when it cannot.
        ChatError::RemoteBody { body, .. } => normalize(body)
            .unwrap_or_else(|_| ChatReply::failure(
                ResponseStatus::Error,
                err.to_string(),
                Some(CODE_UNKNOWN.into()),
            )),

        // Already normalized by the dispatch path; surface as-is.
        ChatError::Remote { reply } => (**reply).clone(),

        ChatError::InvalidFormat { content_type } => ChatReply::failure(
            ResponseStatus::Error,
            MSG_INVALID_FORMAT,
            Some(CODE_INVALID_FORMAT.into()),
        )
        .with_details(format!(
            "Received content-type: {}",
            content_type.as_deref().unwrap_or("none")
        )),

        ChatError::Parse { details } => ChatReply::failure(
            ResponseStatus::Error,
            MSG_PARSE,
            Some(CODE_PARSE.into()),
        )
        .with_details(details.clone())
        .with_suggestions(Suggestions::from(&PARSE_SUGGESTIONS[..])),

        // Auth, validation, serialization, config, and the catch-all: the
        // error's own message with the generic code.
        other => ChatReply::failure(
            ResponseStatus::Error,
            other.to_string(),
            Some(CODE_UNKNOWN.into()),
        ),
    }
}

fn timeout_reply(message: Option<&str>) -> ChatReply {
    ChatReply::failure(
        ResponseStatus::Timeout,
        message.unwrap_or(MSG_TIMEOUT),
        Some(CODE_TIMEOUT.into()),
    )
}

fn network_reply() -> ChatReply {
    ChatReply::failure(ResponseStatus::NetworkError, MSG_NETWORK, Some(CODE_NETWORK.into()))
}

// ── Classification over raw values ─────────────────────────────────────────

/// Classify an arbitrary JSON value as a failure. Covers failure payloads
/// that arrive as data rather than as typed errors: plain strings, numbers,
/// null, and loosely shaped objects all produce a reply.
pub fn classify_value(value: &Value) -> ChatReply {
    if let Some(fields) = value.as_object() {
        // Cancellation marker, with or without its own message.
        if fields.get("name").and_then(Value::as_str) == Some("AbortError") {
            return timeout_reply(fields.get("message").and_then(Value::as_str));
        }

        // Transport failure marker.
        let message = fields.get("message").and_then(Value::as_str);
        if fields.get("name").and_then(Value::as_str) == Some("TypeError")
            && message.is_some_and(|m| m.contains("NetworkError"))
        {
            return network_reply();
        }

        // Embedded response body: hand it to the normalizer.
        if let Some(body) = fields.get("response") {
            return normalize(body).unwrap_or_else(|_| ChatReply::failure(
                ResponseStatus::Error,
                message.unwrap_or(MSG_UNEXPECTED),
                Some(CODE_UNKNOWN.into()),
            ));
        }

        return ChatReply::failure(
            ResponseStatus::Error,
            message.unwrap_or(MSG_UNEXPECTED),
            Some(CODE_UNKNOWN.into()),
        );
    }

    // Strings carry their own text; every other scalar gets the fallback.
    let message = match value.as_str() {
        Some(s) if !s.is_empty() => s,
        _ => MSG_UNEXPECTED,
    };
    ChatReply::failure(ResponseStatus::Error, message, Some(CODE_UNKNOWN.into()))
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cancellation_is_always_timeout() {
        let reply = classify(&ChatError::timed_out());
        assert_eq!(reply.status, ResponseStatus::Timeout);
        assert_eq!(reply.code.as_deref(), Some("TIMEOUT_ERROR"));
        assert_eq!(reply.message.as_deref(), Some("Request timed out"));

        let reply = classify(&ChatError::Timeout { message: Some("The operation was aborted".into()) });
        assert_eq!(reply.status, ResponseStatus::Timeout);
        assert_eq!(reply.code.as_deref(), Some("TIMEOUT_ERROR"));
        assert_eq!(reply.message.as_deref(), Some("The operation was aborted"));
    }

    #[test]
    fn connect_failure_is_network_error() {
        let reply = classify(&ChatError::Network("connection refused".into()));
        assert_eq!(reply.status, ResponseStatus::NetworkError);
        assert_eq!(reply.code.as_deref(), Some("NETWORK_ERROR"));
        assert_eq!(reply.message.as_deref(), Some("Unable to connect to the service"));
    }

    #[test]
    fn remote_body_runs_through_normalizer() {
        let err = ChatError::RemoteBody {
            status: 422,
            body: json!({"error": {"message": "missing field", "code": "V1"}}),
        };
        let reply = classify(&err);
        assert_eq!(reply.status, ResponseStatus::Error);
        assert_eq!(reply.message.as_deref(), Some("missing field"));
        assert_eq!(reply.code.as_deref(), Some("V1"));
    }

    #[test]
    fn unnormalizable_remote_body_falls_back() {
        let err = ChatError::RemoteBody { status: 500, body: json!({"unrelated": true}) };
        let reply = classify(&err);
        assert_eq!(reply.status, ResponseStatus::Error);
        assert_eq!(reply.code.as_deref(), Some("UNKNOWN_ERROR"));
        assert_eq!(reply.message.as_deref(), Some("Remote error (HTTP 500)"));
    }

    #[test]
    fn normalized_remote_failure_surfaces_as_is() {
        let inner = ChatReply::failure(ResponseStatus::ServerError, "flow crashed", Some("W9".into()));
        let reply = classify(&ChatError::remote(inner.clone()));
        assert_eq!(reply, inner);
    }

    #[test]
    fn invalid_format_names_the_content_type() {
        let err = ChatError::InvalidFormat { content_type: Some("text/html".into()) };
        let reply = classify(&err);
        assert_eq!(reply.code.as_deref(), Some("INVALID_RESPONSE_FORMAT"));
        assert_eq!(reply.details.as_deref(), Some("Received content-type: text/html"));

        let err = ChatError::InvalidFormat { content_type: None };
        assert_eq!(classify(&err).details.as_deref(), Some("Received content-type: none"));
    }

    #[test]
    fn parse_failure_carries_remediation() {
        let reply = classify(&ChatError::Parse { details: "Empty response".into() });
        assert_eq!(reply.code.as_deref(), Some("PARSE_ERROR"));
        assert_eq!(reply.details.as_deref(), Some("Empty response"));
        assert_eq!(
            reply.suggestions.unwrap().as_list(),
            vec!["Please try again", "Contact support if the issue persists"]
        );
    }

    #[test]
    fn auth_and_validation_fall_through_with_their_message() {
        let reply = classify(&ChatError::Auth("No active session".into()));
        assert_eq!(reply.status, ResponseStatus::Error);
        assert_eq!(reply.code.as_deref(), Some("UNKNOWN_ERROR"));
        assert_eq!(reply.message.as_deref(), Some("Auth error: No active session"));

        let reply = classify(&ChatError::Validation("Missing output field".into()));
        assert_eq!(reply.message.as_deref(), Some("Response validation failed: Missing output field"));
    }

    #[test]
    fn value_classification_is_total() {
        for raw in [json!("boom"), json!(42), json!(null), json!({"weird": true}), json!([1])] {
            let reply = classify_value(&raw);
            assert_eq!(reply.status, ResponseStatus::Error, "{:?}", raw);
            assert_eq!(reply.code.as_deref(), Some("UNKNOWN_ERROR"));
            assert!(!reply.message.as_deref().unwrap_or_default().is_empty());
        }
        assert_eq!(classify_value(&json!("boom")).message.as_deref(), Some("boom"));
    }

    #[test]
    fn value_classification_spots_cancellation_markers() {
        let reply = classify_value(&json!({"name": "AbortError"}));
        assert_eq!(reply.status, ResponseStatus::Timeout);
        assert_eq!(reply.code.as_deref(), Some("TIMEOUT_ERROR"));

        let reply = classify_value(&json!({"name": "TypeError", "message": "NetworkError when attempting to fetch resource"}));
        assert_eq!(reply.status, ResponseStatus::NetworkError);
    }

    #[test]
    fn value_classification_reads_embedded_responses() {
        let reply = classify_value(&json!({
            "message": "Request failed",
            "response": {"error": {"message": "quota exhausted", "code": "Q1"}}
        }));
        assert_eq!(reply.message.as_deref(), Some("quota exhausted"));
        assert_eq!(reply.code.as_deref(), Some("Q1"));

        // Unreadable embedded body: fall back to the failure's own message.
        let reply = classify_value(&json!({"message": "Request failed", "response": "gone"}));
        assert_eq!(reply.message.as_deref(), Some("Request failed"));
        assert_eq!(reply.code.as_deref(), Some("UNKNOWN_ERROR"));
    }
}
