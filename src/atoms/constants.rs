// ── Hookchat Atoms: Constants ──────────────────────────────────────────────
// All named constants for the crate live here. Collecting them in one place
// eliminates magic strings and keeps the wire contract auditable.

// ── Dispatch timing ────────────────────────────────────────────────────────
// The wall-clock deadline is deployment-configurable via `ApiConfig`; this is
// only the default. Earlier deployments ran with 30s.
pub const DEFAULT_TIMEOUT_MS: u64 = 180_000;

/// Connect timeout on the shared HTTP client. Separate from the per-call
/// deadline so a dead host fails fast instead of eating the whole budget.
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

// ── Machine-readable error codes ───────────────────────────────────────────
// These travel in `ChatReply.code` and are matched on by the UI layer.
// Treat as stable identifiers.
pub const CODE_TIMEOUT: &str = "TIMEOUT_ERROR";
pub const CODE_NETWORK: &str = "NETWORK_ERROR";
pub const CODE_PARSE: &str = "PARSE_ERROR";
pub const CODE_INVALID_FORMAT: &str = "INVALID_RESPONSE_FORMAT";
pub const CODE_UNKNOWN: &str = "UNKNOWN_ERROR";

// ── User-facing fallback messages ──────────────────────────────────────────
pub const MSG_TIMEOUT: &str = "Request timed out";
pub const MSG_NETWORK: &str = "Unable to connect to the service";
pub const MSG_INVALID_FORMAT: &str = "Invalid response format: Server did not return JSON";
pub const MSG_PARSE: &str = "Failed to parse server response";
pub const MSG_UNEXPECTED: &str = "An unexpected error occurred";

/// Generic remediation shown with parse failures.
pub const PARSE_SUGGESTIONS: [&str; 2] = ["Please try again", "Contact support if the issue persists"];

// ── Chat identifiers ───────────────────────────────────────────────────────
/// Length of the random suffix in a chat id (`HRV1_0412_sde4`).
pub const CHAT_ID_RANDOM_LEN: usize = 4;
