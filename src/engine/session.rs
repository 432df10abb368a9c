// Hookchat Engine — Session Provider Seam
//
// Dispatch needs an authenticated identity and bearer credential before any
// network call. The auth backend itself is an external collaborator, so the
// lookup is an injected capability rather than an ambient singleton. The
// bundled in-memory provider mirrors the auth-state listener of a real
// backend (sessions can be signed in and out at runtime) and doubles as the
// deterministic fake for tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::atoms::error::{ChatError, ChatResult};

// ── Session data ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    /// Arbitrary profile attributes forwarded to the workflows verbatim.
    #[serde(default)]
    pub metadata: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user: UserProfile,
}

// ── Provider trait ─────────────────────────────────────────────────────────

#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// The active session, or `ChatError::Auth` when none exists.
    /// Absence is a fatal precondition failure, never retried here.
    async fn current_session(&self) -> ChatResult<Session>;
}

// ── In-memory provider ─────────────────────────────────────────────────────

/// Holds at most one session. Sign-in replaces it, sign-out clears it.
pub struct StaticSessionProvider {
    session: Mutex<Option<Session>>,
}

impl StaticSessionProvider {
    pub fn new(session: Session) -> Self {
        StaticSessionProvider { session: Mutex::new(Some(session)) }
    }

    /// A provider with no active session.
    pub fn signed_out() -> Self {
        StaticSessionProvider { session: Mutex::new(None) }
    }

    pub fn sign_in(&self, session: Session) {
        *self.session.lock() = Some(session);
    }

    pub fn sign_out(&self) {
        *self.session.lock() = None;
    }
}

#[async_trait]
impl SessionProvider for StaticSessionProvider {
    async fn current_session(&self) -> ChatResult<Session> {
        self.session
            .lock()
            .clone()
            .ok_or_else(|| ChatError::Auth("No active session".into()))
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
