// Hookchat Engine — Webhook Dispatch Client
//
// One outbound POST per call: session lookup, envelope build, bounded HTTP
// exchange, then normalization. No retries, no caching, no queuing; manual
// resubmission is the only retry path. Concurrent calls share nothing but
// the HTTP connection pool; the deadline timer is local to each call and
// dropped on every exit path.

use log::{info, warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::atoms::constants::CONNECT_TIMEOUT_SECS;
use crate::atoms::error::{ChatError, ChatResult};
use crate::atoms::types::{ChatEnvelope, ChatReply, EnvelopeUser};
use crate::engine::classify::classify;
use crate::engine::config::ApiConfig;
use crate::engine::response::normalize;
use crate::engine::session::SessionProvider;

pub struct WebhookClient {
    client: Client,
    sessions: Arc<dyn SessionProvider>,
    config: ApiConfig,
}

impl WebhookClient {
    pub fn new(config: ApiConfig, sessions: Arc<dyn SessionProvider>) -> Self {
        WebhookClient {
            client: Client::builder()
                .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            sessions,
            config,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Send to a cataloged agent by id. The catalog lookup happens before
    /// the session lookup, so a bad id never triggers auth or network work.
    pub async fn send_to_agent(&self, agent_id: &str, message: &str, chat_id: &str) -> ChatResult<ChatReply> {
        let agent = self
            .config
            .agent(agent_id)
            .ok_or_else(|| ChatError::Config(format!("Unknown agent '{}'", agent_id)))?;
        let url = self.config.agent_url(agent);
        self.send_agent_message(message, chat_id, &url).await
    }

    /// Core dispatch: one POST to `url`, bounded by the configured deadline.
    ///
    /// Failures arrive exclusively on the `Err` path, including 200
    /// responses whose normalized status is not success. The `Ok` path only
    /// ever carries a success reply.
    pub async fn send_agent_message(&self, message: &str, chat_id: &str, url: &str) -> ChatResult<ChatReply> {
        let deadline = self.config.timeout();

        let attempt = async {
            let session = self.sessions.current_session().await?;
            let envelope = ChatEnvelope::new(
                message,
                chat_id,
                EnvelopeUser {
                    email: session.user.email.clone(),
                    id: session.user.id.clone(),
                    user_metadata: session.user.metadata.clone(),
                },
            );
            info!("[dispatch] POST {} chat_id={} msg_len={}", url, chat_id, message.len());
            self.exchange(url, &session.access_token, &envelope).await
        };

        let reply = match tokio::time::timeout(deadline, attempt).await {
            Ok(result) => result?,
            Err(_) => {
                warn!("[dispatch] Deadline of {}ms expired for {}", self.config.timeout_ms, url);
                return Err(ChatError::timed_out());
            }
        };

        if !reply.is_success() {
            return Err(ChatError::remote(reply));
        }
        Ok(reply)
    }

    /// Like `send_agent_message`, but with every failure already classified
    /// into a renderable reply. UI layers render the `Err` value as a
    /// visually flagged chat message.
    pub async fn dispatch(&self, message: &str, chat_id: &str, url: &str) -> Result<ChatReply, Box<ChatReply>> {
        self.send_agent_message(message, chat_id, url)
            .await
            .map_err(|e| Box::new(classify(&e)))
    }

    /// The HTTP exchange itself: POST, content-type gate, body parse, and
    /// status routing. Runs entirely inside the caller's deadline.
    async fn exchange(&self, url: &str, token: &str, envelope: &ChatEnvelope) -> ChatResult<ChatReply> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .bearer_auth(token)
            .json(envelope)
            .send()
            .await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        // The content-type gate comes first: a non-JSON body is an invalid
        // format regardless of the HTTP status that carried it.
        if !content_type.as_deref().is_some_and(|ct| ct.contains("application/json")) {
            warn!("[dispatch] Non-JSON reply from {} ({})", url, content_type.as_deref().unwrap_or("none"));
            return Err(ChatError::InvalidFormat { content_type });
        }

        let text = response.text().await?;
        if text.is_empty() {
            return Err(ChatError::Parse { details: "Empty response".into() });
        }
        let body: Value = serde_json::from_str(&text)
            .map_err(|e| ChatError::Parse { details: e.to_string() })?;

        if !status.is_success() {
            info!("[dispatch] HTTP {} from {}, routing body as error payload", status.as_u16(), url);
            return Err(ChatError::RemoteBody { status: status.as_u16(), body });
        }

        normalize(&body)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
// End-to-end behavior against live mock endpoints lives in tests/integration.rs.
