// Hookchat Engine — Per-Agent Chat History
//
// The UI keeps a chat id and a message transcript per agent. The storage
// medium belongs to the host (browser local storage, a file, a DB table), so
// persistence is an injected key-value capability; the crate ships an
// in-memory implementation for tests and headless embedding.
//
// Blobs are opaque JSON. A corrupt transcript is tolerated: the reader logs
// a warning and starts the agent's history fresh.

use log::warn;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::atoms::error::ChatResult;
use crate::atoms::types::ResponseStatus;
use crate::engine::chat_id;
use crate::engine::config::AgentEndpoint;

// ── Storage seam ───────────────────────────────────────────────────────────

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

/// In-memory store backed by a `parking_lot` mutex.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.entries.lock().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.entries.lock().remove(key);
    }
}

// ── Stored messages ────────────────────────────────────────────────────────

/// Who produced a transcript entry. `Error` entries are rendered visually
/// flagged; `System` entries are local notices (chat refreshed, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
    Error,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMessage {
    pub sender: Sender,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ResponseStatus>,
    /// Wall-clock seconds the reply took, shown next to bot messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_secs: Option<f64>,
    pub timestamp: String,
}

impl StoredMessage {
    fn stamped(sender: Sender, text: impl Into<String>) -> Self {
        StoredMessage {
            sender,
            text: text.into(),
            status: None,
            response_time_secs: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::stamped(Sender::User, text)
    }

    pub fn bot(text: impl Into<String>, status: ResponseStatus, response_time_secs: f64) -> Self {
        StoredMessage {
            status: Some(status),
            response_time_secs: Some(response_time_secs),
            ..Self::stamped(Sender::Bot, text)
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        StoredMessage { status: Some(ResponseStatus::Error), ..Self::stamped(Sender::Error, text) }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::stamped(Sender::System, text)
    }
}

// ── History service ────────────────────────────────────────────────────────

pub struct ChatHistory {
    store: Arc<dyn KeyValueStore>,
}

impl ChatHistory {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        ChatHistory { store }
    }

    fn chat_id_key(agent_id: &str) -> String {
        format!("chat_id_{}", agent_id)
    }

    fn messages_key(agent_id: &str) -> String {
        format!("chat_messages_{}", agent_id)
    }

    /// The agent's current chat id, generating and persisting one on first
    /// use.
    pub fn chat_id(&self, agent: &AgentEndpoint) -> String {
        let key = Self::chat_id_key(&agent.id);
        if let Some(existing) = self.store.get(&key) {
            return existing;
        }
        let fresh = chat_id::generate(&agent.tag);
        self.store.set(&key, fresh.clone());
        fresh
    }

    /// Start a new conversation: discard the stored id and return a fresh
    /// one. The transcript is left alone; `clear` drops both.
    pub fn reset_chat_id(&self, agent: &AgentEndpoint) -> String {
        self.store.remove(&Self::chat_id_key(&agent.id));
        self.chat_id(agent)
    }

    /// The agent's transcript. Corrupt blobs yield an empty transcript.
    pub fn messages(&self, agent_id: &str) -> Vec<StoredMessage> {
        let Some(blob) = self.store.get(&Self::messages_key(agent_id)) else {
            return vec![];
        };
        match serde_json::from_str(&blob) {
            Ok(messages) => messages,
            Err(e) => {
                warn!("[history] Corrupt transcript for '{}', starting fresh: {}", agent_id, e);
                vec![]
            }
        }
    }

    pub fn push_message(&self, agent_id: &str, message: StoredMessage) -> ChatResult<()> {
        let mut messages = self.messages(agent_id);
        messages.push(message);
        self.save_messages(agent_id, &messages)
    }

    pub fn save_messages(&self, agent_id: &str, messages: &[StoredMessage]) -> ChatResult<()> {
        let blob = serde_json::to_string(messages)?;
        self.store.set(&Self::messages_key(agent_id), blob);
        Ok(())
    }

    /// Drop both the transcript and the chat id for an agent.
    pub fn clear(&self, agent_id: &str) {
        self.store.remove(&Self::messages_key(agent_id));
        self.store.remove(&Self::chat_id_key(agent_id));
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
