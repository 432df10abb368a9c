// Hookchat Engine — Endpoint Configuration
//
// Resolves the automation platform base URL and the per-agent webhook
// catalog. Deployments load this from JSON; every field is defaulted so an
// empty `{}` document yields a working config pointed at nothing.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::atoms::constants::DEFAULT_TIMEOUT_MS;

// ── Agent catalog ──────────────────────────────────────────────────────────

/// One named chat agent backed by a webhook on the automation platform.
/// Version variants of the same assistant are distinct entries with their
/// own tag (HRV1 vs HRV2), so callers select a version by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentEndpoint {
    /// Stable identifier callers dispatch by.
    pub id: String,
    /// Chat-id prefix for this agent (`HRV1` in `HRV1_0412_sde4`).
    pub tag: String,
    /// Path appended to the base URL.
    pub webhook_path: String,
}

impl AgentEndpoint {
    /// The catalog the original deployment shipped with.
    pub fn builtins() -> Vec<AgentEndpoint> {
        vec![
            AgentEndpoint {
                id: "hr-donna".into(),
                tag: "HRV1".into(),
                webhook_path: "/webhook/hrdonna".into(),
            },
            AgentEndpoint {
                id: "hr-donna-v2".into(),
                tag: "HRV2".into(),
                webhook_path: "/webhook/hrdonnaAssistant".into(),
            },
            AgentEndpoint {
                id: "gajodhar".into(),
                tag: "GAJO".into(),
                webhook_path: "/webhook/MemerAgentfaster".into(),
            },
        ]
    }
}

// ── Config ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Automation platform base URL. Trailing slashes are normalized away
    /// when building webhook URLs.
    #[serde(default)]
    pub base_url: String,
    /// Hard wall-clock deadline per dispatch, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "AgentEndpoint::builtins")]
    pub agents: Vec<AgentEndpoint>,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: String::new(),
            timeout_ms: default_timeout_ms(),
            agents: AgentEndpoint::builtins(),
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiConfig { base_url: base_url.into(), ..ApiConfig::default() }
    }

    /// Look up an agent by id.
    pub fn agent(&self, id: &str) -> Option<&AgentEndpoint> {
        self.agents.iter().find(|a| a.id == id)
    }

    /// Full webhook URL for a path: base with trailing slashes stripped,
    /// path with a leading slash guaranteed.
    pub fn webhook_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    /// Full webhook URL for a cataloged agent.
    pub fn agent_url(&self, agent: &AgentEndpoint) -> String {
        self.webhook_url(&agent.webhook_path)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
