// Hookchat — chat dispatch core for webhook automation agents.
//
// The service layer between a chat UI and remote automation workflows:
// builds authenticated request envelopes, dispatches them with a per-call
// deadline, normalizes the engine's inconsistent reply shapes into one
// canonical record, and classifies every failure into the same record so
// callers render success and failure identically.
//
// Out of scope by design: UI rendering, routing, the auth backend (injected
// via `SessionProvider`), persistent storage (injected via `KeyValueStore`),
// and the remote workflows themselves.

pub mod atoms;
pub mod engine;

pub use atoms::constants;
pub use atoms::error::{ChatError, ChatResult};
pub use atoms::types::{ChatEnvelope, ChatReply, EnvelopeUser, ResponseStatus, Suggestions};
pub use engine::chat_id;
pub use engine::classify::{classify, classify_value};
pub use engine::config::{AgentEndpoint, ApiConfig};
pub use engine::dispatch::WebhookClient;
pub use engine::history::{ChatHistory, KeyValueStore, MemoryStore, Sender, StoredMessage};
pub use engine::response::normalize;
pub use engine::session::{Session, SessionProvider, StaticSessionProvider, UserProfile};
