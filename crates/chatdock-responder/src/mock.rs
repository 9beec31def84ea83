//! Mock responder
//!
//! Deterministic keyword replies with simulated latency, for development
//! and offline use. No network, no identity requirement.

use std::time::Duration;

use async_trait::async_trait;

use crate::responder::Responder;
use crate::Result;

/// Keyword rules checked in order; first match wins
const KEYWORD_REPLIES: &[(&[&str], &str)] = &[
    (
        &["hello", "hi"],
        "Hello! How can I help you manage your tasks today?",
    ),
    (&["add"], "I have added that task for you! (Mock)"),
    (&["list", "show"], "Here are your pending tasks... (Mock)"),
];

/// Reply when no keyword matches
const DEFAULT_REPLY: &str = "I received your message. Since I am a mock AI, I can't do much yet!";

/// Simulates the round trip to a real backend
const DEFAULT_LATENCY: Duration = Duration::from_millis(1500);

pub struct MockResponder {
    latency: Duration,
}

impl MockResponder {
    pub fn new() -> Self {
        Self {
            latency: DEFAULT_LATENCY,
        }
    }

    /// Override the simulated latency (zero keeps tests fast)
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    /// Pick a reply by case-insensitive substring match
    fn route(message: &str) -> &'static str {
        let lowered = message.to_lowercase();

        for (keywords, reply) in KEYWORD_REPLIES {
            if keywords.iter().any(|keyword| lowered.contains(keyword)) {
                return reply;
            }
        }

        DEFAULT_REPLY
    }
}

#[async_trait]
impl Responder for MockResponder {
    async fn reply(&self, message: &str, conversation_id: &str) -> Result<String> {
        tokio::time::sleep(self.latency).await;

        let reply = Self::route(message);
        tracing::debug!(conversation_id = %conversation_id, "Selected mock reply");

        Ok(reply.to_string())
    }
}

impl Default for MockResponder {
    fn default() -> Self {
        Self::new()
    }
}
