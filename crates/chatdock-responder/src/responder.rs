//! Responder trait

use async_trait::async_trait;

use crate::Result;

/// Source of assistant replies.
///
/// Implementations must be safe to call from a cloned widget handle, so the
/// trait is object-safe and `Send + Sync`.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Produce a reply to a user message within a conversation.
    ///
    /// Errors are recoverable: the widget turns them into assistant-role
    /// fallback messages rather than propagating them to the host.
    async fn reply(&self, message: &str, conversation_id: &str) -> Result<String>;
}
