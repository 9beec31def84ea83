//! Remote HTTP responder
//!
//! Sends each user message to the backend's /api/chat endpoint and returns
//! the reply text. The request carries the authenticated user and the
//! conversation the message belongs to.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ResponderError;
use crate::responder::Responder;
use crate::Result;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(12);

/// Request body for POST /api/chat
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    user_id: &'a str,
    conversation_id: &'a str,
}

/// Response body from POST /api/chat. The backend also echoes a
/// conversation id and a server timestamp; only the reply text is used.
#[derive(Debug, Deserialize)]
struct ChatReply {
    response: String,
}

#[derive(Debug)]
pub struct RemoteResponder {
    client: Client,
    api_base: Url,
    user_id: Option<String>,
}

impl RemoteResponder {
    /// Create a responder for the given backend base URL.
    ///
    /// `user_id` identifies the authenticated user, if any. Replies are
    /// refused before the network is touched when it is absent.
    pub fn new(api_base: &str, user_id: Option<String>) -> Result<Self> {
        Self::with_timeout(api_base, user_id, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        api_base: &str,
        user_id: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let parsed = Url::parse(api_base.trim())
            .map_err(|e| ResponderError::InvalidEndpoint(e.to_string()))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ResponderError::InvalidEndpoint(format!(
                "unsupported scheme: {}",
                parsed.scheme()
            )));
        }

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_base: parsed,
            user_id,
        })
    }

    fn chat_url(&self) -> String {
        format!(
            "{}/api/chat",
            self.api_base.as_str().trim_end_matches('/')
        )
    }
}

#[async_trait]
impl Responder for RemoteResponder {
    async fn reply(&self, message: &str, conversation_id: &str) -> Result<String> {
        let user_id = self
            .user_id
            .as_deref()
            .ok_or(ResponderError::MissingIdentity)?;

        let request = ChatRequest {
            message,
            user_id,
            conversation_id,
        };

        tracing::debug!(
            conversation_id = %conversation_id,
            url = %self.chat_url(),
            "Sending chat request"
        );

        let response = self
            .client
            .post(self.chat_url())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let detail = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ResponderError::Api { status, detail });
        }

        let reply: ChatReply = response
            .json()
            .await
            .map_err(|e| ResponderError::InvalidResponse(e.to_string()))?;

        if reply.response.is_empty() {
            return Err(ResponderError::InvalidResponse(
                "empty response field".to_string(),
            ));
        }

        tracing::debug!(
            conversation_id = %conversation_id,
            chars = reply.response.len(),
            "Received chat reply"
        );

        Ok(reply.response)
    }
}
