//! Main widget state container
//!
//! Central state container for the floating chat dock. The host view is a
//! stateless renderer: it draws whatever this type reports and forwards
//! every interaction (toggle, tab clicks, send) back into it.

use std::sync::Arc;

use parking_lot::RwLock;

use chatdock_responder::{MockResponder, RemoteResponder, Responder, ResponderError};
use chatdock_sessions::{Message, Role, Session, SessionError, SessionStore};

use crate::config::Config;
use crate::state::SendState;
use crate::Result;

pub struct ChatDock {
    /// Configuration
    config: Config,
    /// Session store (tabs, transcripts, active session)
    store: SessionStore,
    /// Reply source (mock or remote HTTP)
    responder: Arc<dyn Responder>,
    /// Whether the floating panel is open
    visible: Arc<RwLock<bool>>,
    /// State of the current or most recent send
    send_state: Arc<RwLock<SendState>>,
}

impl ChatDock {
    /// Build a dock from configuration.
    ///
    /// A configured `api_base` selects the remote responder; otherwise the
    /// built-in mock responder is used.
    pub fn new(config: Config) -> Result<Self> {
        let responder: Arc<dyn Responder> = match &config.api_base {
            Some(api_base) => Arc::new(RemoteResponder::with_timeout(
                api_base,
                config.user_id.clone(),
                config.request_timeout(),
            )?),
            None => Arc::new(MockResponder::with_latency(config.mock_latency())),
        };

        Ok(Self::with_responder(config, responder))
    }

    /// Build a dock around an injected responder
    pub fn with_responder(config: Config, responder: Arc<dyn Responder>) -> Self {
        Self {
            config,
            store: SessionStore::new(),
            responder,
            visible: Arc::new(RwLock::new(false)),
            send_state: Arc::new(RwLock::new(SendState::Idle)),
        }
    }

    /// Ensure at least one session exists and return the active one
    pub fn initialize(&self) -> Session {
        let session = self.store.initialize();

        tracing::info!(
            session_id = %session.id,
            title = %session.title,
            "Chat dock initialized"
        );

        session
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    // === Panel visibility ===

    pub fn is_visible(&self) -> bool {
        *self.visible.read()
    }

    pub fn open(&self) {
        *self.visible.write() = true;
    }

    pub fn close(&self) {
        *self.visible.write() = false;
    }

    /// Toggle the floating panel, returning the new visibility
    pub fn toggle(&self) -> bool {
        let mut visible = self.visible.write();
        *visible = !*visible;

        tracing::debug!(visible = *visible, "Toggled chat dock");

        *visible
    }

    // === Session operations ===

    pub fn new_session(&self) -> Session {
        self.store.create_session()
    }

    pub fn close_session(&self, session_id: &str) -> Option<Session> {
        self.store.remove_session(session_id)
    }

    pub fn switch_session(&self, session_id: &str) -> Result<Session> {
        Ok(self.store.switch_active(session_id)?)
    }

    /// Rename a session tab. Renames are local; nothing is sent upstream.
    pub fn rename_session(&self, session_id: &str, title: &str) -> Result<Session> {
        Ok(self.store.rename_session(session_id, title)?)
    }

    pub fn sessions(&self) -> Vec<Session> {
        self.store.sessions()
    }

    pub fn active_session(&self) -> Result<Session> {
        Ok(self.store.active_session()?)
    }

    // === Send flow ===

    pub fn send_state(&self) -> SendState {
        *self.send_state.read()
    }

    /// Returns true while a send is waiting on the responder
    pub fn is_pending(&self) -> bool {
        self.send_state.read().is_pending()
    }

    /// Send a message from the active session and append the reply.
    ///
    /// The user message lands in the transcript immediately and is returned.
    /// The assistant reply (or a fallback error message) is appended once the
    /// responder settles; the pending flag clears on every path out of here.
    /// A reply whose session was closed while in flight is dropped.
    pub async fn send(&self, text: &str) -> Result<Message> {
        let text = text.trim();
        if text.is_empty() {
            return Err(crate::CoreError::EmptyMessage);
        }

        let session = self.store.active_session()?;

        let message = self
            .store
            .append_message(&session.id, Role::User, text.to_string())?;
        self.set_send_state(SendState::Pending);

        tracing::info!(session_id = %session.id, chars = text.len(), "Sending message");

        let outcome = self.responder.reply(text, &session.id).await;

        let settled = match outcome {
            Ok(reply) => {
                self.set_send_state(SendState::Fulfilled);
                self.store
                    .append_message(&session.id, Role::Assistant, reply)
            }
            Err(err) => {
                tracing::warn!(session_id = %session.id, error = %err, "Responder failed");
                self.set_send_state(SendState::Failed);
                self.store
                    .append_message(&session.id, Role::Assistant, fallback_text(&err))
            }
        };

        match settled {
            Ok(_) => {}
            Err(SessionError::NotFound(id)) => {
                // The session was closed while the reply was in flight
                tracing::debug!(session_id = %id, "Dropped reply for closed session");
            }
            Err(e) => return Err(e.into()),
        }

        Ok(message)
    }

    fn set_send_state(&self, next: SendState) {
        let mut state = self.send_state.write();
        if state.can_transition_to(next) {
            *state = next;
        } else {
            tracing::warn!(from = %*state, to = %next, "Ignored invalid send state transition");
        }
    }
}

impl Clone for ChatDock {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            store: self.store.clone(),
            responder: Arc::clone(&self.responder),
            visible: Arc::clone(&self.visible),
            send_state: Arc::clone(&self.send_state),
        }
    }
}

/// User-visible transcript text for a failed send
fn fallback_text(err: &ResponderError) -> String {
    match err {
        ResponderError::MissingIdentity => {
            "Error: User not authenticated. Please log in.".to_string()
        }
        other => format!("Sorry, there was an error connecting to the AI: {}", other),
    }
}
