//! Session Store
//!
//! In-memory container for every open chat session. Sessions are kept in an
//! id-keyed map with an explicit display-order vector, so lookups stay
//! constant cost and tab order survives map rehashing.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::SessionError;
use crate::message::{Message, Role};
use crate::session::Session;
use crate::Result;

pub struct SessionStore {
    /// In-memory session map
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    /// Session IDs in display order
    order: Arc<RwLock<Vec<String>>>,
    /// Currently active session ID
    active_session_id: Arc<RwLock<Option<String>>>,
    /// Next number for default "Chat N" titles
    next_title_number: Arc<RwLock<u64>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            order: Arc::new(RwLock::new(Vec::new())),
            active_session_id: Arc::new(RwLock::new(None)),
            next_title_number: Arc::new(RwLock::new(1)),
        }
    }

    /// Returns the active session, creating the first one if the store is empty
    pub fn initialize(&self) -> Session {
        match self.active_session() {
            Ok(session) => session,
            Err(_) => self.create_session(),
        }
    }

    /// Create a new session with a default numbered title and make it active
    pub fn create_session(&self) -> Session {
        let title = {
            let mut number = self.next_title_number.write();
            let title = format!("Chat {}", *number);
            *number += 1;
            title
        };

        let mut session = Session::new(title);
        session.is_active = true;

        // Deactivate the previous active session
        if let Ok(mut current) = self.active_session() {
            current.is_active = false;
            self.sessions.write().insert(current.id.clone(), current);
        }

        self.sessions
            .write()
            .insert(session.id.clone(), session.clone());
        self.order.write().push(session.id.clone());
        *self.active_session_id.write() = Some(session.id.clone());

        tracing::info!(
            session_id = %session.id,
            title = %session.title,
            "Created new session"
        );

        session
    }

    /// Remove a session. Safe no-op if the ID is unknown.
    ///
    /// Removing the active session activates the session that now occupies
    /// the closed tab's index, falling back to the new last index. Removing
    /// the only session leaves the store empty with no active session.
    pub fn remove_session(&self, session_id: &str) -> Option<Session> {
        let index = {
            let order = self.order.read();
            order.iter().position(|id| id == session_id)?
        };

        let removed = self.sessions.write().remove(session_id)?;
        self.order.write().retain(|id| id != session_id);

        let was_active = self.active_session_id.read().as_deref() == Some(session_id);
        if was_active {
            let replacement = {
                let order = self.order.read();
                order
                    .get(index.min(order.len().saturating_sub(1)))
                    .cloned()
            };

            match replacement {
                Some(next_id) => {
                    if let Some(next) = self.sessions.write().get_mut(&next_id) {
                        next.is_active = true;
                    }
                    tracing::info!(
                        session_id = %session_id,
                        next_session_id = %next_id,
                        "Closed active session, switched to neighbor"
                    );
                    *self.active_session_id.write() = Some(next_id);
                }
                None => {
                    tracing::info!(session_id = %session_id, "Closed last session");
                    *self.active_session_id.write() = None;
                }
            }
        } else {
            tracing::info!(session_id = %session_id, "Closed session");
        }

        Some(removed)
    }

    /// Switch to a different session
    pub fn switch_active(&self, session_id: &str) -> Result<Session> {
        if !self.sessions.read().contains_key(session_id) {
            return Err(SessionError::NotFound(session_id.to_string()));
        }

        // Deactivate current session
        if let Ok(mut current) = self.active_session() {
            if current.id != session_id {
                current.is_active = false;
                self.sessions.write().insert(current.id.clone(), current);
            }
        }

        // Activate new session
        let session = {
            let mut sessions = self.sessions.write();
            let session = sessions
                .get_mut(session_id)
                .ok_or_else(|| SessionError::NotFound(session_id.to_string()))?;
            session.is_active = true;
            session.clone()
        };
        *self.active_session_id.write() = Some(session.id.clone());

        tracing::info!(
            session_id = %session.id,
            title = %session.title,
            "Switched to session"
        );

        Ok(session)
    }

    /// Append a message to a session's transcript.
    ///
    /// Returns NotFound if the session was closed in the meantime, so a
    /// response that outlives its session can be dropped instead of crashing.
    pub fn append_message(&self, session_id: &str, role: Role, content: String) -> Result<Message> {
        let mut sessions = self.sessions.write();
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))?;

        let message = session.append(role, content);

        tracing::debug!(
            session_id = %session_id,
            role = %message.role,
            chars = message.content.len(),
            "Appended message"
        );

        Ok(message)
    }

    /// Rename a session. The title is trimmed; empty titles are rejected.
    pub fn rename_session(&self, session_id: &str, title: &str) -> Result<Session> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(SessionError::EmptyTitle);
        }

        let session = {
            let mut sessions = self.sessions.write();
            let session = sessions
                .get_mut(session_id)
                .ok_or_else(|| SessionError::NotFound(session_id.to_string()))?;
            session.rename(trimmed.to_string());
            session.clone()
        };

        tracing::info!(
            session_id = %session.id,
            title = %session.title,
            "Renamed session"
        );

        Ok(session)
    }

    /// Get the currently active session
    pub fn active_session(&self) -> Result<Session> {
        let active_id = self
            .active_session_id
            .read()
            .clone()
            .ok_or(SessionError::NoActiveSession)?;

        self.sessions
            .read()
            .get(&active_id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(active_id))
    }

    pub fn active_session_id(&self) -> Option<String> {
        self.active_session_id.read().clone()
    }

    pub fn get_session(&self, session_id: &str) -> Result<Session> {
        self.sessions
            .read()
            .get(session_id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))
    }

    /// Get all sessions in display order
    pub fn sessions(&self) -> Vec<Session> {
        let sessions = self.sessions.read();
        self.order
            .read()
            .iter()
            .filter_map(|id| sessions.get(id).cloned())
            .collect()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SessionStore {
    fn clone(&self) -> Self {
        Self {
            sessions: Arc::clone(&self.sessions),
            order: Arc::clone(&self.order),
            active_session_id: Arc::clone(&self.active_session_id),
            next_title_number: Arc::clone(&self.next_title_number),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active_count(store: &SessionStore) -> usize {
        store.sessions().iter().filter(|s| s.is_active).count()
    }

    #[test]
    fn test_create_sessions() {
        let store = SessionStore::new();

        let first = store.create_session();
        let second = store.create_session();
        let third = store.create_session();

        assert_eq!(first.title, "Chat 1");
        assert_eq!(third.title, "Chat 3");
        assert_ne!(first.id, second.id);
        assert_ne!(second.id, third.id);

        // Most recently created session is the active one
        assert_eq!(store.active_session_id(), Some(third.id.clone()));
        assert_eq!(active_count(&store), 1);
        assert_eq!(store.session_count(), 3);
    }

    #[test]
    fn test_switch_active() {
        let store = SessionStore::new();

        let first = store.create_session();
        let second = store.create_session();

        let switched = store.switch_active(&first.id).unwrap();
        assert!(switched.is_active);
        assert_eq!(store.active_session_id(), Some(first.id.clone()));
        assert_eq!(active_count(&store), 1);

        // Verify the previously active session was deactivated
        let sessions = store.sessions();
        let prev = sessions.iter().find(|s| s.id == second.id).unwrap();
        assert!(!prev.is_active);

        // Unknown ID leaves the store untouched
        assert!(store.switch_active("no-such-id").is_err());
        assert_eq!(store.active_session_id(), Some(first.id.clone()));

        // Switching to the already-active session is harmless
        store.switch_active(&first.id).unwrap();
        assert_eq!(active_count(&store), 1);
    }

    #[test]
    fn test_remove_active_selects_neighbor() {
        let store = SessionStore::new();

        let a = store.create_session();
        let b = store.create_session();
        let c = store.create_session();

        // Close the middle session while it is active; the session that
        // slides into its index takes over
        store.switch_active(&b.id).unwrap();
        store.remove_session(&b.id);
        assert_eq!(store.active_session_id(), Some(c.id.clone()));
        assert_eq!(active_count(&store), 1);

        // Closing the active tail falls back to the new last index
        store.remove_session(&c.id);
        assert_eq!(store.active_session_id(), Some(a.id.clone()));
        assert_eq!(active_count(&store), 1);
    }

    #[test]
    fn test_remove_inactive_keeps_active() {
        let store = SessionStore::new();

        let a = store.create_session();
        let b = store.create_session();

        store.switch_active(&b.id).unwrap();
        store.remove_session(&a.id);

        assert_eq!(store.active_session_id(), Some(b.id.clone()));
        assert_eq!(store.session_count(), 1);
    }

    #[test]
    fn test_remove_last_session() {
        let store = SessionStore::new();

        let only = store.create_session();
        store.remove_session(&only.id);

        assert!(store.is_empty());
        assert_eq!(store.active_session_id(), None);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let store = SessionStore::new();
        let session = store.create_session();

        assert!(store.remove_session("no-such-id").is_none());
        assert_eq!(store.session_count(), 1);
        assert_eq!(store.active_session_id(), Some(session.id));
    }

    #[test]
    fn test_append_message() {
        let store = SessionStore::new();
        let session = store.create_session();

        store
            .append_message(&session.id, Role::User, "hello".to_string())
            .unwrap();
        store
            .append_message(&session.id, Role::Assistant, "hi there".to_string())
            .unwrap();

        let stored = store.get_session(&session.id).unwrap();
        assert_eq!(stored.message_count(), 2);
        assert_eq!(stored.messages[0].content, "hello");
        assert_eq!(stored.messages[1].role, Role::Assistant);
    }

    #[test]
    fn test_append_after_close_is_not_found() {
        let store = SessionStore::new();
        let session = store.create_session();
        store.remove_session(&session.id);

        let err = store
            .append_message(&session.id, Role::Assistant, "late reply".to_string())
            .unwrap_err();
        assert!(matches!(err, SessionError::NotFound(_)));
    }

    #[test]
    fn test_rename_session() {
        let store = SessionStore::new();
        let session = store.create_session();

        let renamed = store.rename_session(&session.id, "  Groceries  ").unwrap();
        assert_eq!(renamed.title, "Groceries");

        // Whitespace-only titles are rejected without mutation
        let err = store.rename_session(&session.id, "   ").unwrap_err();
        assert!(matches!(err, SessionError::EmptyTitle));
        assert_eq!(
            store.get_session(&session.id).unwrap().title,
            "Groceries"
        );
    }

    #[test]
    fn test_initialize() {
        let store = SessionStore::new();

        // Empty store bootstraps its first session
        let session = store.initialize();
        assert!(session.is_active);
        assert_eq!(store.session_count(), 1);

        // A second call returns the existing active session
        let again = store.initialize();
        assert_eq!(again.id, session.id);
        assert_eq!(store.session_count(), 1);
    }

    #[test]
    fn test_display_order() {
        let store = SessionStore::new();

        let a = store.create_session();
        let b = store.create_session();
        let c = store.create_session();

        let ids: Vec<String> = store.sessions().iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids, vec![a.id.clone(), b.id.clone(), c.id.clone()]);

        store.remove_session(&b.id);
        let ids: Vec<String> = store.sessions().iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids, vec![a.id, c.id]);
    }
}
