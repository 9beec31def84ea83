//! Session data structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::message::{Message, Role};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier
    pub id: String,
    /// Title shown on the session tab
    pub title: String,
    /// Transcript in append order
    pub messages: Vec<Message>,
    /// When the session was created
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
    /// Whether this is the currently active session
    pub is_active: bool,
}

impl Session {
    pub fn new(title: String) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            title,
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
            is_active: false,
        }
    }

    /// Append a message to the end of the transcript
    pub fn append(&mut self, role: Role, content: String) -> Message {
        let message = Message::new(role, content);
        self.messages.push(message.clone());
        self.updated_at = Utc::now();
        message
    }

    /// Rename the session
    pub fn rename(&mut self, title: String) {
        self.title = title;
        self.updated_at = Utc::now();
    }

    /// Get the number of messages
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// The most recently appended message
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let session = Session::new("Chat 1".to_string());
        assert_eq!(session.title, "Chat 1");
        assert!(!session.is_active);
        assert!(session.messages.is_empty());
    }

    #[test]
    fn test_append_order() {
        let mut session = Session::new("Test".to_string());

        session.append(Role::User, "first".to_string());
        session.append(Role::Assistant, "second".to_string());
        session.append(Role::User, "third".to_string());

        let contents: Vec<&str> = session
            .messages
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
        assert_eq!(session.message_count(), 3);
        assert_eq!(session.last_message().unwrap().role, Role::User);
    }

    #[test]
    fn test_rename_updates_timestamp() {
        let mut session = Session::new("Old".to_string());
        let before = session.updated_at;

        session.rename("New".to_string());
        assert_eq!(session.title, "New");
        assert!(session.updated_at >= before);
    }
}
