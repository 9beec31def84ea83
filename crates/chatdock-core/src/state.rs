//! Send-flow state machine
//!
//! ```text
//! Idle
//!   ↓ send
//! Pending
//!   ↓ reply appended      ↓ responder error
//! Fulfilled               Failed
//! ```
//!
//! A settled state (Fulfilled or Failed) is never pending, so the send
//! button re-enables no matter how the request ended.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SendState {
    /// Nothing has been sent yet
    Idle,
    /// Waiting on the responder
    Pending,
    /// The last send produced an assistant reply
    Fulfilled,
    /// The last send settled with a fallback error message
    Failed,
}

impl SendState {
    /// Check if transition to another state is valid
    pub fn can_transition_to(&self, target: SendState) -> bool {
        match (self, target) {
            // A new send may start whenever nothing is in flight
            (SendState::Idle, SendState::Pending) => true,
            (SendState::Fulfilled, SendState::Pending) => true,
            (SendState::Failed, SendState::Pending) => true,
            // An in-flight send settles exactly once
            (SendState::Pending, SendState::Fulfilled) => true,
            (SendState::Pending, SendState::Failed) => true,
            // Settled states may reset
            (SendState::Fulfilled, SendState::Idle) => true,
            (SendState::Failed, SendState::Idle) => true,
            // Same state is always valid (no-op)
            (a, b) if *a == b => true,
            // All other transitions are invalid
            _ => false,
        }
    }

    /// Returns true while a reply is being awaited
    pub fn is_pending(&self) -> bool {
        matches!(self, SendState::Pending)
    }

    /// Returns true once a send has settled, in either direction
    pub fn is_settled(&self) -> bool {
        matches!(self, SendState::Fulfilled | SendState::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SendState::Idle => "idle",
            SendState::Pending => "pending",
            SendState::Fulfilled => "fulfilled",
            SendState::Failed => "failed",
        }
    }
}

impl std::fmt::Display for SendState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SendState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "idle" => Ok(SendState::Idle),
            "pending" => Ok(SendState::Pending),
            "fulfilled" => Ok(SendState::Fulfilled),
            "failed" => Ok(SendState::Failed),
            _ => Err(format!("Unknown send state: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        // Idle -> Pending
        assert!(SendState::Idle.can_transition_to(SendState::Pending));
        // Pending -> Fulfilled
        assert!(SendState::Pending.can_transition_to(SendState::Fulfilled));
        // Pending -> Failed
        assert!(SendState::Pending.can_transition_to(SendState::Failed));
        // Settled states accept the next send
        assert!(SendState::Fulfilled.can_transition_to(SendState::Pending));
        assert!(SendState::Failed.can_transition_to(SendState::Pending));
    }

    #[test]
    fn test_invalid_transitions() {
        // Can't settle without a send in flight
        assert!(!SendState::Idle.can_transition_to(SendState::Fulfilled));
        assert!(!SendState::Idle.can_transition_to(SendState::Failed));
        // A settled send can't flip its outcome
        assert!(!SendState::Fulfilled.can_transition_to(SendState::Failed));
        assert!(!SendState::Failed.can_transition_to(SendState::Fulfilled));
        // Pending can't skip back without settling
        assert!(!SendState::Pending.can_transition_to(SendState::Idle));
    }

    #[test]
    fn test_pending_flag() {
        assert!(SendState::Pending.is_pending());
        assert!(!SendState::Idle.is_pending());
        assert!(!SendState::Fulfilled.is_pending());
        assert!(!SendState::Failed.is_pending());

        assert!(SendState::Fulfilled.is_settled());
        assert!(!SendState::Pending.is_settled());
    }

    #[test]
    fn test_state_strings() {
        assert_eq!(SendState::Pending.as_str(), "pending");
        assert_eq!("fulfilled".parse::<SendState>().unwrap(), SendState::Fulfilled);
        assert!("done".parse::<SendState>().is_err());
    }
}
