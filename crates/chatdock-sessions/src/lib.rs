//! ChatDock Session State
//!
//! - A Session is an in-memory container of chat messages plus a tab title
//! - Exactly zero or one session is active at any time
//! - Closing the active session activates its nearest remaining neighbor
//! - Sessions live only for the process lifetime (no persistence)

mod error;
mod message;
mod session;
mod store;

pub use error::SessionError;
pub use message::{Message, Role};
pub use session::Session;
pub use store::SessionStore;

pub type Result<T> = std::result::Result<T, SessionError>;
