//! ChatDock Core
//!
//! Central coordination layer for the floating chat dock.
//! Rust owns all widget state; the host view is a stateless renderer.

mod config;
mod dock;
mod error;
mod state;

pub use config::Config;
pub use dock::ChatDock;
pub use error::CoreError;
pub use state::SendState;

// Re-export core components
pub use chatdock_responder::{MockResponder, RemoteResponder, Responder, ResponderError};
pub use chatdock_sessions::{Message, Role, Session, SessionError, SessionStore};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
