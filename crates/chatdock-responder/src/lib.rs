//! ChatDock Response Acquisition
//!
//! - A Responder turns one user message into one assistant reply
//! - The mock responder routes on keywords with simulated latency
//! - The remote responder POSTs to the backend's /api/chat endpoint
//! - Identity is checked before the network is touched

mod error;
mod mock;
mod remote;
mod responder;

pub use error::ResponderError;
pub use mock::MockResponder;
pub use remote::RemoteResponder;
pub use responder::Responder;

pub type Result<T> = std::result::Result<T, ResponderError>;
