//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Session error: {0}")]
    Session(#[from] chatdock_sessions::SessionError),

    #[error("Responder error: {0}")]
    Responder(#[from] chatdock_responder::ResponderError),

    #[error("Message text cannot be empty")]
    EmptyMessage,
}
