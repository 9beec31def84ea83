//! Responder error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResponderError {
    #[error("No authenticated user")]
    MissingIdentity,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend error: HTTP {status}: {detail}")]
    Api { status: u16, detail: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}
