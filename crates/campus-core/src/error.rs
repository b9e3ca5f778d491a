// Rust guideline compliant 2026-08-05

//! Error types for the campus core library.

use thiserror::Error;

/// Result type alias for campus operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for campus operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid Student data.
    #[error("Invalid student: {0}")]
    InvalidStudent(String),

    /// Invalid Ticket data.
    #[error("Invalid ticket: {0}")]
    InvalidTicket(String),

    /// Invalid configuration value.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Student or Ticket not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Attempt to close a ticket that is already closed.
    #[error("Ticket already closed: {0}")]
    TicketClosed(String),
}
