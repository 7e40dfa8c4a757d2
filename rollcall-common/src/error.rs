//! Common error types for Rollcall

use thiserror::Error;

/// Common result type for Rollcall operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types shared by the Rollcall crates
///
/// The first four variants are the request-level taxonomy the HTTP
/// layer maps onto status codes; the rest wrap infrastructure
/// failures.
#[derive(Error, Debug)]
pub enum Error {
    /// Request carried no identity value at all
    #[error("Identity number not provided")]
    MissingInput,

    /// Identity failed structural or check-digit validation
    #[error("Invalid identity number: bad format or check digit")]
    InvalidIdentity,

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Enrollee seeding error
    #[error("Import error: {0}")]
    Import(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}
