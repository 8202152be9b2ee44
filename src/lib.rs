//! Groops - group messaging core
//!
//! This library provides the data layer behind the Groops app: groups,
//! threaded messages and whole-document persistence to a local key-value
//! store. Screens, navigation and authentication live outside the crate and
//! talk to the [`groups::GroupStore`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod groups;
pub mod identity;
pub mod storage;

/// Result type alias for Groops operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Groops operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Operation requires a signed-in user
    #[error("User must be logged in")]
    NoCurrentUser,

    /// Storage operation error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// General I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// SQLite database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Initialize the Groops library with logging
///
/// Safe to call more than once; only the first call installs the subscriber.
pub fn init() {
    let _ = tracing_subscriber::fmt().try_init();
}

#[cfg(test)]
mod tests;
