//! Common error types for devcask.

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias using [`DevcaskError`].
pub type DevcaskResult<T> = Result<T, DevcaskError>;

/// Errors shared across the devcask crates.
#[derive(Error, Diagnostic, Debug)]
pub enum DevcaskError {
    /// Invalid or insufficient input combination.
    #[error("Configuration error: {message}")]
    #[diagnostic(code(devcask::config))]
    Config {
        /// The error message.
        message: String,
    },

    /// No user account matched an id or login name.
    #[error("User not found in the account database: {query}")]
    #[diagnostic(
        code(devcask::identity::user_not_found),
        help("Check the id or login name against the host's account database (getent passwd)")
    )]
    UserNotFound {
        /// The id or login name that was looked up.
        query: String,
    },

    /// No group matched an id or name.
    #[error("Group not found in the group database: {query}")]
    #[diagnostic(
        code(devcask::identity::group_not_found),
        help("Check the id or name against the host's group database (getent group)")
    )]
    GroupNotFound {
        /// The id or name that was looked up.
        query: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    #[diagnostic(code(devcask::io))]
    Io(#[from] std::io::Error),
}
