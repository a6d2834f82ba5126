//! Error types for the Swan extension adapter.

use thiserror::Error;

/// Result type for extension operations.
pub type SwanResult<T> = Result<T, SwanError>;

/// Errors that can occur while the extension talks to its host.
///
/// A user dismissing a prompt is never an error; those paths resolve to
/// `Ok(None)` or a no-op.
#[derive(Debug, Error)]
pub enum SwanError {
    /// No command is registered under this id.
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// A command with this id is already registered.
    #[error("Command '{0}' is already registered")]
    DuplicateCommand(String),

    /// `start` was called on an active extension.
    #[error("Extension is already active")]
    AlreadyActive,

    /// `stop` was called on an inactive extension.
    #[error("Extension is not active")]
    NotActive,

    /// Terminal could not be created or could not run the text it was sent.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// External URI could not be opened.
    #[error("Failed to open external link: {0}")]
    OpenExternal(String),

    /// Persistent state could not be read or written.
    #[error("State error: {0}")]
    State(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
