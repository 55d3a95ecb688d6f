//! Error types for the command shell

use thiserror::Error;

/// Shell result type
pub type ShellResult<T> = Result<T, ShellError>;

/// Shell and front-end errors
#[derive(Error, Debug)]
pub enum ShellError {
    /// Namespace operation failed
    #[error("Namespace error: {0}")]
    Namespace(#[from] crate::core::error::NamespaceError),

    /// Known command with a missing or badly formed argument
    #[error("Malformed command: {0}")]
    Malformed(String),

    /// Unrecognised command keyword
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Configuration file could not be decoded
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
