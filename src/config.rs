//! Shell configuration
//!
//! Loaded from TOML; every field has a default so a partial (or empty) file
//! is valid:
//!
//! ```toml
//! [log]
//! filter = "slotfs=debug"
//! ansi = false
//!
//! [shell]
//! flush_each_response = true
//! ```

use crate::error::ShellResult;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub log: LogConfig,
    pub shell: ShellOptions,
}

/// Logging settings (consumed by the binary's subscriber setup)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive; `RUST_LOG` takes precedence
    pub filter: String,

    /// Colourise log output
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            filter: "slotfs=warn".to_string(),
            ansi: false,
        }
    }
}

/// Command loop behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellOptions {
    /// Flush the output stream after every response
    ///
    /// Needed when another process drives the shell over a pipe and waits
    /// for each answer.
    pub flush_each_response: bool,
}

impl Default for ShellOptions {
    fn default() -> Self {
        ShellOptions {
            flush_each_response: true,
        }
    }
}

impl ShellConfig {
    /// Parse configuration from TOML text
    ///
    /// # Examples
    ///
    /// ```
    /// use slotfs::ShellConfig;
    ///
    /// let config = ShellConfig::from_toml_str("[shell]\nflush_each_response = false\n").unwrap();
    /// assert!(!config.shell.flush_each_response);
    /// assert_eq!(config.log.filter, "slotfs=warn");
    /// ```
    pub fn from_toml_str(text: &str) -> ShellResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> ShellResult<Self> {
        let path = path.as_ref();
        debug!("Loading config from {:?}", path);
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShellError;

    #[test]
    fn test_defaults() {
        let config = ShellConfig::default();
        assert_eq!(config.log.filter, "slotfs=warn");
        assert!(!config.log.ansi);
        assert!(config.shell.flush_each_response);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        assert_eq!(ShellConfig::from_toml_str("").unwrap(), ShellConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = ShellConfig::from_toml_str("[log]\nfilter = \"slotfs=trace\"\n").unwrap();
        assert_eq!(config.log.filter, "slotfs=trace");
        assert!(!config.log.ansi);
        assert!(config.shell.flush_each_response);
    }

    #[test]
    fn test_bad_type_is_config_error() {
        let err = ShellConfig::from_toml_str("[shell]\nflush_each_response = \"yes\"\n").unwrap_err();
        assert!(matches!(err, ShellError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ShellConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ShellError::Io(_)));
    }
}
