use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NamespaceError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Directory not empty: {0}")]
    NotEmpty(String),

    #[error("Directory table full: no free slot for {0}")]
    CapacityExhausted(String),

    #[error("Invalid path: {0:?} does not name a resource")]
    InvalidPath(String),

    #[error("No entry named {0:?}")]
    NoMatch(String),
}

impl NamespaceError {
    /// Short machine-friendly label, used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            NamespaceError::NotFound(_) => "not-found",
            NamespaceError::AlreadyExists(_) => "already-exists",
            NamespaceError::NotEmpty(_) => "not-empty",
            NamespaceError::CapacityExhausted(_) => "capacity-exhausted",
            NamespaceError::InvalidPath(_) => "invalid-path",
            NamespaceError::NoMatch(_) => "no-match",
        }
    }
}

pub type Result<T> = std::result::Result<T, NamespaceError>;
