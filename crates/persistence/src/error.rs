use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::codec::DecodeError;

/// 錯誤分類。 / Broad error classes callers react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input: an empty save name or a malformed snapshot document.
    Validation,
    /// A named save that does not exist.
    NotFound,
    /// The durable store could not be read or written.
    Storage,
}

/// Errors raised by the persistence service.
/// 持久化服務可能回傳的錯誤。
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("a name is required to save a tier list")]
    MissingName,
    #[error("malformed document {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
    #[error("failed to encode document {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("saved tier list {0:?} not found")]
    NotFound(String),
    #[error("storage unavailable at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PersistenceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PersistenceError::MissingName
            | PersistenceError::Malformed { .. }
            | PersistenceError::Encode { .. } => ErrorKind::Validation,
            PersistenceError::NotFound(_) => ErrorKind::NotFound,
            PersistenceError::Storage { .. } => ErrorKind::Storage,
        }
    }

    pub(crate) fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PersistenceError::Storage {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        PersistenceError::Malformed {
            path: path.into(),
            source: DecodeError::Json(source),
        }
    }
}
