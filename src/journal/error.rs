use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T, E = JournalError> = std::result::Result<T, E>;

/// Why a journal operation was refused.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JournalError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Forbidden(String),
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Failures reported by a `Store`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("user {0:?} already exists")]
    AlreadyExists(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Error payload, `{"ok": false, "message": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub ok: bool,
    pub message: String,
}

impl JournalError {
    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// HTTP status a transport should answer with.
    pub fn status(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::Forbidden(_) => 403,
            Self::Storage(_) => 500,
        }
    }

    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            ok: false,
            message: self.to_string(),
        }
    }
}
