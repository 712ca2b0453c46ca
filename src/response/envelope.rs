//! Success and error envelopes
//!
//! Handlers return `{code, data?}` on success and `{code, status, err}` on
//! failure. Both are plain values: constructing an error envelope never
//! fails and never unwinds.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{Error, StoreError};

/// Successful response: `{code}` or `{code, data}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub code: u16,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl Envelope<()> {
    /// Envelope carrying only a code
    pub fn empty(code: u16) -> Self {
        Self { code, data: None }
    }
}

/// Descriptive error carried inside an [`ErrorEnvelope`]
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct EnvelopeError {
    pub message: String,
}

/// Failed response: `{code, status, err}`
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{status} ({code}): {err}")]
pub struct ErrorEnvelope {
    pub code: u16,
    pub status: String,
    #[source]
    pub err: EnvelopeError,
}

/// What a handler returns
pub type Reply<T> = std::result::Result<Envelope<T>, ErrorEnvelope>;

/// Build a success envelope; `data` is only present when supplied
pub fn as_response<T>(code: u16, data: Option<T>) -> Envelope<T> {
    Envelope { code, data }
}

/// Build an error envelope wrapping `message`
pub fn as_error(code: u16, status: impl Into<String>, message: impl Into<String>) -> ErrorEnvelope {
    ErrorEnvelope {
        code,
        status: status.into(),
        err: EnvelopeError {
            message: message.into(),
        },
    }
}

impl ErrorEnvelope {
    /// Describe a crate error as an envelope
    pub fn from_error(error: &Error) -> Self {
        let (code, status) = match error {
            Error::Store(StoreError::InvalidKey { .. } | StoreError::InvalidValue { .. }) => {
                (400, "invalid_argument")
            }
            Error::Store(StoreError::Read { .. }) => (500, "load_failed"),
            Error::Store(StoreError::Write { .. }) => (500, "save_failed"),
            Error::Config(_) => (500, "config_error"),
            Error::Json(_) => (500, "internal"),
        };
        as_error(code, status, error.to_string())
    }

    /// Message of the wrapped error
    pub fn message(&self) -> &str {
        &self.err.message
    }
}

impl From<Error> for ErrorEnvelope {
    fn from(error: Error) -> Self {
        Self::from_error(&error)
    }
}
