use std::fmt;
use thiserror::Error;

/// Classification carried by every [`Failure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    MalformedPayload,
    SimulatedFailure,
}

impl FailureKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MalformedPayload => "MalformedPayload",
            Self::SimulatedFailure => "SimulatedFailure",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The whole-batch failure signal returned to the invoking host.
///
/// Both variants are terminal: the host reports the invocation as failed and
/// the queueing system leaves every message in the batch unacknowledged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
    #[error("{0}")]
    SimulatedFailure(String),
}

impl Failure {
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::MalformedPayload(_) => FailureKind::MalformedPayload,
            Self::SimulatedFailure(_) => FailureKind::SimulatedFailure,
        }
    }

    #[must_use]
    pub fn cause(&self) -> &str {
        match self {
            Self::MalformedPayload(cause) | Self::SimulatedFailure(cause) => cause,
        }
    }
}

/// Reasons an invocation payload cannot be decoded into message records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("payload is not a JSON object")]
    NotAnObject,
    #[error("payload has no record list")]
    MissingRecords,
    #[error("record list is not an array")]
    RecordsNotAnArray,
    #[error("record {index} is not a JSON object")]
    RecordNotAnObject { index: usize },
    #[error("record {index} is missing `{field}`")]
    MissingField { index: usize, field: &'static str },
    #[error("record {index} has an invalid `{field}`")]
    InvalidField { index: usize, field: &'static str },
    #[error("record {index} repeats message id {message_id}")]
    DuplicateMessageId { index: usize, message_id: String },
}

impl From<DecodeError> for Failure {
    fn from(err: DecodeError) -> Self {
        Self::MalformedPayload(err.to_string())
    }
}

/// Diagnostic raised when an attempt entry could not be written.
///
/// Never terminal: the logger records it and moves on to the next record.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Observability sink unavailable: {0}")]
    Unavailable(#[from] std::io::Error),
}
