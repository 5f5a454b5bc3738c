//! Error types for the todo client.
//!
//! # Design
//! Non-success responses are classified rather than collapsed into one
//! untyped failure: 400/422 become `Validation`, 404 becomes `NotFound`,
//! anything else lands in `HttpError` with the raw status and body. Every
//! error reports an `ErrorKind` so the view-model can tell the user what
//! class of problem occurred without leaking the raw message.

use crate::types::TodoId;

/// Coarse error classification surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request was rejected as invalid, by the server or locally.
    Validation,
    /// The requested todo does not exist.
    NotFound,
    /// The server could not be reached.
    Transport,
    /// The server failed or answered with something unexpected.
    Server,
}

impl ErrorKind {
    pub fn describe(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "invalid request",
            ErrorKind::NotFound => "not found",
            ErrorKind::Transport => "server unreachable",
            ErrorKind::Server => "server error",
        }
    }
}

/// Errors returned by `TodoClient`, `Transport` and `TodoResource`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404, the requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server rejected the payload (400 or 422).
    #[error("request rejected with HTTP {status}: {body}")]
    Validation { status: u16, body: String },

    /// The server returned any other non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::NotFound => ErrorKind::NotFound,
            ApiError::Validation { .. } | ApiError::SerializationError(_) => ErrorKind::Validation,
            ApiError::Transport(_) => ErrorKind::Transport,
            ApiError::HttpError { .. } | ApiError::DeserializationError(_) => ErrorKind::Server,
        }
    }
}

/// A draft that cannot be submitted as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("unrecognised due date {0:?}")]
    InvalidDueDate(String),
}

/// Errors returned by `TodoApp` operations.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("invalid draft: {0}")]
    Draft(#[from] DraftError),

    #[error("todo {0} is already finished")]
    AlreadyFinished(TodoId),

    #[error("todo {0} is not in the list")]
    UnknownTodo(TodoId),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Api(err) => err.kind(),
            AppError::Draft(_) | AppError::AlreadyFinished(_) => ErrorKind::Validation,
            AppError::UnknownTodo(_) => ErrorKind::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_classify_by_kind() {
        assert_eq!(ApiError::NotFound.kind(), ErrorKind::NotFound);
        let rejected = ApiError::Validation {
            status: 422,
            body: String::new(),
        };
        assert_eq!(rejected.kind(), ErrorKind::Validation);
        assert_eq!(ApiError::Transport("refused".into()).kind(), ErrorKind::Transport);
        let fault = ApiError::HttpError {
            status: 500,
            body: String::new(),
        };
        assert_eq!(fault.kind(), ErrorKind::Server);
    }

    #[test]
    fn app_errors_delegate_to_api_kind() {
        assert_eq!(AppError::from(ApiError::NotFound).kind(), ErrorKind::NotFound);
        assert_eq!(
            AppError::from(DraftError::MissingField("title")).kind(),
            ErrorKind::Validation
        );
        assert_eq!(AppError::AlreadyFinished(TodoId(1)).kind(), ErrorKind::Validation);
    }

    #[test]
    fn display_messages() {
        assert_eq!(DraftError::MissingField("title").to_string(), "title is required");
        assert_eq!(
            AppError::AlreadyFinished(TodoId(4)).to_string(),
            "todo 4 is already finished"
        );
        let err = ApiError::HttpError {
            status: 503,
            body: "down".into(),
        };
        assert_eq!(err.to_string(), "HTTP 503: down");
    }
}
