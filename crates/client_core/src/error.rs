//! Failure taxonomy for the reservation adapter.

use reqwest::StatusCode;
use shared::error::ErrorKind;
use thiserror::Error;

pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("resource not found: {path}")]
    NotFound { path: String },
    #[error("server error {status} on {path}, try again later")]
    ServerError {
        status: u16,
        path: String,
        body: String,
    },
    #[error("backend unreachable (not running or network down): {reason}")]
    Unreachable { reason: String },
    #[error("request to {path} failed with status {status}: {body}")]
    RequestFailed {
        status: u16,
        path: String,
        body: String,
    },
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::NotFound { .. } => ErrorKind::NotFound,
            ClientError::ServerError { .. } => ErrorKind::ServerError,
            ClientError::Unreachable { .. } => ErrorKind::Unreachable,
            ClientError::RequestFailed { .. } => ErrorKind::RequestFailed,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::NotFound { .. } => Some(StatusCode::NOT_FOUND.as_u16()),
            ClientError::ServerError { status, .. } | ClientError::RequestFailed { status, .. } => {
                Some(*status)
            }
            ClientError::Unreachable { .. } => None,
        }
    }
}

/// Maps a received response onto the taxonomy. Returns the body untouched for 2xx.
pub fn classify_status(status: StatusCode, path: &str, body: String) -> ClientResult<String> {
    if status.is_success() {
        return Ok(body);
    }
    let path = path.to_string();
    if status == StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound { path });
    }
    if status.as_u16() >= 500 {
        return Err(ClientError::ServerError {
            status: status.as_u16(),
            path,
            body,
        });
    }
    Err(ClientError::RequestFailed {
        status: status.as_u16(),
        path,
        body,
    })
}

/// Maps a failure that left us without a usable response (refused connection,
/// DNS, timeout, reset while reading the body).
pub fn classify_transport(err: &reqwest::Error) -> ClientError {
    let reason = if err.is_timeout() {
        format!("request timed out: {err}")
    } else if err.is_connect() {
        format!("failed to connect: {err}")
    } else {
        err.to_string()
    };
    ClientError::Unreachable { reason }
}

pub fn decode_failure(status: StatusCode, path: &str, body: String) -> ClientError {
    ClientError::RequestFailed {
        status: status.as_u16(),
        path: path.to_string(),
        body,
    }
}
