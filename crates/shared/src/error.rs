use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure kinds the UI reacts to. Every adapter error maps onto exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    ServerError,
    Unreachable,
    RequestFailed,
}

impl ErrorKind {
    pub fn hint(self) -> &'static str {
        match self {
            ErrorKind::Validation => "please correct the highlighted fields",
            ErrorKind::NotFound => "resource not found",
            ErrorKind::ServerError => "try again later",
            ErrorKind::Unreachable => "backend not running / network down",
            ErrorKind::RequestFailed => "request failed",
        }
    }

    /// Whether resubmitting the same request might succeed.
    pub fn is_transient(self) -> bool {
        matches!(self, ErrorKind::ServerError | ErrorKind::Unreachable)
    }
}

#[derive(Debug, Error)]
#[error("invalid reservation id in route: '{raw}'")]
pub struct InvalidRouteId {
    pub raw: String,
}

impl InvalidRouteId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }
}
