//! User-facing error modeling shared by the form and list controllers.

use client_core::ClientError;
use shared::error::ErrorKind;

/// Which operation the user was attempting when an adapter call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    Fetch,
    Create,
    Update,
    Delete,
    List,
}

impl UiErrorContext {
    pub fn message(self) -> &'static str {
        match self {
            UiErrorContext::Fetch => "Failed to fetch reservation",
            UiErrorContext::Create => "Failed to create reservation",
            UiErrorContext::Update => "Failed to update reservation",
            UiErrorContext::Delete => "Failed to delete reservation",
            UiErrorContext::List => {
                "Failed to fetch reservations. Please make sure the backend is running."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    kind: ErrorKind,
    context: UiErrorContext,
    detail: String,
}

impl UiError {
    pub fn from_client_error(context: UiErrorContext, err: &ClientError) -> Self {
        Self {
            kind: err.kind(),
            context,
            detail: err.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    /// The single message shown to the user.
    pub fn message(&self) -> &'static str {
        self.context.message()
    }

    pub fn hint(&self) -> &'static str {
        self.kind.hint()
    }

    /// Full adapter error text, for logs and verbose output.
    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn is_retryable(&self) -> bool {
        self.kind.is_transient()
    }
}
