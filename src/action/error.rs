//! Action error taxonomy and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::action::cors::{ACTIONS_CORS_HEADERS, TIP_CORS_HEADERS};
use crate::blockchain::{LedgerError, TransactionError};

/// Body used when the underlying error carries no caller-facing message.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// Everything that can go wrong while serving the action endpoint.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("Invalid input query parameter: to")]
    InvalidRecipient,

    #[error("Invalid input query parameter: amount")]
    InvalidAmount,

    #[error("Invalid \"account\" provided")]
    InvalidAccount,

    #[error("Upstream failure: {0}")]
    Upstream(String),
}

impl From<LedgerError> for ActionError {
    fn from(e: LedgerError) -> Self {
        ActionError::Upstream(e.to_string())
    }
}

impl From<TransactionError> for ActionError {
    fn from(e: TransactionError) -> Self {
        ActionError::Upstream(e.to_string())
    }
}

impl ActionError {
    /// Text sent back to the caller.
    pub fn public_message(&self) -> String {
        match self {
            ActionError::Upstream(_) => UNKNOWN_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    /// Status for this error. With `legacy_status` only the invalid-account
    /// rejection leaves the 2xx range.
    pub fn status(&self, legacy_status: bool) -> StatusCode {
        match self {
            ActionError::InvalidAccount => StatusCode::BAD_REQUEST,
            _ if legacy_status => StatusCode::OK,
            ActionError::InvalidRecipient | ActionError::InvalidAmount => StatusCode::BAD_REQUEST,
            ActionError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Build the plain-text response, picking the CORS set that goes with it.
    pub fn into_response_with(self, legacy_status: bool) -> Response {
        let status = self.status(legacy_status);
        let body = self.public_message();
        match self {
            ActionError::InvalidAccount => (status, ACTIONS_CORS_HEADERS, body).into_response(),
            _ => (status, TIP_CORS_HEADERS, body).into_response(),
        }
    }
}

impl IntoResponse for ActionError {
    fn into_response(self) -> Response {
        self.into_response_with(true)
    }
}
