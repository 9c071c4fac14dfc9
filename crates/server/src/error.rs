use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mailform_core::StoreError;
use mailform_email::EmailError;
use thiserror::Error;

use crate::workflow::WorkflowError;

/// Errors that can occur when running the mailform server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// An I/O error (e.g. binding the listener).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A workflow-level error surfaced through the API.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// A page template failed to render.
    #[error("render error: {0}")]
    Render(String),
}

impl From<StoreError> for ServerError {
    fn from(e: StoreError) -> Self {
        Self::Workflow(WorkflowError::Store(e))
    }
}

impl ServerError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Workflow(WorkflowError::Store(e)) => {
                if e.is_client_error() {
                    StatusCode::BAD_REQUEST
                } else if matches!(e, StoreError::NotFound(_)) {
                    StatusCode::NOT_FOUND
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
            Self::Workflow(WorkflowError::Email(e)) => {
                if e.is_transport() {
                    StatusCode::BAD_GATEWAY
                } else if matches!(e, EmailError::InvalidAddress(_)) {
                    StatusCode::BAD_REQUEST
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
            Self::Config(_) | Self::Io(_) | Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "request failed");
        }

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_client_or_server_status() {
        let err = ServerError::from(StoreError::Decode("bad".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = ServerError::from(StoreError::NotFound("a.txt".into()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err = ServerError::from(StoreError::Storage(std::io::Error::other("disk")));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn transport_errors_are_bad_gateway() {
        let err = ServerError::from(WorkflowError::Email(EmailError::Transport(
            "535 auth".into(),
        )));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);

        let err = ServerError::from(WorkflowError::Email(EmailError::Connection(
            "refused".into(),
        )));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn invalid_name_is_bad_request() {
        let err = ServerError::from(StoreError::InvalidName("../x".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn message_preparation_errors_are_internal() {
        for e in [
            EmailError::Configuration("no sender".into()),
            EmailError::Template("broken".into()),
            EmailError::Build("bad part".into()),
        ] {
            let err = ServerError::from(WorkflowError::Email(e));
            assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn invalid_recipient_is_bad_request() {
        let err = ServerError::from(WorkflowError::Email(EmailError::InvalidAddress(
            "nope".into(),
        )));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn message_is_preserved() {
        let err = ServerError::from(StoreError::NotFound("a.txt".into()));
        assert_eq!(err.to_string(), "file not found: a.txt");
    }
}
