use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::warn;

use super::AppState;
use super::schemas::{HealthResponse, MailHealth};
use crate::error::ServerError;

/// `GET /health` -- service status, pending uploads and mail backend
/// reachability.
///
/// Answers 503 with status `"degraded"` when the mail backend fails its
/// check; uploads still work in that state but sends will not.
pub async fn health(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<HealthResponse>), ServerError> {
    let uploads = state.workflow.store().list().await?.len();

    let backend = state.workflow.backend();
    let mail = match backend.health_check().await {
        Ok(()) => MailHealth {
            backend: backend.backend_name().to_owned(),
            reachable: true,
            error: None,
        },
        Err(e) => {
            warn!(backend = backend.backend_name(), error = %e, "mail backend health check failed");
            MailHealth {
                backend: backend.backend_name().to_owned(),
                reachable: false,
                error: Some(e.to_string()),
            }
        }
    };

    let (code, status) = if mail.reachable {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    Ok((
        code,
        Json(HealthResponse {
            status: status.into(),
            uploads,
            mail,
        }),
    ))
}
