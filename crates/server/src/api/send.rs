use axum::Json;
use axum::extract::State;

use super::AppState;
use super::schemas::{SendRequest, SendResponse};
use crate::error::ServerError;

/// `POST /api/send` -- send the uploads to the recipient.
///
/// Blocks until the SMTP exchange finishes. On failure the uploads stay in
/// place so the user can try again.
pub async fn send(
    State(state): State<AppState>,
    Json(request): Json<SendRequest>,
) -> Result<Json<SendResponse>, ServerError> {
    let output = state
        .workflow
        .on_send(request.send_clicks, &request.form)
        .await?;
    Ok(Json(SendResponse { output }))
}
