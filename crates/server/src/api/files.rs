use axum::Json;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use mailform_core::link::encode_filename;
use tracing::instrument;

use super::AppState;
use super::schemas::UploadRequest;
use crate::error::ServerError;
use crate::workflow::FileListView;

/// `GET /api/files` -- the current file list.
pub async fn list_files(State(state): State<AppState>) -> Result<Json<FileListView>, ServerError> {
    Ok(Json(state.workflow.file_list().await?))
}

/// `POST /api/upload` -- save dropped files and return the refreshed list.
///
/// Files that fail to decode are listed under `errors`; the others are
/// still saved.
pub async fn upload(
    State(state): State<AppState>,
    Json(request): Json<UploadRequest>,
) -> Result<Json<FileListView>, ServerError> {
    let view = state
        .workflow
        .on_upload(request.filenames, request.contents)
        .await?;
    Ok(Json(view))
}

/// `GET /download/{filename}` -- serve a stored file as an attachment.
#[instrument(skip(state))]
pub async fn download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, ServerError> {
    let data = state.workflow.store().read(&filename).await?;

    let disposition = format!(
        "attachment; filename*=UTF-8''{}",
        encode_filename(&filename)
    );
    let disposition = HeaderValue::from_str(&disposition)
        .map_err(|e| ServerError::Render(format!("invalid content disposition: {e}")))?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/octet-stream"),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Body::from(data),
    )
        .into_response())
}
