use serde::{Deserialize, Serialize};

use crate::workflow::{ComposeForm, ModalState};

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"`, or `"degraded"` when the mail backend is unreachable.
    pub status: String,
    /// Number of files currently waiting in the upload directory.
    pub uploads: usize,
    /// Result of the mail backend check.
    pub mail: MailHealth,
}

/// Mail backend reachability as seen by `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct MailHealth {
    pub backend: String,
    pub reachable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body of `POST /api/upload`: parallel lists of names and data URIs.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UploadRequest {
    #[serde(default)]
    pub filenames: Option<Vec<String>>,
    #[serde(default)]
    pub contents: Option<Vec<String>>,
}

/// Body of `POST /api/modal`: the state the page holds plus the current
/// click counts of the open and close buttons.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ModalRequest {
    #[serde(default)]
    pub state: ModalState,
    #[serde(default)]
    pub open_clicks: Option<u64>,
    #[serde(default)]
    pub close_clicks: Option<u64>,
}

/// Body of `POST /api/send`.
#[derive(Debug, Default, Deserialize)]
pub struct SendRequest {
    #[serde(default)]
    pub send_clicks: Option<u64>,
    #[serde(flatten)]
    pub form: ComposeForm,
}

/// Response of `POST /api/send`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SendResponse {
    /// Text shown under the send button.
    pub output: String,
}
