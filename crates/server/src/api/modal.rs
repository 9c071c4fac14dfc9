use axum::Json;

use super::schemas::ModalRequest;
use crate::workflow::ModalState;

/// `POST /api/modal` -- apply new open/close click counts to the modal state.
pub async fn toggle(Json(request): Json<ModalRequest>) -> Json<ModalState> {
    let mut state = request.state;
    state.toggle(request.open_clicks, request.close_clicks);
    Json(state)
}
