//! The server-rendered compose page.

use axum::extract::State;
use axum::response::Html;
use minijinja::{Environment, context};

use super::AppState;
use crate::error::ServerError;

const INDEX_NAME: &str = "index.html";
const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

/// Build the template environment holding the page templates.
pub fn environment() -> Result<Environment<'static>, ServerError> {
    let mut env = Environment::new();
    env.add_template(INDEX_NAME, INDEX_TEMPLATE)
        .map_err(|e| ServerError::Render(format!("invalid page template: {e}")))?;
    Ok(env)
}

/// `GET /` -- the upload and compose form with the current file list.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ServerError> {
    let view = state.workflow.file_list().await?;
    let html = state
        .pages
        .get_template(INDEX_NAME)
        .and_then(|t| {
            t.render(context! {
                title => "Send documents",
                items => view.items,
            })
        })
        .map_err(|e| ServerError::Render(e.to_string()))?;
    Ok(Html(html))
}
