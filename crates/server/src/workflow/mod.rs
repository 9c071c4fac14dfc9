//! The upload / compose / send / cleanup workflow.
//!
//! Each UI event maps to one async handler on [`Workflow`]. Handlers take the
//! current form values and return a view model; the HTTP layer in
//! [`crate::api`] only translates requests and responses.

pub mod modal;
pub mod view;

use std::sync::Arc;

use mailform_core::{StoreError, UploadStore, UploadedFile};
use mailform_email::{EmailBackend, EmailError, MailComposer};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, instrument, warn};

pub use modal::{ModalState, toggle_modal};
pub use view::{EMPTY_PLACEHOLDER, FileListItem, FileListView, UploadFailure};

/// Returned to the page after a successful send.
pub const CONFIRMATION: &str = "Your message has been sent.";

/// Errors surfaced by workflow handlers.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Reading or writing the upload directory failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Composing or delivering the email failed.
    #[error(transparent)]
    Email(#[from] EmailError),
}

/// Current values of the compose form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComposeForm {
    /// Recipient address as typed.
    #[serde(default)]
    pub to_address: Option<String>,
    /// Free-form message text.
    #[serde(default)]
    pub text: Option<String>,
}

/// An email about to be sent. Never persisted.
#[derive(Debug, Clone)]
pub struct EmailDraft {
    pub recipient: String,
    pub body_text: Option<String>,
    pub attachments: Vec<UploadedFile>,
}

/// Wires UI events to the upload store and the mail pipeline.
#[derive(Debug)]
pub struct Workflow {
    store: UploadStore,
    composer: MailComposer,
    backend: Arc<dyn EmailBackend>,
}

impl Workflow {
    pub fn new(store: UploadStore, composer: MailComposer, backend: Arc<dyn EmailBackend>) -> Self {
        Self {
            store,
            composer,
            backend,
        }
    }

    /// The upload store backing this workflow.
    pub fn store(&self) -> &UploadStore {
        &self.store
    }

    /// The mail delivery backend.
    pub fn backend(&self) -> &Arc<dyn EmailBackend> {
        &self.backend
    }

    /// Handle a file-drop event.
    ///
    /// `filenames` and `contents` are parallel lists; pairs are saved in
    /// order. A file that fails to save is reported in the returned view and
    /// does not stop the remaining files. When either list is absent nothing
    /// is saved and the current list is returned.
    #[instrument(skip_all, fields(files = filenames.as_ref().map_or(0, Vec::len)))]
    pub async fn on_upload(
        &self,
        filenames: Option<Vec<String>>,
        contents: Option<Vec<String>>,
    ) -> Result<FileListView, WorkflowError> {
        let mut errors = Vec::new();

        if let (Some(filenames), Some(contents)) = (filenames, contents) {
            for (name, data_uri) in filenames.into_iter().zip(contents) {
                if let Err(e) = self.store.save(&name, &data_uri).await {
                    warn!(file = %name, error = %e, "failed to save upload");
                    errors.push(UploadFailure {
                        filename: name,
                        error: e.to_string(),
                    });
                }
            }
        }

        let mut view = self.file_list().await?;
        view.errors = errors;
        Ok(view)
    }

    /// Render the file list from the current store contents.
    pub async fn file_list(&self) -> Result<FileListView, WorkflowError> {
        Ok(FileListView::from_names(self.store.list().await?))
    }

    /// Build a draft from the form and the files in the store right now.
    ///
    /// Attachments are always re-read from disk, not taken from any earlier
    /// upload event.
    pub async fn draft(&self, form: &ComposeForm) -> Result<EmailDraft, WorkflowError> {
        Ok(EmailDraft {
            recipient: form.to_address.clone().unwrap_or_default(),
            body_text: form.text.clone(),
            attachments: self.store.load_all().await?,
        })
    }

    /// Handle a click on the send button.
    ///
    /// Zero or absent `send_clicks` returns an empty string and does
    /// nothing. Otherwise the message is composed and sent; on success every
    /// stored file is deleted and [`CONFIRMATION`] is returned. Failures
    /// propagate and leave the store untouched.
    #[instrument(skip_all, fields(send_clicks = ?send_clicks))]
    pub async fn on_send(
        &self,
        send_clicks: Option<u64>,
        form: &ComposeForm,
    ) -> Result<String, WorkflowError> {
        if send_clicks.unwrap_or(0) == 0 {
            return Ok(String::new());
        }

        let draft = self.draft(form).await?;
        let attachment_count = draft.attachments.len();
        let message =
            self.composer
                .compose(&draft.recipient, draft.body_text.as_deref(), draft.attachments)?;

        self.backend.send(&message).await?;

        let removed = self.store.clear().await?;
        info!(
            to = %draft.recipient,
            attachments = attachment_count,
            removed,
            backend = self.backend.backend_name(),
            "message sent, uploads cleared"
        );

        Ok(CONFIRMATION.to_owned())
    }
}
