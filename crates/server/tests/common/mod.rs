#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tempfile::TempDir;

use mailform_core::UploadStore;
use mailform_email::{EmailBackend, EmailError, EmailMessage, EmailResult, MailComposer};
use mailform_server::workflow::Workflow;

pub const TEMPLATE: &str = "<html><body><p>{{ text }}</p></body></html>";
pub const SENDER: &str = "sender@example.com";

// -- Mock backends --------------------------------------------------------

/// Records every message instead of delivering it.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingBackend {
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailBackend for RecordingBackend {
    async fn send(&self, message: &EmailMessage) -> Result<EmailResult, EmailError> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(EmailResult {
            status: "sent".to_owned(),
        })
    }

    async fn health_check(&self) -> Result<(), EmailError> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "recording"
    }
}

/// Rejects every message the way an SMTP server refusing auth would.
#[derive(Debug, Default)]
pub struct FailingBackend;

#[async_trait]
impl EmailBackend for FailingBackend {
    async fn send(&self, _message: &EmailMessage) -> Result<EmailResult, EmailError> {
        Err(EmailError::Transport(
            "permanent SMTP error: 535 authentication failed".to_owned(),
        ))
    }

    async fn health_check(&self) -> Result<(), EmailError> {
        Err(EmailError::Connection("unreachable".to_owned()))
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}

// -- Helpers --------------------------------------------------------------

pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

pub fn composer() -> MailComposer {
    MailComposer::from_source(Some(SENDER.to_owned()), "mail.html", TEMPLATE)
        .expect("template should compile")
}

pub struct Harness {
    pub dir: TempDir,
    pub workflow: Workflow,
}

impl Harness {
    pub fn store(&self) -> &UploadStore {
        self.workflow.store()
    }
}

pub fn harness_with(backend: Arc<dyn EmailBackend>) -> Harness {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = UploadStore::new(dir.path().join("temp"));
    let workflow = Workflow::new(store, composer(), backend);
    Harness { dir, workflow }
}

pub fn recording_harness() -> (Harness, Arc<RecordingBackend>) {
    let backend = Arc::new(RecordingBackend::default());
    let harness = harness_with(Arc::clone(&backend) as Arc<dyn EmailBackend>);
    (harness, backend)
}
