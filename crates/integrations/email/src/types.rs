use bytes::Bytes;
use mailform_core::UploadedFile;

/// MIME type used for every attachment.
pub const ATTACHMENT_CONTENT_TYPE: &str = "application/octet-stream";

/// A file attached to an outgoing email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAttachment {
    /// Filename shown to the recipient.
    pub filename: String,
    /// MIME content type.
    pub content_type: String,
    /// Raw file content.
    pub data: Bytes,
}

impl From<UploadedFile> for EmailAttachment {
    fn from(file: UploadedFile) -> Self {
        Self {
            filename: file.name,
            content_type: ATTACHMENT_CONTENT_TYPE.to_owned(),
            data: file.data,
        }
    }
}

/// A fully composed email, independent of the delivery backend.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    /// Sender email address.
    pub from: String,
    /// Recipient addresses.
    pub to: Vec<String>,
    /// Email subject line.
    pub subject: String,
    /// Rendered HTML body.
    pub html_body: String,
    /// Attachments in the order they were added.
    pub attachments: Vec<EmailAttachment>,
}

impl EmailMessage {
    /// Filenames of the attachments, in order.
    pub fn attachment_names(&self) -> Vec<&str> {
        self.attachments
            .iter()
            .map(|a| a.filename.as_str())
            .collect()
    }
}
