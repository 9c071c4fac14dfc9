pub mod backend;
pub mod composer;
pub mod config;
pub mod error;
pub mod smtp;
pub mod types;

pub use backend::{EmailBackend, EmailResult};
pub use composer::{MailComposer, SUBJECT};
pub use config::{MailConfig, TlsMode};
pub use error::EmailError;
pub use smtp::SmtpBackend;
pub use types::{ATTACHMENT_CONTENT_TYPE, EmailAttachment, EmailMessage};
