//! Builds outgoing messages from the body template and stored uploads.
//!
//! The template is a `MiniJinja` (Jinja2-compatible) document with a single
//! variable, `text`, holding the free-form message typed by the user.
//! Auto-escaping follows the template name, so `.html` templates escape the
//! text before it lands in the body.

use std::path::Path;

use mailform_core::UploadedFile;
use minijinja::{Environment, context};
use tracing::debug;

use crate::config::MailConfig;
use crate::error::EmailError;
use crate::types::{EmailAttachment, EmailMessage};

/// Subject line of every outgoing message.
pub const SUBJECT: &str = "Please find the attached document.";

/// Fuel limit for `MiniJinja` template evaluation.
const FUEL_LIMIT: u64 = 100_000;

/// Renders the body template and assembles [`EmailMessage`]s.
#[derive(Debug)]
pub struct MailComposer {
    sender: Option<String>,
    template_name: String,
    env: Environment<'static>,
}

impl MailComposer {
    /// Load the body template from `config.template_path`.
    pub fn from_config(config: &MailConfig) -> Result<Self, EmailError> {
        Self::load(config.sender().map(ToOwned::to_owned), &config.template_path)
    }

    /// Load the body template from a file.
    pub fn load(sender: Option<String>, template_path: &Path) -> Result<Self, EmailError> {
        let source = std::fs::read_to_string(template_path).map_err(|e| {
            EmailError::Template(format!(
                "failed to read template {}: {e}",
                template_path.display()
            ))
        })?;
        let name = template_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("mail.html")
            .to_owned();
        Self::from_source(sender, name, source)
    }

    /// Build a composer from in-memory template source.
    ///
    /// `name` decides auto-escaping: names ending in `.html` escape `text`.
    pub fn from_source(
        sender: Option<String>,
        name: impl Into<String>,
        source: impl Into<String>,
    ) -> Result<Self, EmailError> {
        let template_name = name.into();
        let mut env = Environment::new();
        env.set_fuel(Some(FUEL_LIMIT));
        env.add_template_owned(template_name.clone(), source.into())
            .map_err(|e| {
                EmailError::Template(format!("syntax error in template '{template_name}': {e}"))
            })?;

        Ok(Self {
            sender,
            template_name,
            env,
        })
    }

    /// The configured sender address, if any.
    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    /// Render the HTML body with `text` bound to the template's `text`
    /// variable. Absent text renders as an empty string.
    pub fn render_body(&self, text: Option<&str>) -> Result<String, EmailError> {
        let template = self.env.get_template(&self.template_name).map_err(|e| {
            EmailError::Template(format!(
                "failed to load template '{}': {e}",
                self.template_name
            ))
        })?;
        template
            .render(context! { text => text.unwrap_or_default() })
            .map_err(|e| {
                EmailError::Template(format!(
                    "error rendering template '{}': {e}",
                    self.template_name
                ))
            })
    }

    /// Compose a message to `recipient` carrying `text` and every file in
    /// `attachments`, in order.
    ///
    /// The recipient is not validated here; the transport rejects addresses
    /// it cannot parse.
    pub fn compose(
        &self,
        recipient: &str,
        text: Option<&str>,
        attachments: Vec<UploadedFile>,
    ) -> Result<EmailMessage, EmailError> {
        let from = self.sender.clone().ok_or_else(|| {
            EmailError::Configuration(
                "no sender address: set MAIL_USERNAME or mail.from_address".to_owned(),
            )
        })?;
        let html_body = self.render_body(text)?;
        let attachments: Vec<EmailAttachment> =
            attachments.into_iter().map(EmailAttachment::from).collect();

        debug!(
            to = %recipient,
            attachments = attachments.len(),
            body_bytes = html_body.len(),
            "composed message"
        );

        Ok(EmailMessage {
            from,
            to: vec![recipient.to_owned()],
            subject: SUBJECT.to_owned(),
            html_body,
            attachments,
        })
    }
}
