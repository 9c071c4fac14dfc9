use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, error, info};

use crate::backend::{EmailBackend, EmailResult};
use crate::config::{MailConfig, TlsMode};
use crate::error::EmailError;
use crate::types::EmailMessage;

/// SMTP email delivery backend using `lettre`.
pub struct SmtpBackend {
    config: MailConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl std::fmt::Debug for SmtpBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpBackend")
            .field("config", &self.config)
            .field("transport", &"<AsyncSmtpTransport>")
            .finish()
    }
}

impl SmtpBackend {
    /// Create a new `SmtpBackend` from the given mail configuration.
    pub fn new(config: MailConfig) -> Result<Self, EmailError> {
        let transport = build_transport(&config)?;
        Ok(Self { config, transport })
    }

    /// Create a `SmtpBackend` with a pre-built transport (for testing).
    pub fn with_transport(
        config: MailConfig,
        transport: AsyncSmtpTransport<Tokio1Executor>,
    ) -> Self {
        Self { config, transport }
    }
}

#[async_trait]
impl EmailBackend for SmtpBackend {
    async fn send(&self, message: &EmailMessage) -> Result<EmailResult, EmailError> {
        debug!(
            to = ?message.to,
            attachments = message.attachments.len(),
            "building SMTP message"
        );
        let lettre_message = build_message(message)?;

        info!(to = ?message.to, host = %self.config.server, "sending email via SMTP");
        self.transport.send(lettre_message).await.map_err(|e| {
            error!(error = %e, "SMTP send failed");
            map_smtp_error(&e)
        })?;

        info!(to = ?message.to, "email sent successfully via SMTP");
        Ok(EmailResult {
            status: "sent".to_owned(),
        })
    }

    async fn health_check(&self) -> Result<(), EmailError> {
        debug!("performing SMTP health check");
        self.transport.test_connection().await.map_err(|e| {
            error!(error = %e, "SMTP health check failed");
            EmailError::Connection(format!("SMTP health check failed: {e}"))
        })?;
        info!("SMTP health check passed");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "smtp"
    }
}

/// Build a `lettre::Message` from the backend-neutral [`EmailMessage`].
///
/// The body is always `multipart/mixed`: the HTML part first, then one part
/// per attachment.
fn build_message(msg: &EmailMessage) -> Result<Message, EmailError> {
    let from_mailbox: Mailbox = msg
        .from
        .parse()
        .map_err(|e| EmailError::Configuration(format!("invalid from address: {e}")))?;

    let mut builder = Message::builder().from(from_mailbox).subject(&msg.subject);

    for to in &msg.to {
        let to_mailbox: Mailbox = to.parse().map_err(|e| {
            EmailError::InvalidAddress(format!("invalid recipient address '{to}': {e}"))
        })?;
        builder = builder.to(to_mailbox);
    }

    let mut body = MultiPart::mixed().singlepart(SinglePart::html(msg.html_body.clone()));

    for attachment in &msg.attachments {
        let content_type = ContentType::parse(&attachment.content_type).map_err(|e| {
            EmailError::Build(format!(
                "invalid content type '{}' for {}: {e}",
                attachment.content_type, attachment.filename
            ))
        })?;
        body = body.singlepart(
            Attachment::new(attachment.filename.clone())
                .body(attachment.data.to_vec(), content_type),
        );
    }

    builder
        .multipart(body)
        .map_err(|e| EmailError::Build(format!("failed to build email: {e}")))
}

/// Build an async SMTP transport from the given configuration.
fn build_transport(
    config: &MailConfig,
) -> Result<AsyncSmtpTransport<Tokio1Executor>, EmailError> {
    let builder = match config.tls {
        TlsMode::Implicit => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.server)
            .map_err(|e| EmailError::Configuration(format!("SMTP TLS relay error: {e}")))?,
        TlsMode::Starttls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.server)
            .map_err(|e| EmailError::Configuration(format!("SMTP STARTTLS relay error: {e}")))?,
        TlsMode::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.server),
    };

    let builder = builder.port(config.port);

    let builder = if let (Some(user), Some(pass)) = (&config.username, &config.password) {
        builder.credentials(Credentials::new(user.clone(), pass.clone()))
    } else {
        builder
    };

    Ok(builder.build())
}

/// Map a lettre SMTP error to the appropriate [`EmailError`] variant.
///
/// Permanent (5xx) replies cover rejected recipients and failed
/// authentication; everything else is treated as a connection problem.
fn map_smtp_error(error: &lettre::transport::smtp::Error) -> EmailError {
    let message = error.to_string();

    if error.is_permanent() {
        EmailError::Transport(format!("permanent SMTP error: {message}"))
    } else if error.is_transient() {
        EmailError::Connection(format!("transient SMTP error: {message}"))
    } else {
        EmailError::Connection(format!("SMTP error: {message}"))
    }
}
