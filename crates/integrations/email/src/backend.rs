use async_trait::async_trait;

use crate::error::EmailError;
use crate::types::EmailMessage;

/// Result of a successful email send operation.
#[derive(Debug, Clone)]
pub struct EmailResult {
    /// Human-readable status (e.g. `"sent"`).
    pub status: String,
}

/// Trait for pluggable email delivery backends.
///
/// Implementations only move an already composed [`EmailMessage`]; they never
/// retry. Composition lives in [`MailComposer`](crate::composer::MailComposer).
#[async_trait]
pub trait EmailBackend: Send + Sync + std::fmt::Debug {
    /// Send an email message through this backend.
    async fn send(&self, message: &EmailMessage) -> Result<EmailResult, EmailError>;

    /// Perform a health check to verify the backend is operational.
    async fn health_check(&self) -> Result<(), EmailError>;

    /// Return the backend name (e.g. `"smtp"`).
    fn backend_name(&self) -> &'static str;
}
