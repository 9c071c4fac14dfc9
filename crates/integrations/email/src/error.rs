use thiserror::Error;

/// Errors that can occur while composing or delivering an email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// The mail settings are incomplete or invalid (e.g. no sender address).
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The body template could not be loaded or rendered.
    #[error("template error: {0}")]
    Template(String),

    /// A recipient address could not be parsed.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The MIME message could not be assembled.
    #[error("failed to build message: {0}")]
    Build(String),

    /// The SMTP server refused the message (rejected recipient, failed
    /// authentication, policy rejection).
    #[error("mail transport error: {0}")]
    Transport(String),

    /// The SMTP server could not be reached or the connection dropped.
    #[error("mail connection error: {0}")]
    Connection(String),
}

impl EmailError {
    /// Returns `true` if the failure happened while talking to the mail
    /// server, as opposed to while preparing the message.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Connection(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors() {
        assert!(EmailError::Transport("550 no such user".into()).is_transport());
        assert!(EmailError::Connection("reset".into()).is_transport());
        assert!(!EmailError::Template("x".into()).is_transport());
        assert!(!EmailError::InvalidAddress("x".into()).is_transport());
    }

    #[test]
    fn error_display() {
        let err = EmailError::Transport("550 mailbox unavailable".into());
        assert_eq!(err.to_string(), "mail transport error: 550 mailbox unavailable");
    }
}
