use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::EmailError;

/// Environment variable overriding [`MailConfig::server`].
pub const ENV_MAIL_SERVER: &str = "MAIL_SERVER";
/// Environment variable overriding [`MailConfig::port`].
pub const ENV_MAIL_PORT: &str = "MAIL_PORT";
/// Environment variable overriding [`MailConfig::username`].
pub const ENV_MAIL_USERNAME: &str = "MAIL_USERNAME";
/// Environment variable overriding [`MailConfig::password`].
pub const ENV_MAIL_PASSWORD: &str = "MAIL_PASSWORD";

/// How the SMTP connection is secured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsMode {
    /// TLS from the first byte (SMTPS, usually port 465).
    #[default]
    Implicit,
    /// Plaintext connection upgraded with `STARTTLS` (usually port 587).
    Starttls,
    /// No encryption. Only for local test servers.
    None,
}

/// Outbound mail settings.
///
/// Loaded from the `[mail]` table of the server configuration, then
/// overridden by the `MAIL_*` environment variables.
///
/// # Examples
///
/// ```
/// use mailform_email::{MailConfig, TlsMode};
///
/// let config = MailConfig::default();
/// assert_eq!(config.server, "smtp.gmail.com");
/// assert_eq!(config.port, 465);
/// assert_eq!(config.tls, TlsMode::Implicit);
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// SMTP server hostname.
    #[serde(default = "default_server")]
    pub server: String,

    /// SMTP server port. Defaults to 465.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Optional SMTP username. Also used as the sender when
    /// `from_address` is not set.
    pub username: Option<String>,

    /// Optional SMTP password.
    pub password: Option<String>,

    /// Explicit `From` address.
    pub from_address: Option<String>,

    /// Connection security. Defaults to implicit TLS.
    #[serde(default)]
    pub tls: TlsMode,

    /// Path of the HTML body template.
    #[serde(default = "default_template_path")]
    pub template_path: PathBuf,
}

fn default_server() -> String {
    "smtp.gmail.com".to_owned()
}

fn default_port() -> u16 {
    465
}

fn default_template_path() -> PathBuf {
    PathBuf::from("template/mail.html")
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            port: default_port(),
            username: None,
            password: None,
            from_address: None,
            tls: TlsMode::default(),
            template_path: default_template_path(),
        }
    }
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("from_address", &self.from_address)
            .field("tls", &self.tls)
            .field("template_path", &self.template_path)
            .finish()
    }
}

impl MailConfig {
    /// Apply the `MAIL_*` environment variables on top of this config.
    pub fn apply_env(&mut self) -> Result<(), EmailError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset. A `MAIL_PORT` that is not a valid
    /// port number is a configuration error.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), EmailError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(server) = get(ENV_MAIL_SERVER) {
            self.server = server;
        }
        if let Some(port) = get(ENV_MAIL_PORT) {
            self.port = port.trim().parse().map_err(|e| {
                EmailError::Configuration(format!("invalid {ENV_MAIL_PORT} '{port}': {e}"))
            })?;
        }
        if let Some(username) = get(ENV_MAIL_USERNAME) {
            self.username = Some(username);
        }
        if let Some(password) = get(ENV_MAIL_PASSWORD) {
            self.password = Some(password);
        }
        Ok(())
    }

    /// Set SMTP authentication credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// The `From` address: `from_address` if set, else the SMTP username.
    pub fn sender(&self) -> Option<&str> {
        self.from_address
            .as_deref()
            .or(self.username.as_deref())
            .filter(|s| !s.is_empty())
    }
}
