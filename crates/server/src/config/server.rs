use serde::Deserialize;

/// HTTP server bind configuration.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum accepted request body in bytes.
    ///
    /// Uploads arrive base64-encoded inside a JSON body, so this needs to be
    /// roughly a third larger than the biggest file you expect.
    #[serde(default = "default_max_request_bytes")]
    pub max_request_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_request_bytes: default_max_request_bytes(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_owned()
}

fn default_port() -> u16 {
    8050
}

fn default_max_request_bytes() -> usize {
    32 * 1024 * 1024
}

/// Upload directory configuration.
#[derive(Debug, Deserialize)]
pub struct UploadsConfig {
    /// Directory holding uploaded files until they are sent.
    #[serde(default = "default_upload_dir")]
    pub directory: String,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            directory: default_upload_dir(),
        }
    }
}

fn default_upload_dir() -> String {
    "temp".to_owned()
}
