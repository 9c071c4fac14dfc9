use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

/// Path prefix of the download endpoint.
pub const DOWNLOAD_PREFIX: &str = "/download/";

/// Bytes left unescaped in a download link: the RFC 3986 unreserved set.
const FILENAME_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Build the download href for a stored file.
///
/// The filename is percent-encoded as a single path segment, so characters
/// such as spaces, `/`, `?` and `#` cannot change the shape of the URL.
///
/// # Examples
///
/// ```
/// use mailform_core::download_link;
///
/// assert_eq!(download_link("my file.txt"), "/download/my%20file.txt");
/// ```
pub fn download_link(filename: &str) -> String {
    format!("{DOWNLOAD_PREFIX}{}", encode_filename(filename))
}

/// Percent-encode a filename as one URL path segment.
pub fn encode_filename(filename: &str) -> String {
    utf8_percent_encode(filename, FILENAME_ESCAPE).to_string()
}

/// A stored filename paired with its download link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLink {
    /// Text shown to the user (the original filename).
    pub label: String,
    /// Download href for the file.
    pub href: String,
}

impl FileLink {
    pub fn new(filename: impl Into<String>) -> Self {
        let label = filename.into();
        let href = download_link(&label);
        Self { label, href }
    }
}
