//! Decoding of browser-supplied `data:` URIs.
//!
//! File pickers hand uploads to the page as `data:<mime>;base64,<payload>`
//! strings. Only the payload after the first `;base64,` marker matters here;
//! the MIME type is discarded because attachments are always sent as
//! `application/octet-stream`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;

use crate::error::StoreError;

/// The marker separating the data URI header from its payload.
pub const BASE64_MARKER: &str = ";base64,";

/// Decode the base64 payload of a data URI.
///
/// ASCII whitespace inside the payload is ignored so that line-wrapped
/// base64 decodes the same as the unwrapped form.
///
/// # Examples
///
/// ```
/// use mailform_core::decode_data_uri;
///
/// let bytes = decode_data_uri("data:text/plain;base64,aGVsbG8=").unwrap();
/// assert_eq!(&bytes[..], b"hello");
/// ```
pub fn decode_data_uri(data_uri: &str) -> Result<Bytes, StoreError> {
    let (_, payload) = data_uri
        .split_once(BASE64_MARKER)
        .ok_or_else(|| StoreError::Decode(format!("missing '{BASE64_MARKER}' marker")))?;

    let compact: Vec<u8> = payload
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();

    STANDARD
        .decode(compact)
        .map(Bytes::from)
        .map_err(|e| StoreError::Decode(format!("invalid base64 payload: {e}")))
}
