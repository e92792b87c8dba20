//! Upload transport decoding
//!
//! Import actions deliver each file as a MIME-type-prefixed data URI
//! (`data:text/plain;base64,<payload>`). The payload is base64-decoded and
//! must be valid UTF-8.

use super::IngestError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// One uploaded file: its name and its decoded text contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedDocument {
    pub name: String,
    pub contents: String,
}

impl UploadedDocument {
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

/// Decode a data-URI upload into document text.
///
/// Everything up to the first comma is the transport prefix and is
/// discarded; the rest is base64 holding UTF-8 text.
pub fn decode_upload(name: &str, data_uri: &str) -> Result<UploadedDocument, IngestError> {
    let (_prefix, payload) = data_uri.split_once(',').ok_or_else(|| {
        IngestError::InvalidUpload {
            name: name.to_string(),
            reason: "missing data URI prefix".to_string(),
        }
    })?;

    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| IngestError::InvalidUpload {
            name: name.to_string(),
            reason: format!("base64 decode failed: {}", e),
        })?;

    let contents = String::from_utf8(bytes).map_err(|e| IngestError::InvalidUpload {
        name: name.to_string(),
        reason: format!("not valid UTF-8: {}", e),
    })?;

    Ok(UploadedDocument::new(name, contents))
}
