use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use crate::llm_client::MessagePart;

const LOG_PREFIX_CHARS: usize = 50;

#[derive(Debug, Error, PartialEq)]
pub enum MediaError {
    #[error("expected a data URI of the form 'data:<mimetype>;base64,<data>'")]
    NotDataUri,

    #[error("data URI is missing a MIME type")]
    MissingMimeType,

    #[error("data URI must use base64 encoding")]
    NotBase64,

    #[error("data URI payload is not valid base64: {0}")]
    InvalidPayload(String),

    #[error("unsupported resume format '{0}'; upload PDF, plain text, or an image")]
    UnsupportedMedia(String),
}

/// A parsed base64 data URI. The payload stays encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct DataUri {
    pub mime_type: String,
    pub data: String,
}

impl DataUri {
    /// Parses `data:<mimetype>[;param=value]*;base64,<payload>`.
    pub fn parse(uri: &str) -> Result<Self, MediaError> {
        let rest = uri.trim().strip_prefix("data:").ok_or(MediaError::NotDataUri)?;
        let (header, payload) = rest.split_once(',').ok_or(MediaError::NotDataUri)?;

        let mut params = header.split(';');
        let mime_type = params.next().unwrap_or_default().trim().to_ascii_lowercase();
        if mime_type.is_empty() {
            return Err(MediaError::MissingMimeType);
        }
        if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
            return Err(MediaError::NotBase64);
        }

        let data = payload.trim().to_string();
        STANDARD
            .decode(&data)
            .map_err(|e| MediaError::InvalidPayload(e.to_string()))?;

        Ok(Self { mime_type, data })
    }

    /// File-to-data-URI conversion.
    pub fn encode(mime_type: &str, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.to_ascii_lowercase(),
            data: STANDARD.encode(bytes),
        }
    }

    /// Size of the decoded payload in bytes, without decoding it.
    pub fn decoded_len(&self) -> usize {
        let padding = self.data.bytes().rev().take_while(|b| *b == b'=').count();
        (self.data.len() / 4 * 3).saturating_sub(padding)
    }

    /// Converts the resume to a model content block.
    pub fn to_part(&self) -> Result<MessagePart, MediaError> {
        let mime = self.mime_type.as_str();
        if mime == "application/pdf" {
            Ok(MessagePart::document(mime, self.data.clone()))
        } else if mime.starts_with("image/") {
            Ok(MessagePart::image(mime, self.data.clone()))
        } else if mime.starts_with("text/") {
            let bytes = STANDARD
                .decode(&self.data)
                .map_err(|e| MediaError::InvalidPayload(e.to_string()))?;
            Ok(MessagePart::text(String::from_utf8_lossy(&bytes).into_owned()))
        } else {
            Err(MediaError::UnsupportedMedia(self.mime_type.clone()))
        }
    }
}

impl std::fmt::Display for DataUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.data)
    }
}

/// First few characters of a URI for log lines. Never log whole resumes.
pub fn short_label(uri: &str) -> String {
    let mut label: String = uri.chars().take(LOG_PREFIX_CHARS).collect();
    if uri.chars().count() > LOG_PREFIX_CHARS {
        label.push_str("...");
    }
    label
}

/// Guesses a MIME type from an upload's file name.
pub fn mime_from_filename(name: &str) -> Option<&'static str> {
    let ext = name.rsplit_once('.')?.1.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "md" => "text/markdown",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => return None,
    };
    Some(mime)
}
