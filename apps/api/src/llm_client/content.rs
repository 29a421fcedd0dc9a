//! User-message content blocks in the Anthropic Messages wire shape.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Base64Source {
    #[serde(rename = "type")]
    pub source_type: &'static str,
    pub media_type: String,
    pub data: String,
}

/// One block of a user message: plain text, a PDF document, or an image.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessagePart {
    Text { text: String },
    Document { source: Base64Source },
    Image { source: Base64Source },
}

impl MessagePart {
    pub fn text(text: impl Into<String>) -> Self {
        MessagePart::Text { text: text.into() }
    }

    pub fn document(media_type: impl Into<String>, data: impl Into<String>) -> Self {
        MessagePart::Document {
            source: base64_source(media_type, data),
        }
    }

    pub fn image(media_type: impl Into<String>, data: impl Into<String>) -> Self {
        MessagePart::Image {
            source: base64_source(media_type, data),
        }
    }

    /// Text of a text block; `None` for binary blocks.
    #[cfg(test)]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessagePart::Text { text } => Some(text),
            _ => None,
        }
    }
}

fn base64_source(media_type: impl Into<String>, data: impl Into<String>) -> Base64Source {
    Base64Source {
        source_type: "base64",
        media_type: media_type.into(),
        data: data.into(),
    }
}
