//! Backend abstraction over the hosted generative model.
//!
//! Flows describe what they need as a [`ModelRequest`] (prompt parts plus the
//! kind of output expected) and receive a [`ModelResponse`]. The transport is
//! hidden behind [`ModelBackend`] so flows can be exercised without network
//! access.

use std::future::Future;

use crate::error::{BrandError, Result};
use crate::media::DataUri;
use crate::schema::{Schema, Violation};

/// One piece of a multimodal prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text(String),
    Media(DataUri),
}

/// What the model is asked to produce.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputKind {
    /// A JSON document matching the schema.
    Json(Schema),
    /// An image, possibly accompanied by text.
    Image,
    /// Spoken audio of the prompt text.
    Speech { voice: String },
}

impl OutputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputKind::Json(_) => "json",
            OutputKind::Image => "image",
            OutputKind::Speech { .. } => "speech",
        }
    }
}

/// A single generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    /// Flow issuing the call, for logs and error messages.
    pub flow: &'static str,
    /// Model identifier, e.g. `gemini-2.0-flash`.
    pub model: String,
    pub parts: Vec<Part>,
    pub output: OutputKind,
}

impl ModelRequest {
    /// A request for a JSON answer matching `schema`.
    pub fn json(
        flow: &'static str,
        model: impl Into<String>,
        parts: Vec<Part>,
        schema: Schema,
    ) -> Self {
        Self {
            flow,
            model: model.into(),
            parts,
            output: OutputKind::Json(schema),
        }
    }

    /// A request for an image.
    pub fn image(flow: &'static str, model: impl Into<String>, parts: Vec<Part>) -> Self {
        Self {
            flow,
            model: model.into(),
            parts,
            output: OutputKind::Image,
        }
    }

    /// A request to speak `text` with a prebuilt voice.
    pub fn speech(
        flow: &'static str,
        model: impl Into<String>,
        text: impl Into<String>,
        voice: impl Into<String>,
    ) -> Self {
        Self {
            flow,
            model: model.into(),
            parts: vec![Part::Text(text.into())],
            output: OutputKind::Speech {
                voice: voice.into(),
            },
        }
    }

    /// Concatenated text parts of the prompt.
    pub fn prompt_text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| match p {
                Part::Text(text) => Some(text.as_str()),
                Part::Media(_) => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Media attached to the prompt.
    pub fn media(&self) -> impl Iterator<Item = &DataUri> {
        self.parts.iter().filter_map(|p| match p {
            Part::Media(uri) => Some(uri),
            Part::Text(_) => None,
        })
    }
}

/// What the model returned. Either field may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelResponse {
    pub text: Option<String>,
    pub media: Option<DataUri>,
}

impl ModelResponse {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            media: None,
        }
    }

    pub fn with_media(media: DataUri) -> Self {
        Self {
            text: None,
            media: Some(media),
        }
    }

    /// The text answer, or `SCHEMA_MISMATCH` when there is none.
    pub fn require_text(&self, flow: &str) -> Result<&str> {
        match self.text.as_deref() {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(BrandError::schema_mismatch(
                flow,
                vec![Violation::new("$", "response contained no text")],
            )),
        }
    }

    /// The media answer, or `MEDIA_MISSING` when there is none.
    pub fn require_media(self, flow: &str) -> Result<DataUri> {
        self.media.ok_or_else(|| BrandError::media_missing(flow))
    }
}

/// A generative model the flows can call.
///
/// Implementations make exactly one remote call per `generate` and never
/// retry; retrying is left to whoever triggered the flow.
pub trait ModelBackend: Send + Sync {
    fn generate(&self, request: ModelRequest)
        -> impl Future<Output = Result<ModelResponse>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn prompt_text_skips_media() {
        let request = ModelRequest::image(
            "mockup",
            "m",
            vec![
                Part::Text("first".into()),
                Part::Media(DataUri::from_bytes("image/png", &[1])),
                Part::Text("second".into()),
            ],
        );
        assert_eq!(request.prompt_text(), "first\nsecond");
        assert_eq!(request.media().count(), 1);
        assert_eq!(request.output.as_str(), "image");
    }

    #[test]
    fn require_text_rejects_blank() {
        let err = ModelResponse::with_text("  ").require_text("chat").unwrap_err();
        assert_eq!(err.code, ErrorCode::SchemaMismatch);
        assert!(ModelResponse::default().require_text("chat").is_err());
        assert_eq!(
            ModelResponse::with_text("{}").require_text("chat").unwrap(),
            "{}"
        );
    }

    #[test]
    fn require_media_reports_missing() {
        let err = ModelResponse::with_text("sorry")
            .require_media("generate_logo")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::MediaMissing);
        assert!(err.message.contains("generate_logo"));
    }
}
