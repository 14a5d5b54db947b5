//! Logo generation from a business description.

use serde::{Deserialize, Serialize};

use crate::config::StudioConfig;
use crate::error::Result;
use crate::media::DataUri;
use crate::model::{ModelBackend, Part};
use crate::schema::{require_text, validate_input, Validate, Violation};

use super::ask_image;

const FLOW: &str = "generate_logo";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GenerateLogoInput {
    /// What the business does and how it wants to come across.
    pub description: String,
}

impl Validate for GenerateLogoInput {
    fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        require_text("description", &self.description, &mut out);
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedLogo {
    pub logo_data_uri: DataUri,
}

fn prompt(description: &str) -> String {
    format!(
        "You are a professional logo designer. Create a clean, minimalist, \
         vector-style logo for this business: {}\n\n\
         - A simple, iconic and memorable symbol\n\
         - Flat colors and clean lines\n\
         - No text or lettering, the symbol only\n\
         - Solid white background\n\
         - Square image",
        description.trim()
    )
}

/// Generates a square, text-free logo.
pub async fn generate_logo<B: ModelBackend>(
    backend: &B,
    config: &StudioConfig,
    input: &GenerateLogoInput,
) -> Result<GeneratedLogo> {
    validate_input(FLOW, input)?;

    let parts = vec![Part::Text(prompt(&input.description))];
    let logo_data_uri = ask_image(backend, FLOW, &config.image_model, parts).await?;
    Ok(GeneratedLogo { logo_data_uri })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BrandError, ErrorCode};
    use crate::model::scripted::ScriptedBackend;

    fn input() -> GenerateLogoInput {
        GenerateLogoInput {
            description: "A vegan bakery in Lisbon".into(),
        }
    }

    #[tokio::test]
    async fn returns_image_from_image_model() {
        let png = DataUri::from_bytes("image/png", &[0x89, b'P', b'N', b'G']);
        let backend = ScriptedBackend::new().media(FLOW, png.clone());

        let logo = generate_logo(&backend, &StudioConfig::default(), &input())
            .await
            .unwrap();
        assert_eq!(logo.logo_data_uri, png);

        let request = &backend.requests()[0];
        assert_eq!(request.model, StudioConfig::default().image_model);
        assert!(request.prompt_text().contains("vegan bakery"));
    }

    #[tokio::test]
    async fn text_only_answer_is_media_missing() {
        let backend = ScriptedBackend::new().text(FLOW, "I cannot draw that.");
        let err = generate_logo(&backend, &StudioConfig::default(), &input())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::MediaMissing);
    }

    #[tokio::test]
    async fn non_image_media_is_media_missing() {
        let backend =
            ScriptedBackend::new().media(FLOW, DataUri::from_bytes("audio/wav", b"RIFF"));
        let err = generate_logo(&backend, &StudioConfig::default(), &input())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::MediaMissing);
        assert!(err.message.contains("audio/wav"));
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let backend =
            ScriptedBackend::new().fail(FLOW, BrandError::remote_call_failed("connection reset"));
        let err = generate_logo(&backend, &StudioConfig::default(), &input())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RemoteCallFailed);
    }

    #[tokio::test]
    async fn blank_description_is_invalid_input() {
        let backend = ScriptedBackend::new();
        let err = generate_logo(
            &backend,
            &StudioConfig::default(),
            &GenerateLogoInput {
                description: "\n".into(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(err.violations[0].field, "description");
    }
}
