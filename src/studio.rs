//! Studio: the entry point that ties flows to a model backend.
//!
//! A [`Studio`] owns one backend and the configuration every flow reads its
//! model names from. It adds the brand kit, which combines several flows.

use serde::{Deserialize, Serialize};

use crate::brand::BrandProfile;
use crate::config::StudioConfig;
use crate::error::Result;
use crate::flows::{
    self, ApplyTemplateInput, BrandChatAnswer, BrandChatInput, BrandGuidelines,
    BrandGuidelinesInput, BrandedAsset, BrandedAssetInput, CustomizedTemplate,
    ExtractBrandInput, GenerateLogoInput, GeneratedLogo, Jingle, JingleInput, Mockup,
    MockupInput, SocialHeaders, SocialHeadersInput, SocialPosts, SocialPostsInput,
};
use crate::model::{GeminiClient, ModelBackend};
use crate::schema::{validate_input, Validate, Violation};
use crate::theme::{Theme, ThemeDeclaration};

/// Input for a full brand kit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BrandKitInput {
    pub logo_data_uri: String,
    pub business_type: String,
}

impl Validate for BrandKitInput {
    fn violations(&self) -> Vec<Violation> {
        ExtractBrandInput {
            logo_data_uri: self.logo_data_uri.clone(),
            business_type: self.business_type.clone(),
        }
        .violations()
    }
}

/// Everything generated from one logo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandKit {
    pub brand_info: BrandProfile,
    pub post_suggestions: Vec<String>,
    pub header_suggestions: Vec<String>,
    pub theme: ThemeDeclaration,
}

/// Flows bound to a backend and configuration.
pub struct Studio<B> {
    backend: B,
    config: StudioConfig,
}

impl Studio<GeminiClient> {
    /// Creates a studio talking to the Gemini API.
    pub fn from_config(config: StudioConfig) -> Result<Self> {
        let backend = GeminiClient::new(&config)?;
        Ok(Self::new(backend, config))
    }
}

impl<B: ModelBackend> Studio<B> {
    pub fn new(backend: B, config: StudioConfig) -> Self {
        Self { backend, config }
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    pub async fn extract_brand(&self, input: &ExtractBrandInput) -> Result<BrandProfile> {
        flows::extract_brand(&self.backend, &self.config, input).await
    }

    pub async fn social_posts(&self, input: &SocialPostsInput) -> Result<SocialPosts> {
        flows::social_posts(&self.backend, &self.config, input).await
    }

    pub async fn social_headers(&self, input: &SocialHeadersInput) -> Result<SocialHeaders> {
        flows::social_headers(&self.backend, &self.config, input).await
    }

    pub async fn generate_logo(&self, input: &GenerateLogoInput) -> Result<GeneratedLogo> {
        flows::generate_logo(&self.backend, &self.config, input).await
    }

    pub async fn branded_asset(&self, input: &BrandedAssetInput) -> Result<BrandedAsset> {
        flows::branded_asset(&self.backend, &self.config, input).await
    }

    pub async fn mockup(&self, input: &MockupInput) -> Result<Mockup> {
        flows::mockup(&self.backend, &self.config, input).await
    }

    pub async fn brand_guidelines(
        &self,
        input: &BrandGuidelinesInput,
    ) -> Result<BrandGuidelines> {
        flows::brand_guidelines(&self.backend, &self.config, input).await
    }

    pub async fn jingle(&self, input: &JingleInput) -> Result<Jingle> {
        flows::jingle(&self.backend, &self.config, input).await
    }

    pub async fn brand_chat(&self, input: &BrandChatInput) -> Result<BrandChatAnswer> {
        flows::brand_chat(&self.backend, &self.config, input).await
    }

    pub fn apply_template(&self, input: &ApplyTemplateInput) -> Result<CustomizedTemplate> {
        flows::apply_brand_to_template(&self.config, input)
    }

    /// Builds a brand kit from a logo.
    ///
    /// Brand extraction and header suggestions run concurrently; post
    /// captions follow once the tone is known. Any failure fails the whole
    /// kit and nothing partial is returned.
    pub async fn brand_kit(&self, input: &BrandKitInput) -> Result<BrandKit> {
        validate_input("brand_kit", input)?;
        tracing::info!(business = %input.business_type, "building brand kit");

        let extract_input = ExtractBrandInput {
            logo_data_uri: input.logo_data_uri.clone(),
            business_type: input.business_type.clone(),
        };
        let headers_input = SocialHeadersInput {
            logo_data_uri: input.logo_data_uri.clone(),
            business_type: input.business_type.clone(),
        };

        let (brand_info, headers) = tokio::try_join!(
            self.extract_brand(&extract_input),
            self.social_headers(&headers_input),
        )?;

        let posts = self
            .social_posts(&SocialPostsInput {
                logo_data_uri: input.logo_data_uri.clone(),
                business_type: input.business_type.clone(),
                brand_tone: brand_info.brand_tone,
            })
            .await?;

        let theme = Theme::from_profile(&brand_info).declaration();
        Ok(BrandKit {
            brand_info,
            post_suggestions: posts.post_suggestions,
            header_suggestions: headers.header_suggestions,
            theme,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brand::fixtures::SAMPLE_LOGO;
    use crate::brand::BrandTone;
    use crate::error::{BrandError, ErrorCode};
    use crate::model::scripted::ScriptedBackend;
    use crate::model::{ModelRequest, ModelResponse};
    use serde_json::json;
    use std::time::Duration;
    use tokio::sync::Barrier;

    fn kit_input() -> BrandKitInput {
        BrandKitInput {
            logo_data_uri: SAMPLE_LOGO.into(),
            business_type: "Yoga Studio".into(),
        }
    }

    fn scripted_kit() -> ScriptedBackend {
        ScriptedBackend::new()
            .json(
                "extract_brand",
                json!({
                    "colorPalette": ["#7C3AED", "#F472B6", "#FDF4FF", "#1E1B4B", "#A7F3D0"],
                    "fontStyle": "display",
                    "brandTone": "playful",
                }),
            )
            .json(
                "social_headers",
                json!({ "headerSuggestions": ["Sunrise flow", "Breathe in color"] }),
            )
            .json(
                "social_posts",
                json!({ "postSuggestions": ["Stretch into the weekend! 🧘"] }),
            )
    }

    /// Holds extraction and header calls until both have arrived.
    struct RendezvousBackend {
        barrier: Barrier,
        inner: ScriptedBackend,
    }

    impl ModelBackend for RendezvousBackend {
        async fn generate(&self, request: ModelRequest) -> Result<ModelResponse> {
            if matches!(request.flow, "extract_brand" | "social_headers") {
                self.barrier.wait().await;
            }
            self.inner.generate(request).await
        }
    }

    #[tokio::test]
    async fn brand_kit_combines_flows() {
        let studio = Studio::new(scripted_kit(), StudioConfig::default());
        let kit = studio.brand_kit(&kit_input()).await.unwrap();

        assert_eq!(kit.brand_info.brand_tone, BrandTone::Playful);
        assert_eq!(kit.header_suggestions.len(), 2);
        assert_eq!(kit.post_suggestions, vec!["Stretch into the weekend! 🧘"]);
        assert_eq!(kit.theme.variables["primary"], "262 83% 58%");
    }

    #[tokio::test]
    async fn posts_use_extracted_tone() {
        let studio = Studio::new(scripted_kit(), StudioConfig::default());
        studio.brand_kit(&kit_input()).await.unwrap();

        let posts = studio.backend.requests_for("social_posts");
        assert_eq!(posts.len(), 1);
        assert!(posts[0].prompt_text().contains("playful"));
    }

    #[tokio::test]
    async fn extraction_and_headers_run_concurrently() {
        let backend = RendezvousBackend {
            barrier: Barrier::new(2),
            inner: scripted_kit(),
        };
        let studio = Studio::new(backend, StudioConfig::default());

        let kit = tokio::time::timeout(Duration::from_secs(5), studio.brand_kit(&kit_input()))
            .await
            .expect("extraction and headers were not issued together")
            .unwrap();
        assert_eq!(kit.header_suggestions[0], "Sunrise flow");
    }

    #[tokio::test]
    async fn any_failure_fails_the_whole_kit() {
        let backend = ScriptedBackend::new()
            .json(
                "extract_brand",
                json!({
                    "colorPalette": ["#000000", "#111111", "#222222", "#333333", "#444444"],
                    "fontStyle": "serif",
                    "brandTone": "minimal",
                }),
            )
            .fail(
                "social_headers",
                BrandError::remote_call_failed("quota exceeded"),
            );
        let studio = Studio::new(backend, StudioConfig::default());

        let err = studio.brand_kit(&kit_input()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RemoteCallFailed);
        assert!(studio.backend.requests_for("social_posts").is_empty());
    }

    #[tokio::test]
    async fn invalid_kit_input_makes_no_calls() {
        let studio = Studio::new(ScriptedBackend::new(), StudioConfig::default());
        let err = studio
            .brand_kit(&BrandKitInput {
                logo_data_uri: "".into(),
                business_type: "".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert!(studio.backend.requests().is_empty());
    }

    #[test]
    fn from_config_requires_api_key() {
        assert_eq!(
            Studio::from_config(StudioConfig::default()).err().map(|e| e.code),
            Some(ErrorCode::ConfigInvalid)
        );
    }
}
