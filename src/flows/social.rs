//! Social media copy: post captions and profile headers.

use serde::{Deserialize, Serialize};

use crate::brand::BrandTone;
use crate::config::StudioConfig;
use crate::error::Result;
use crate::model::{ModelBackend, Part};
use crate::schema::{require_text, validate_input, Schema, Validate, Violation};

use super::{ask_json, image_part, require_image_uri};

const POSTS_FLOW: &str = "social_posts";
const HEADERS_FLOW: &str = "social_headers";

/// Most header suggestions a single call returns.
pub const MAX_HEADER_SUGGESTIONS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SocialPostsInput {
    pub logo_data_uri: String,
    pub business_type: String,
    pub brand_tone: BrandTone,
}

impl Validate for SocialPostsInput {
    fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        require_image_uri("logoDataUri", &self.logo_data_uri, &mut out);
        require_text("businessType", &self.business_type, &mut out);
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialPosts {
    pub post_suggestions: Vec<String>,
}

impl SocialPosts {
    fn schema() -> Schema {
        Schema::Object(vec![(
            "postSuggestions",
            Schema::array(Schema::Text, 1, None),
        )])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SocialHeadersInput {
    pub logo_data_uri: String,
    pub business_type: String,
}

impl Validate for SocialHeadersInput {
    fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        require_image_uri("logoDataUri", &self.logo_data_uri, &mut out);
        require_text("businessType", &self.business_type, &mut out);
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialHeaders {
    pub header_suggestions: Vec<String>,
}

impl SocialHeaders {
    fn schema() -> Schema {
        Schema::Object(vec![(
            "headerSuggestions",
            Schema::array(Schema::Text, 1, Some(MAX_HEADER_SUGGESTIONS)),
        )])
    }
}

/// Writes 3-5 post captions in the brand's tone.
pub async fn social_posts<B: ModelBackend>(
    backend: &B,
    config: &StudioConfig,
    input: &SocialPostsInput,
) -> Result<SocialPosts> {
    validate_input(POSTS_FLOW, input)?;

    let prompt = format!(
        "You are a social media marketer who builds strong brand identities. \
         Write 3 to 5 post captions for a {business} business whose brand tone \
         is {tone}. Match the personality of the attached logo and add fitting \
         hashtags and emojis.\n\nReturn the captions as postSuggestions.",
        business = input.business_type.trim(),
        tone = input.brand_tone,
    );
    let parts = vec![Part::Text(prompt), image_part(&input.logo_data_uri)?];
    ask_json(
        backend,
        POSTS_FLOW,
        &config.text_model,
        parts,
        SocialPosts::schema(),
    )
    .await
}

/// Suggests up to five profile header concepts that fit the logo.
pub async fn social_headers<B: ModelBackend>(
    backend: &B,
    config: &StudioConfig,
    input: &SocialHeadersInput,
) -> Result<SocialHeaders> {
    validate_input(HEADERS_FLOW, input)?;

    let prompt = format!(
        "You are a social media designer. Suggest engaging, visually appealing \
         profile header concepts for a {business} business that stay cohesive \
         with the attached logo. Give at most {max} suggestions as headerSuggestions.",
        business = input.business_type.trim(),
        max = MAX_HEADER_SUGGESTIONS,
    );
    let parts = vec![Part::Text(prompt), image_part(&input.logo_data_uri)?];
    ask_json(
        backend,
        HEADERS_FLOW,
        &config.text_model,
        parts,
        SocialHeaders::schema(),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brand::fixtures::SAMPLE_LOGO;
    use crate::error::ErrorCode;
    use crate::model::scripted::ScriptedBackend;
    use serde_json::json;

    fn posts_input() -> SocialPostsInput {
        SocialPostsInput {
            logo_data_uri: SAMPLE_LOGO.into(),
            business_type: "Fitness".into(),
            brand_tone: BrandTone::Playful,
        }
    }

    fn headers_input() -> SocialHeadersInput {
        SocialHeadersInput {
            logo_data_uri: SAMPLE_LOGO.into(),
            business_type: "Fitness".into(),
        }
    }

    #[tokio::test]
    async fn posts_use_requested_tone() {
        let backend = ScriptedBackend::new().json(
            POSTS_FLOW,
            json!({ "postSuggestions": ["Sweat now, smile later! 💪 #gym", "Leg day? Yay! 🦵"] }),
        );

        let posts = social_posts(&backend, &StudioConfig::default(), &posts_input())
            .await
            .unwrap();
        assert_eq!(posts.post_suggestions.len(), 2);
        assert!(backend.requests()[0].prompt_text().contains("playful"));
    }

    #[tokio::test]
    async fn empty_post_list_is_schema_mismatch() {
        let backend = ScriptedBackend::new().json(POSTS_FLOW, json!({ "postSuggestions": [] }));
        let err = social_posts(&backend, &StudioConfig::default(), &posts_input())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SchemaMismatch);
        assert_eq!(err.violations[0].field, "postSuggestions");
    }

    #[tokio::test]
    async fn headers_are_capped_at_five() {
        let backend = ScriptedBackend::new().json(
            HEADERS_FLOW,
            json!({ "headerSuggestions": ["a", "b", "c", "d", "e", "f"] }),
        );
        let err = social_headers(&backend, &StudioConfig::default(), &headers_input())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SchemaMismatch);
        assert!(err.violations[0].reason.contains("at most 5"));
    }

    #[tokio::test]
    async fn headers_return_suggestions() {
        let backend = ScriptedBackend::new().json(
            HEADERS_FLOW,
            json!({ "headerSuggestions": ["Morning run skyline", "Bold type on chalk"] }),
        );
        let headers = social_headers(&backend, &StudioConfig::default(), &headers_input())
            .await
            .unwrap();
        assert_eq!(headers.header_suggestions[1], "Bold type on chalk");
    }

    #[test]
    fn posts_input_requires_known_tone() {
        let parsed: std::result::Result<SocialPostsInput, _> = serde_json::from_value(json!({
            "logoDataUri": SAMPLE_LOGO,
            "businessType": "Food",
            "brandTone": "grumpy",
        }));
        assert!(parsed.is_err());
    }
}
