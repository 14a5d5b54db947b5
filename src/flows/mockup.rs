//! Photorealistic mockups of a finished asset.

use serde::{Deserialize, Serialize};

use crate::brand::AssetType;
use crate::config::StudioConfig;
use crate::error::Result;
use crate::media::DataUri;
use crate::model::{ModelBackend, Part};
use crate::schema::{require_text, validate_input, Validate, Violation};

use super::{ask_image, image_part, require_image_uri};

const FLOW: &str = "mockup";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MockupInput {
    /// The asset to stage, as an image data URI.
    pub asset_data_uri: String,
    pub asset_type: AssetType,
    pub business_type: String,
}

impl Validate for MockupInput {
    fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        require_image_uri("assetDataUri", &self.asset_data_uri, &mut out);
        require_text("businessType", &self.business_type, &mut out);
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mockup {
    pub mockup_data_uri: DataUri,
}

/// Scene description used to stage an asset of the given type.
pub fn mockup_scene(asset_type: &AssetType, business_type: &str) -> String {
    let business = business_type.trim();
    match asset_type {
        AssetType::BusinessCard => format!(
            "A photorealistic mockup of the provided business card lying on a \
             stylish, modern desk that suits a '{}' business, with a laptop, a cup \
             of coffee and a plant nearby. Professional lighting draws the eye to \
             the card.",
            business
        ),
        AssetType::InstagramPost => format!(
            "A photorealistic mockup of a person holding a smartphone whose screen \
             shows the provided social media post. The person and the background \
             fit a '{}' business. Clean, bright and engaging.",
            business
        ),
        AssetType::BusinessFlyer => format!(
            "A photorealistic mockup of the provided flyer pinned to a wall or \
             bulletin board somewhere a '{}' business would advertise. The setting \
             looks natural and professional.",
            business
        ),
        AssetType::InstagramStory => format!(
            "A photorealistic mockup of a hand holding a smartphone that clearly \
             shows the provided story on screen. Hand and background match the \
             vibe of a '{}' business, with the focus on the screen.",
            business
        ),
        AssetType::Other(_) => format!(
            "A photorealistic mockup of the provided image shown in a clean, modern, \
             professional setting relevant to a '{}' business. Soft lighting and a \
             pleasing composition.",
            business
        ),
    }
}

/// Stages an asset in a realistic scene.
pub async fn mockup<B: ModelBackend>(
    backend: &B,
    config: &StudioConfig,
    input: &MockupInput,
) -> Result<Mockup> {
    validate_input(FLOW, input)?;

    let parts = vec![
        Part::Text(mockup_scene(&input.asset_type, &input.business_type)),
        image_part(&input.asset_data_uri)?,
    ];
    let mockup_data_uri = ask_image(backend, FLOW, &config.image_model, parts).await?;
    Ok(Mockup { mockup_data_uri })
}
