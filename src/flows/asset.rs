//! Branded asset images such as business cards and flyers.

use serde::{Deserialize, Serialize};

use crate::brand::{AssetType, BrandTone, FontStyle};
use crate::config::StudioConfig;
use crate::error::Result;
use crate::media::DataUri;
use crate::model::{ModelBackend, Part};
use crate::schema::{require_text, validate_input, Validate, Violation};

use super::{ask_image, require_palette};

const FLOW: &str = "branded_asset";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BrandedAssetInput {
    pub asset_type: AssetType,
    pub color_palette: Vec<String>,
    pub font_style: FontStyle,
    pub brand_tone: BrandTone,
    pub business_type: String,
}

impl Validate for BrandedAssetInput {
    fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        require_text("assetType", self.asset_type.name(), &mut out);
        require_palette("colorPalette", &self.color_palette, &mut out);
        require_text("businessType", &self.business_type, &mut out);
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandedAsset {
    pub asset_data_uri: DataUri,
}

fn prompt(input: &BrandedAssetInput) -> String {
    let mut prompt = format!(
        "You are a professional designer creating a branded {asset}.\n\n\
         Business type: {business}\n\
         Color palette: {palette}\n\
         Font style: {font} (for example {suggested})\n\
         Brand tone: {tone}\n\n\
         Design a clean, modern {asset} that suits the business. Keep every \
         piece of text legible and use the palette deliberately, primary color \
         first.",
        asset = input.asset_type,
        business = input.business_type.trim(),
        palette = input.color_palette.join(", "),
        font = input.font_style,
        suggested = input.font_style.suggested_font(),
        tone = input.brand_tone,
    );
    if input.asset_type == AssetType::BusinessCard {
        prompt.push_str(
            " Include placeholder text for a name, job title, phone number and email.",
        );
    }
    prompt
}

/// Renders a branded asset image in the brand's palette and typography.
pub async fn branded_asset<B: ModelBackend>(
    backend: &B,
    config: &StudioConfig,
    input: &BrandedAssetInput,
) -> Result<BrandedAsset> {
    validate_input(FLOW, input)?;

    let parts = vec![Part::Text(prompt(input))];
    let asset_data_uri = ask_image(backend, FLOW, &config.image_model, parts).await?;
    Ok(BrandedAsset { asset_data_uri })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brand::fixtures::sample_profile;
    use crate::error::ErrorCode;
    use crate::model::scripted::ScriptedBackend;

    fn input(asset_type: AssetType) -> BrandedAssetInput {
        let profile = sample_profile();
        BrandedAssetInput {
            asset_type,
            color_palette: profile.color_palette,
            font_style: profile.font_style,
            brand_tone: profile.brand_tone,
            business_type: "Law Firm".into(),
        }
    }

    #[test]
    fn business_card_prompt_asks_for_contact_placeholders() {
        let card = prompt(&input(AssetType::BusinessCard));
        assert!(card.contains("Business Card"));
        assert!(card.contains("#1D4ED8, #F59E0B"));
        assert!(card.contains("phone number"));

        let flyer = prompt(&input(AssetType::BusinessFlyer));
        assert!(!flyer.contains("phone number"));
    }

    #[tokio::test]
    async fn returns_generated_image() {
        let image = DataUri::from_bytes("image/jpeg", &[0xFF, 0xD8]);
        let backend = ScriptedBackend::new().media(FLOW, image.clone());

        let asset = branded_asset(
            &backend,
            &StudioConfig::default(),
            &input(AssetType::InstagramPost),
        )
        .await
        .unwrap();
        assert_eq!(asset.asset_data_uri, image);
    }

    #[tokio::test]
    async fn bad_palette_and_blank_type_are_reported_together() {
        let backend = ScriptedBackend::new();
        let mut bad = input(AssetType::Other(" ".into()));
        bad.color_palette = vec!["#ZZZZZZ".into()];

        let err = branded_asset(&backend, &StudioConfig::default(), &bad)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        let fields: Vec<&str> = err.violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["assetType", "colorPalette[0]"]);
    }
}
