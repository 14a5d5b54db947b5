//! Brand extraction from a logo.

use serde::{Deserialize, Serialize};

use crate::brand::{BrandProfile, BrandTone, FontStyle, MAX_PALETTE_LEN, MIN_PALETTE_LEN};
use crate::color::Rgb;
use crate::config::StudioConfig;
use crate::error::Result;
use crate::model::{ModelBackend, Part};
use crate::schema::{require_text, validate_input, Validate, Violation};

use super::{ask_json, image_part, require_image_uri};

const FLOW: &str = "extract_brand";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExtractBrandInput {
    /// The logo as `data:<mime>;base64,<payload>`.
    pub logo_data_uri: String,
    /// Kind of business, e.g. "Food" or "Fitness".
    pub business_type: String,
}

impl Validate for ExtractBrandInput {
    fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        require_image_uri("logoDataUri", &self.logo_data_uri, &mut out);
        require_text("businessType", &self.business_type, &mut out);
        out
    }
}

fn prompt(input: &ExtractBrandInput) -> String {
    format!(
        "You are a senior branding consultant. Derive a cohesive brand identity \
         from the attached logo for a {business} business.\n\n\
         1. colorPalette: {min} to {max} colors taken from the logo, most dominant \
         first so it can serve as the primary brand color. Every color is a \
         6-digit hex code such as \"#1A2B3C\".\n\
         2. fontStyle: the single best match among {fonts}.\n\
         3. brandTone: the single best match among {tones}.\n\n\
         Answer only with JSON that follows the response schema.",
        business = input.business_type.trim(),
        min = MIN_PALETTE_LEN,
        max = MAX_PALETTE_LEN,
        fonts = FontStyle::NAMES.join(", "),
        tones = BrandTone::NAMES.join(", "),
    )
}

/// Extracts palette, font style and tone from a logo.
///
/// Palette colors come back in canonical uppercase `#RRGGBB` form.
pub async fn extract_brand<B: ModelBackend>(
    backend: &B,
    config: &StudioConfig,
    input: &ExtractBrandInput,
) -> Result<BrandProfile> {
    validate_input(FLOW, input)?;

    let parts = vec![Part::Text(prompt(input)), image_part(&input.logo_data_uri)?];
    let mut profile: BrandProfile =
        ask_json(backend, FLOW, &config.text_model, parts, BrandProfile::schema()).await?;

    for color in &mut profile.color_palette {
        *color = Rgb::parse_hex(color)?.to_hex();
    }
    Ok(profile)
}
