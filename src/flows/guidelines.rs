//! Brand guidelines document.

use serde::{Deserialize, Serialize};

use crate::brand::BrandProfile;
use crate::config::StudioConfig;
use crate::error::{BrandError, Result};
use crate::model::{ModelBackend, Part};
use crate::schema::{require_text, validate_input, Schema, Validate, Violation};

use super::{ask_json, image_part, require_image_uri};

const FLOW: &str = "brand_guidelines";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BrandGuidelinesInput {
    pub brand_info: BrandProfile,
    pub logo_data_uri: String,
    pub business_type: String,
}

impl Validate for BrandGuidelinesInput {
    fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        self.brand_info.collect_violations("brandInfo", &mut out);
        require_image_uri("logoDataUri", &self.logo_data_uri, &mut out);
        require_text("businessType", &self.business_type, &mut out);
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandGuidelines {
    /// Self-contained HTML document with inline styles.
    pub guidelines_html: String,
}

impl BrandGuidelines {
    fn schema() -> Schema {
        Schema::Object(vec![("guidelinesHtml", Schema::Text)])
    }
}

fn prompt(input: &BrandGuidelinesInput) -> String {
    let info = &input.brand_info;
    format!(
        "You are a brand strategist and designer. Write a complete brand \
         guidelines document as a single self-contained HTML page.\n\n\
         Color palette: {palette}\n\
         Typography style: {font} (recommend a free Google Font such as {suggested})\n\
         Brand tone: {tone}\n\
         Business type: {business}\n\n\
         Requirements:\n\
         - Inline CSS only. No <style> blocks and no external resources.\n\
         - Semantic structure with h1, h2, p and div elements.\n\
         - Logo section: show the attached logo embedded as a data URI and \
         explain clear-space usage.\n\
         - Color section: one swatch per palette color with its HEX code below it.\n\
         - Typography section: the recommended font with a sample headline and \
         body paragraph.\n\
         - Tone section: describe the tone with examples of applying it in copy.\n\n\
         Put the full HTML in guidelinesHtml.",
        palette = info.color_palette.join(", "),
        font = info.font_style,
        suggested = info.font_style.suggested_font(),
        tone = info.brand_tone,
        business = input.business_type.trim(),
    )
}

/// Produces an HTML brand guidelines document.
pub async fn brand_guidelines<B: ModelBackend>(
    backend: &B,
    config: &StudioConfig,
    input: &BrandGuidelinesInput,
) -> Result<BrandGuidelines> {
    validate_input(FLOW, input)?;

    let parts = vec![Part::Text(prompt(input)), image_part(&input.logo_data_uri)?];
    let guidelines: BrandGuidelines = ask_json(
        backend,
        FLOW,
        &config.text_model,
        parts,
        BrandGuidelines::schema(),
    )
    .await?;

    if !guidelines.guidelines_html.contains('<') {
        return Err(BrandError::schema_mismatch(
            FLOW,
            vec![Violation::new("guidelinesHtml", "does not contain HTML markup")],
        ));
    }
    Ok(guidelines)
}
