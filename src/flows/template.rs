//! Applying a brand to a catalog template.
//!
//! No model call is involved. The customized template is addressed by a URL
//! that carries the primary color, font style and tone as query parameters.

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::brand::{find_template, BrandTone, FontStyle, TEMPLATES};
use crate::color::Rgb;
use crate::config::StudioConfig;
use crate::error::{BrandError, Result};
use crate::schema::{validate_input, Validate, Violation};

use super::require_palette;

const FLOW: &str = "apply_brand_to_template";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ApplyTemplateInput {
    pub template_id: String,
    pub color_palette: Vec<String>,
    pub font_style: FontStyle,
    pub brand_tone: BrandTone,
}

impl Validate for ApplyTemplateInput {
    fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        if find_template(&self.template_id).is_none() {
            let known: Vec<&str> = TEMPLATES.iter().map(|t| t.id).collect();
            out.push(Violation::new(
                "templateId",
                format!(
                    "unknown template {:?} (known: {})",
                    self.template_id,
                    known.join(", ")
                ),
            ));
        }
        require_palette("colorPalette", &self.color_palette, &mut out);
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizedTemplate {
    pub customized_template_url: String,
}

/// Builds the link to a template customized with the brand.
pub fn apply_brand_to_template(
    config: &StudioConfig,
    input: &ApplyTemplateInput,
) -> Result<CustomizedTemplate> {
    validate_input(FLOW, input)?;

    let primary = Rgb::parse_hex(&input.color_palette[0])?.to_hex();
    let base = Url::parse(&config.template_base_url).map_err(|e| {
        BrandError::config_invalid(format!(
            "template_base_url {:?} is not a URL: {}",
            config.template_base_url, e
        ))
    })?;
    let mut url = base.join(&input.template_id).map_err(|e| {
        BrandError::config_invalid(format!("cannot join template id onto base URL: {}", e))
    })?;
    url.query_pairs_mut()
        .append_pair("color", &primary)
        .append_pair("font", input.font_style.as_str())
        .append_pair("tone", input.brand_tone.as_str());

    tracing::debug!(template = %input.template_id, url = %url, "template customized");
    Ok(CustomizedTemplate {
        customized_template_url: url.into(),
    })
}
