//! BrandProfile: the palette, typography and tone extracted from a logo.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::{BrandError, ErrorCode, Result};
use crate::schema::{require_hex_color, Schema, Validate, Violation};

/// Fewest colors a palette may hold.
pub const MIN_PALETTE_LEN: usize = 5;

/// Most colors a palette may hold.
pub const MAX_PALETTE_LEN: usize = 10;

/// Typography family recommended for a brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FontStyle {
    #[default]
    SansSerif,
    Serif,
    Display,
    Handwriting,
    Monospace,
}

impl FontStyle {
    /// Wire names, in declaration order.
    pub const NAMES: &'static [&'static str] =
        &["sans-serif", "serif", "display", "handwriting", "monospace"];

    pub fn as_str(&self) -> &'static str {
        match self {
            FontStyle::SansSerif => "sans-serif",
            FontStyle::Serif => "serif",
            FontStyle::Display => "display",
            FontStyle::Handwriting => "handwriting",
            FontStyle::Monospace => "monospace",
        }
    }

    /// Parses a font style, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sans-serif" | "sans" => Some(FontStyle::SansSerif),
            "serif" => Some(FontStyle::Serif),
            "display" => Some(FontStyle::Display),
            "handwriting" | "script" => Some(FontStyle::Handwriting),
            "monospace" | "mono" => Some(FontStyle::Monospace),
            _ => None,
        }
    }

    /// A free Google Font matching the style.
    pub fn suggested_font(&self) -> &'static str {
        match self {
            FontStyle::SansSerif => "Inter",
            FontStyle::Serif => "Merriweather",
            FontStyle::Display => "Playfair Display",
            FontStyle::Handwriting => "Caveat",
            FontStyle::Monospace => "JetBrains Mono",
        }
    }

    /// CSS `font-family` value with a generic fallback.
    pub fn css_font_stack(&self) -> String {
        let generic = match self {
            FontStyle::SansSerif => "sans-serif",
            FontStyle::Serif | FontStyle::Display => "serif",
            FontStyle::Handwriting => "cursive",
            FontStyle::Monospace => "monospace",
        };
        format!("'{}', {}", self.suggested_font(), generic)
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Voice and personality of a brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BrandTone {
    #[default]
    Modern,
    Playful,
    Minimal,
    Elegant,
    Corporate,
}

impl BrandTone {
    /// Wire names, in declaration order.
    pub const NAMES: &'static [&'static str] =
        &["modern", "playful", "minimal", "elegant", "corporate"];

    pub fn as_str(&self) -> &'static str {
        match self {
            BrandTone::Modern => "modern",
            BrandTone::Playful => "playful",
            BrandTone::Minimal => "minimal",
            BrandTone::Elegant => "elegant",
            BrandTone::Corporate => "corporate",
        }
    }

    /// Parses a tone, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "modern" => Some(BrandTone::Modern),
            "playful" => Some(BrandTone::Playful),
            "minimal" => Some(BrandTone::Minimal),
            "elegant" => Some(BrandTone::Elegant),
            "corporate" => Some(BrandTone::Corporate),
            _ => None,
        }
    }
}

impl fmt::Display for BrandTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A business's visual identity.
///
/// The first palette entry is the primary brand color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandProfile {
    pub color_palette: Vec<String>,
    pub font_style: FontStyle,
    pub brand_tone: BrandTone,
}

impl BrandProfile {
    /// Response schema for brand extraction.
    pub fn schema() -> Schema {
        Schema::Object(vec![
            (
                "colorPalette",
                Schema::array(Schema::HexColor, MIN_PALETTE_LEN, Some(MAX_PALETTE_LEN)),
            ),
            ("fontStyle", Schema::Enum(FontStyle::NAMES)),
            ("brandTone", Schema::Enum(BrandTone::NAMES)),
        ])
    }

    /// The primary brand color, if the palette is non-empty.
    pub fn primary(&self) -> Option<&str> {
        self.color_palette.first().map(String::as_str)
    }

    /// Replaces one palette entry with a user-chosen color.
    ///
    /// The color is stored in canonical `#RRGGBB` form.
    pub fn set_color(&mut self, index: usize, color: &str) -> Result<()> {
        let rgb = Rgb::parse_hex(color)?;
        let len = self.color_palette.len();
        let slot = self.color_palette.get_mut(index).ok_or_else(|| {
            BrandError::new(
                ErrorCode::InvalidInput,
                format!("Palette index {} out of range (palette has {} colors)", index, len),
            )
        })?;
        *slot = rgb.to_hex();
        Ok(())
    }

    pub(crate) fn collect_violations(&self, prefix: &str, out: &mut Vec<Violation>) {
        let field = |name: &str| {
            if prefix.is_empty() {
                name.to_string()
            } else {
                format!("{}.{}", prefix, name)
            }
        };

        let palette = field("colorPalette");
        let len = self.color_palette.len();
        if !(MIN_PALETTE_LEN..=MAX_PALETTE_LEN).contains(&len) {
            out.push(Violation::new(
                palette.clone(),
                format!(
                    "expected {}-{} colors, got {}",
                    MIN_PALETTE_LEN, MAX_PALETTE_LEN, len
                ),
            ));
        }
        for (i, color) in self.color_palette.iter().enumerate() {
            require_hex_color(&format!("{}[{}]", palette, i), color, out);
        }
    }
}

impl Validate for BrandProfile {
    fn violations(&self) -> Vec<Violation> {
        let mut out = Vec::new();
        self.collect_violations("", &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brand::fixtures::sample_profile;
    use serde_json::json;

    #[test]
    fn font_style_parsing() {
        assert_eq!(FontStyle::parse("Sans-Serif"), Some(FontStyle::SansSerif));
        assert_eq!(FontStyle::parse("mono"), Some(FontStyle::Monospace));
        assert_eq!(FontStyle::parse("gothic"), None);
        for name in FontStyle::NAMES {
            assert_eq!(FontStyle::parse(name).unwrap().as_str(), *name);
        }
    }

    #[test]
    fn brand_tone_parsing() {
        assert_eq!(BrandTone::parse("ELEGANT"), Some(BrandTone::Elegant));
        assert_eq!(BrandTone::parse("grumpy"), None);
        for name in BrandTone::NAMES {
            assert_eq!(BrandTone::parse(name).unwrap().as_str(), *name);
        }
    }

    #[test]
    fn serializes_with_camel_case_and_kebab_values() {
        let value = serde_json::to_value(sample_profile()).unwrap();
        assert_eq!(value["fontStyle"], "sans-serif");
        assert_eq!(value["brandTone"], "modern");
        assert_eq!(value["colorPalette"][0], "#1D4ED8");
    }

    #[test]
    fn schema_accepts_serialized_profile() {
        let value = serde_json::to_value(sample_profile()).unwrap();
        assert!(BrandProfile::schema().check(&value).is_empty());
    }

    #[test]
    fn schema_rejects_short_palette_and_bad_enum() {
        let value = json!({
            "colorPalette": ["#000000"],
            "fontStyle": "gothic",
            "brandTone": "modern",
        });
        let fields: Vec<String> = BrandProfile::schema()
            .check(&value)
            .into_iter()
            .map(|v| v.field)
            .collect();
        assert_eq!(fields, vec!["colorPalette", "fontStyle"]);
    }

    #[test]
    fn set_color_canonicalizes() {
        let mut profile = sample_profile();
        profile.set_color(1, "abcdef").unwrap();
        assert_eq!(profile.color_palette[1], "#ABCDEF");
    }

    #[test]
    fn set_color_rejects_bad_input() {
        let mut profile = sample_profile();
        assert_eq!(
            profile.set_color(0, "blue").unwrap_err().code,
            ErrorCode::InvalidColor
        );
        assert_eq!(
            profile.set_color(42, "#000000").unwrap_err().code,
            ErrorCode::InvalidInput
        );
    }

    #[test]
    fn validate_reports_each_bad_color() {
        let mut profile = sample_profile();
        profile.color_palette[2] = "nope".into();
        profile.color_palette[4] = "#12345".into();
        let fields: Vec<String> = profile.violations().into_iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["colorPalette[2]", "colorPalette[4]"]);
    }

    #[test]
    fn css_font_stack_has_fallback() {
        assert_eq!(FontStyle::Monospace.css_font_stack(), "'JetBrains Mono', monospace");
    }
}
