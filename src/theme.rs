//! Theme derivation from a brand profile.
//!
//! The theme is a plain value computed from the profile. Clients apply the
//! returned declaration through their own styling layer; a new profile
//! produces a new declaration that replaces the previous one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::brand::{BrandProfile, FontStyle};
use crate::color::{hex_to_hsl, Hsl};

/// Primary color used when the palette has no usable first entry.
pub const DEFAULT_PRIMARY: &str = "#4F46E5";

/// Background used when the palette has no usable third entry.
pub const DEFAULT_BACKGROUND: &str = "#F5F5F5";

/// Lightness above which text on a color should be dark.
const LIGHT_SURFACE_THRESHOLD: u8 = 60;

/// Resolved theme colors and typography.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub primary: Hsl,
    pub accent: Hsl,
    pub background: Hsl,
    pub font_style: FontStyle,
}

/// Serializable form of a [`Theme`]: the CSS custom properties plus a ready
/// `:root` block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeDeclaration {
    pub variables: BTreeMap<String, String>,
    pub css: String,
}

impl Theme {
    /// Derives the theme for a profile.
    ///
    /// Primary is the first palette color, accent the second (else primary),
    /// background the third. Malformed or missing entries fall back to
    /// defaults instead of failing.
    pub fn from_profile(profile: &BrandProfile) -> Self {
        let palette = &profile.color_palette;
        let primary = resolve(&[palette.first()], DEFAULT_PRIMARY);
        let accent = resolve(&[palette.get(1), palette.first()], DEFAULT_PRIMARY);
        let background = resolve(&[palette.get(2)], DEFAULT_BACKGROUND);

        Self {
            primary,
            accent,
            background,
            font_style: profile.font_style,
        }
    }

    /// CSS custom properties, keyed without the leading `--`.
    pub fn variables(&self) -> BTreeMap<String, String> {
        let mut vars = BTreeMap::new();
        vars.insert("primary".to_string(), self.primary.to_string());
        vars.insert(
            "primary-foreground".to_string(),
            foreground_for(self.primary).to_string(),
        );
        vars.insert("accent".to_string(), self.accent.to_string());
        vars.insert(
            "accent-foreground".to_string(),
            foreground_for(self.accent).to_string(),
        );
        vars.insert("background".to_string(), self.background.to_string());
        vars.insert(
            "foreground".to_string(),
            foreground_for(self.background).to_string(),
        );
        vars.insert("font-family".to_string(), self.font_style.css_font_stack());
        vars
    }

    /// A `:root { ... }` block declaring every variable.
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in self.variables() {
            css.push_str(&format!("  --{}: {};\n", name, value));
        }
        css.push_str("}\n");
        css
    }

    pub fn declaration(&self) -> ThemeDeclaration {
        ThemeDeclaration {
            variables: self.variables(),
            css: self.to_css(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        let primary = fallback(DEFAULT_PRIMARY);
        Self {
            primary,
            accent: primary,
            background: fallback(DEFAULT_BACKGROUND),
            font_style: FontStyle::default(),
        }
    }
}

fn resolve(candidates: &[Option<&String>], default: &str) -> Hsl {
    for candidate in candidates.iter().flatten() {
        match hex_to_hsl(candidate) {
            Ok(hsl) => return hsl,
            Err(e) => tracing::warn!(color = %candidate, error = %e.message, "ignoring palette color"),
        }
    }
    fallback(default)
}

fn fallback(hex: &str) -> Hsl {
    hex_to_hsl(hex).unwrap_or(Hsl { h: 0, s: 0, l: 50 })
}

/// Near-black on light surfaces, near-white on dark ones.
fn foreground_for(surface: Hsl) -> Hsl {
    if surface.l > LIGHT_SURFACE_THRESHOLD {
        Hsl::new(surface.h as i32, 10, 10)
    } else {
        Hsl::new(surface.h as i32, 10, 98)
    }
}
