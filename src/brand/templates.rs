//! Design templates and the asset types they produce.

use serde::{Deserialize, Serialize};

/// Kind of branded asset a template or mockup targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AssetType {
    BusinessCard,
    InstagramPost,
    BusinessFlyer,
    InstagramStory,
    /// Any other asset, described in free text.
    Other(String),
}

impl AssetType {
    /// Parses a display name, case-insensitively; unknown names become
    /// [`AssetType::Other`].
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "business card" => AssetType::BusinessCard,
            "instagram post" => AssetType::InstagramPost,
            "business flyer" | "flyer" => AssetType::BusinessFlyer,
            "instagram story" => AssetType::InstagramStory,
            _ => AssetType::Other(name.trim().to_string()),
        }
    }

    /// Display name, as used in prompts.
    pub fn name(&self) -> &str {
        match self {
            AssetType::BusinessCard => "Business Card",
            AssetType::InstagramPost => "Instagram Post",
            AssetType::BusinessFlyer => "Business Flyer",
            AssetType::InstagramStory => "Instagram Story",
            AssetType::Other(name) => name,
        }
    }

    /// File-name friendly slug, e.g. `business-card`.
    pub fn slug(&self) -> String {
        self.name()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
            .to_lowercase()
    }
}

impl From<String> for AssetType {
    fn from(name: String) -> Self {
        AssetType::parse(&name)
    }
}

impl From<AssetType> for String {
    fn from(asset: AssetType) -> Self {
        asset.name().to_string()
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A design template the brand can be applied to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    /// Short description used for placeholder imagery.
    pub hint: &'static str,
    pub width: u32,
    pub height: u32,
    pub asset_type: AssetType,
}

/// Built-in template catalog.
pub static TEMPLATES: [Template; 4] = [
    Template {
        id: "flyer-01",
        name: "Business Flyer",
        hint: "business flyer",
        width: 400,
        height: 518,
        asset_type: AssetType::BusinessFlyer,
    },
    Template {
        id: "ig-post-01",
        name: "Instagram Post",
        hint: "social media",
        width: 400,
        height: 400,
        asset_type: AssetType::InstagramPost,
    },
    Template {
        id: "bizcard-01",
        name: "Business Card",
        hint: "business card",
        width: 400,
        height: 233,
        asset_type: AssetType::BusinessCard,
    },
    Template {
        id: "story-01",
        name: "Instagram Story",
        hint: "phone wallpaper",
        width: 400,
        height: 711,
        asset_type: AssetType::InstagramStory,
    },
];

/// Looks up a catalog template by id.
pub fn find_template(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id == id)
}
