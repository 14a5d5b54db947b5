//! Generation flows.
//!
//! Each flow takes a typed input record, rejects it with `INVALID_INPUT`
//! when any field is malformed, sends one or two prompts to the model and
//! returns a validated output record. Output that does not match the
//! declared schema fails with `SCHEMA_MISMATCH`; media flows that get no
//! media back fail with `MEDIA_MISSING`.

mod asset;
mod chat;
mod extract;
mod guidelines;
mod jingle;
mod logo;
mod mockup;
mod social;
mod template;

pub use asset::{branded_asset, BrandedAsset, BrandedAssetInput};
pub use chat::{brand_chat, BrandChatAnswer, BrandChatInput};
pub use extract::{extract_brand, ExtractBrandInput};
pub use guidelines::{brand_guidelines, BrandGuidelines, BrandGuidelinesInput};
pub use jingle::{jingle, Jingle, JingleInput};
pub use logo::{generate_logo, GenerateLogoInput, GeneratedLogo};
pub use mockup::{mockup, mockup_scene, Mockup, MockupInput};
pub use social::{
    social_headers, social_posts, SocialHeaders, SocialHeadersInput, SocialPosts,
    SocialPostsInput, MAX_HEADER_SUGGESTIONS,
};
pub use template::{apply_brand_to_template, ApplyTemplateInput, CustomizedTemplate};

use std::time::Instant;

use serde::de::DeserializeOwned;

use crate::error::{BrandError, ErrorCode, Result};
use crate::media::DataUri;
use crate::model::{ModelBackend, ModelRequest, Part};
use crate::schema::{require_data_uri, require_hex_color, Schema, Violation};

/// Asks for a JSON answer and decodes it against `schema`.
async fn ask_json<B, T>(
    backend: &B,
    flow: &'static str,
    model: &str,
    parts: Vec<Part>,
    schema: Schema,
) -> Result<T>
where
    B: ModelBackend,
    T: DeserializeOwned,
{
    let start = Instant::now();
    let request = ModelRequest::json(flow, model, parts, schema.clone());
    let response = backend.generate(request).await?;
    let decoded = schema.decode(flow, response.require_text(flow)?);

    match &decoded {
        Ok(_) => tracing::info!(
            flow,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "flow answered"
        ),
        Err(e) => tracing::warn!(flow, error = %e.message, "flow answer rejected"),
    }
    decoded
}

/// Asks for an image and returns it.
async fn ask_image<B: ModelBackend>(
    backend: &B,
    flow: &'static str,
    model: &str,
    parts: Vec<Part>,
) -> Result<DataUri> {
    let start = Instant::now();
    let response = backend
        .generate(ModelRequest::image(flow, model, parts))
        .await?;
    let media = response.require_media(flow)?;
    if !media.is_image() {
        return Err(BrandError::new(
            ErrorCode::MediaMissing,
            format!("{} returned {} instead of an image", flow, media.essence()),
        ));
    }

    tracing::info!(
        flow,
        mime = %media.essence(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "image generated"
    );
    Ok(media)
}

/// Records a violation unless `value` is a data URI holding an image.
fn require_image_uri(field: &str, value: &str, out: &mut Vec<Violation>) {
    match DataUri::parse(value) {
        Ok(uri) if uri.is_image() => {}
        Ok(uri) => out.push(Violation::new(
            field,
            format!("expected an image, got {}", uri.essence()),
        )),
        Err(_) => require_data_uri(field, value, out),
    }
}

/// Records violations for a caller-supplied palette: at least one color,
/// every entry `#RRGGBB`.
fn require_palette(field: &str, palette: &[String], out: &mut Vec<Violation>) {
    if palette.is_empty() {
        out.push(Violation::new(field, "must contain at least one color"));
    }
    for (i, color) in palette.iter().enumerate() {
        require_hex_color(&format!("{}[{}]", field, i), color, out);
    }
}

/// Parses a data URI that already passed validation.
fn image_part(value: &str) -> Result<Part> {
    Ok(Part::Media(DataUri::parse(value)?))
}
