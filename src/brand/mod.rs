//! Brand identity types.
//!
//! - [`BrandProfile`]: palette, font style and tone extracted from a logo
//! - [`Template`]: built-in design templates and their [`AssetType`]

mod profile;
mod templates;

pub use profile::{BrandProfile, BrandTone, FontStyle, MAX_PALETTE_LEN, MIN_PALETTE_LEN};
pub use templates::{find_template, AssetType, Template, TEMPLATES};
