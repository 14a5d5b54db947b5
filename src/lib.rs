//! autobrand: brand kit generation over a hosted generative model.
//!
//! Turns a logo into a brand identity (palette, font style, tone) and builds
//! on it: a CSS theme, social captions and headers, branded assets and
//! mockups, guideline documents, spoken jingles and template links.
//!
//! # Modules
//!
//! - [`color`]: hex and HSL conversion
//! - [`audio`]: PCM to WAV packaging
//! - [`theme`]: theme variables derived from a brand profile
//! - [`flows`]: one function per generation flow
//! - [`studio`]: flows bound to a backend, plus the brand kit
//! - [`model`]: the model backend trait and the Gemini client
//! - [`rpc`]: JSON-RPC 2.0 server over stdio
//! - [`config`]: runtime configuration (StudioConfig)
//! - [`error`]: error types and codes (BrandError, ErrorCode)
//!
//! # Example
//!
//! ```rust,ignore
//! use autobrand::{config::StudioConfig, studio::{BrandKitInput, Studio}};
//!
//! let studio = Studio::from_config(StudioConfig::from_env())?;
//! let kit = studio
//!     .brand_kit(&BrandKitInput {
//!         logo_data_uri: "data:image/png;base64,...".to_string(),
//!         business_type: "Coffee Shop".to_string(),
//!     })
//!     .await?;
//! println!("{}", kit.theme.css);
//! ```

pub mod audio;
pub mod brand;
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod flows;
pub mod media;
pub mod model;
pub mod rpc;
pub mod schema;
pub mod studio;
pub mod theme;

// Re-export commonly used types at crate root for convenience
pub use brand::{BrandProfile, BrandTone, FontStyle};
pub use color::{hex_to_hsl, hsl_to_hex, Hsl};
pub use config::StudioConfig;
pub use error::{BrandError, ErrorCode, Result};
pub use media::DataUri;
pub use studio::{BrandKit, BrandKitInput, Studio};
pub use theme::{Theme, ThemeDeclaration};
