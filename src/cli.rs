//! Command-line interface.
//!
//! `serve` runs the JSON-RPC server; the other subcommands call a single
//! operation and print its result, which is handy for trying flows without
//! a client.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::audio::{DEFAULT_CHANNELS, DEFAULT_SAMPLE_RATE, DEFAULT_SAMPLE_WIDTH};
use crate::brand::FontStyle;
use crate::config::StudioConfig;

/// autobrand: brand kits, themes, jingles and assets from a logo
#[derive(Parser, Debug)]
#[command(name = "autobrand")]
#[command(about = "Brand kit generation with a hosted generative model")]
#[command(version)]
pub struct Cli {
    /// Directory generated media is saved to (overrides AUTOBRAND_OUTPUT_PATH)
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the JSON-RPC server on stdin/stdout
    Serve,

    /// Print the CSS theme for a palette
    Theme(ThemeArgs),

    /// Wrap a raw PCM file in a WAV container
    EncodeWav(EncodeWavArgs),

    /// Build a full brand kit from a logo image
    Kit {
        /// Logo image file (png, jpg, webp, gif or svg)
        logo: PathBuf,
        /// Kind of business the brand is for
        #[arg(short, long)]
        business: String,
    },

    /// Generate a logo from a description
    Logo {
        /// What the logo should show
        description: String,
    },

    /// Write and voice a short audio jingle
    Jingle {
        /// Brand name to feature
        #[arg(short = 'n', long)]
        brand: String,
        /// Kind of business the brand is for
        #[arg(short, long)]
        business: String,
    },

    /// Ask the branding assistant a question
    Chat {
        /// The question, as one or more words
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },

    /// List the built-in design templates
    Templates,
}

#[derive(Args, Debug)]
pub struct ThemeArgs {
    /// Palette colors as #RRGGBB: primary, accent, background
    #[arg(required = true, num_args = 1..)]
    pub colors: Vec<String>,

    /// Font style
    #[arg(short, long, default_value = "sans-serif", value_parser = parse_font_style)]
    pub font: FontStyle,

    /// Print variables and CSS as JSON instead of the CSS block
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct EncodeWavArgs {
    /// Raw little-endian PCM file
    pub input: PathBuf,

    /// Output WAV file path (defaults to the input path with a .wav extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Number of interleaved channels
    #[arg(short, long, default_value_t = DEFAULT_CHANNELS)]
    pub channels: u16,

    /// Frames per second
    #[arg(short = 'r', long, default_value_t = DEFAULT_SAMPLE_RATE)]
    pub sample_rate: u32,

    /// Bytes per sample (1-4)
    #[arg(short = 'w', long, default_value_t = DEFAULT_SAMPLE_WIDTH)]
    pub sample_width: u16,
}

impl EncodeWavArgs {
    /// Returns the effective output path.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input.with_extension("wav"))
    }
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Applies flag overrides to a config loaded from the environment.
    pub fn apply_to(&self, config: &mut StudioConfig) {
        if let Some(ref dir) = self.output_dir {
            config.output_path = Some(dir.clone());
        }
    }
}

fn parse_font_style(s: &str) -> Result<FontStyle, String> {
    FontStyle::parse(s).ok_or_else(|| format!("expected one of: {}", FontStyle::NAMES.join(", ")))
}

/// Mime type of an image file, from its extension.
pub fn image_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}
