//! autobrand: brand kit generation over a hosted generative model.
//!
//! This binary can run in two modes:
//! - Server mode (`serve`): JSON-RPC over stdin/stdout
//! - One-shot commands: run a single operation and print the result

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use autobrand::audio::{pcm_to_wav, PcmSpec};
use autobrand::brand::{BrandProfile, BrandTone, TEMPLATES};
use autobrand::cli::{image_mime, Cli, Command, EncodeWavArgs, ThemeArgs};
use autobrand::config::StudioConfig;
use autobrand::flows::{BrandChatInput, GenerateLogoInput, JingleInput};
use autobrand::media::DataUri;
use autobrand::rpc::{run_server, ServerState};
use autobrand::studio::{BrandKitInput, Studio};
use autobrand::theme::Theme;

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr; stdout carries JSON-RPC responses and command output.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("AUTOBRAND_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let mut config = StudioConfig::from_env();
    cli.apply_to(&mut config);
    if let Some(problem) = config.validate() {
        bail!("invalid configuration: {}", problem);
    }

    match cli.command {
        Command::Serve => run_server(ServerState::from_config(config)).await?,
        Command::Theme(ref args) => print_theme(args)?,
        Command::EncodeWav(ref args) => encode_wav(args)?,
        Command::Templates => {
            for t in TEMPLATES.iter() {
                println!("{:<12} {:<18} {}x{}", t.id, t.name, t.width, t.height);
            }
        }
        Command::Kit {
            ref logo,
            ref business,
        } => {
            let studio = Studio::from_config(config)?;
            let input = BrandKitInput {
                logo_data_uri: read_logo(logo)?,
                business_type: business.clone(),
            };
            let kit = studio.brand_kit(&input).await?;
            println!("{}", serde_json::to_string_pretty(&kit)?);
        }
        Command::Logo { ref description } => {
            let out_dir = config.effective_output_path();
            let studio = Studio::from_config(config)?;
            let logo = studio
                .generate_logo(&GenerateLogoInput {
                    description: description.clone(),
                })
                .await?;
            let path = save(&logo.logo_data_uri, &out_dir, "logo")?;
            println!("{}", path.display());
        }
        Command::Jingle {
            ref brand,
            ref business,
        } => {
            let out_dir = config.effective_output_path();
            let studio = Studio::from_config(config)?;
            let jingle = studio
                .jingle(&JingleInput {
                    brand_name: brand.clone(),
                    business_type: business.clone(),
                })
                .await?;
            let path = save(&jingle.jingle_url, &out_dir, "jingle")?;
            println!("{}", jingle.jingle_script);
            println!("{}", path.display());
        }
        Command::Chat { ref question } => {
            let studio = Studio::from_config(config)?;
            let reply = studio
                .brand_chat(&BrandChatInput {
                    question: question.join(" "),
                })
                .await?;
            println!("{}", reply.answer);
        }
    }

    Ok(())
}

fn print_theme(args: &ThemeArgs) -> Result<()> {
    let profile = BrandProfile {
        color_palette: args.colors.clone(),
        font_style: args.font,
        brand_tone: BrandTone::default(),
    };
    let theme = Theme::from_profile(&profile);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&theme.declaration())?);
    } else {
        print!("{}", theme.to_css());
    }
    Ok(())
}

fn encode_wav(args: &EncodeWavArgs) -> Result<()> {
    let pcm = fs::read(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let spec = PcmSpec {
        channels: args.channels,
        sample_rate: args.sample_rate,
        sample_width: args.sample_width,
    };
    let wav = pcm_to_wav(&pcm, spec)?;

    let output = args.output_path();
    fs::write(&output, &wav).with_context(|| format!("Failed to write {}", output.display()))?;
    tracing::info!(bytes = wav.len(), path = %output.display(), "WAV written");
    println!("{}", output.display());
    Ok(())
}

fn read_logo(path: &Path) -> Result<String> {
    let Some(mime) = image_mime(path) else {
        bail!("{} is not a png, jpg, webp, gif or svg file", path.display());
    };
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(DataUri::from_bytes(mime, &bytes).to_string())
}

fn save(media: &DataUri, dir: &Path, prefix: &str) -> Result<std::path::PathBuf> {
    let path = media
        .save_to_dir(dir, prefix)
        .with_context(|| format!("Failed to save {} to {}", prefix, dir.display()))?;
    tracing::info!(path = %path.display(), "saved");
    Ok(path)
}
