//! SigilForge CLI - Bridge interface for scripting
//!
//! Commands: sigil, blessing, poster, audit
//! Outputs JSON to stdout
//! Returns non-zero on audit failure

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use base64::Engine as _;
use sigilforge_core::{
    audit::run_audit,
    blessing::generate_blessing,
    category::{Category, Recipient},
    generators::{generate_sigil_path, SigilKind, DEFAULT_SIZE},
    pipeline::{ForgePipeline, PosterRequest},
};

#[derive(Parser)]
#[command(name = "sigilforge-cli")]
#[command(about = "SigilForge CLI - Deterministic Sigil & Poster Engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a sigil path for a seed and category
    Sigil {
        /// Seed text (recipient name, phrase, any UTF-8)
        #[arg(short, long)]
        seed: String,

        /// Blessing category label
        #[arg(short, long)]
        category: String,

        /// Canvas size the path is fitted to
        #[arg(long, default_value_t = DEFAULT_SIZE)]
        size: f64,
    },

    /// Generate blessing data for a recipient and category
    Blessing {
        /// Recipient label
        #[arg(short, long)]
        recipient: String,

        /// Blessing category label
        #[arg(short, long)]
        category: String,
    },

    /// Compose a poster from a card image
    Poster {
        /// Path to the card image (PNG or JPEG)
        #[arg(long)]
        card: PathBuf,

        /// Recipient label
        #[arg(short, long)]
        recipient: String,

        /// Blessing category label
        #[arg(short, long)]
        category: String,

        /// Username for the signature line
        #[arg(short, long)]
        username: Option<String>,

        /// Write the JPEG here instead of embedding a data URL
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Audit title coverage across all recipient/category combinations
    Audit,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sigil { seed, category, size } => {
            let category = match parse_category(&category) {
                Ok(c) => c,
                Err(code) => return code,
            };

            let path = generate_sigil_path(&seed, category, size);
            let output = serde_json::json!({
                "kind": SigilKind::for_category(category),
                "d": path.to_svg_d(),
                "bounds": path.bounds(),
            });
            println!("{}", serde_json::to_string_pretty(&output).unwrap());
            ExitCode::SUCCESS
        }

        Commands::Blessing { recipient, category } => {
            let (recipient, category) = match parse_pair(&recipient, &category) {
                Ok(p) => p,
                Err(code) => return code,
            };

            let blessing = generate_blessing(recipient, category);
            println!("{}", serde_json::to_string_pretty(&blessing).unwrap());
            ExitCode::SUCCESS
        }

        Commands::Poster { card, recipient, category, username, out } => {
            let (recipient, category) = match parse_pair(&recipient, &category) {
                Ok(p) => p,
                Err(code) => return code,
            };

            let bytes = match std::fs::read(&card) {
                Ok(b) => b,
                Err(e) => {
                    eprintln!(r#"{{"error": "Failed to read card image: {}"}}"#, e);
                    return ExitCode::FAILURE;
                }
            };

            let mime = if bytes.starts_with(&[0xff, 0xd8]) {
                "image/jpeg"
            } else {
                "image/png"
            };
            let data_url = format!(
                "data:{};base64,{}",
                mime,
                base64::engine::general_purpose::STANDARD.encode(&bytes)
            );

            let request = PosterRequest {
                card_image: data_url,
                blessing: generate_blessing(recipient, category),
                recipient: recipient.label().to_string(),
                username,
            };

            let pipeline = ForgePipeline::new();
            match pipeline.generate_poster(&request) {
                Ok(mut artifact) => {
                    if let Some(out) = out {
                        let jpeg = match strip_data_url(&artifact.data_url) {
                            Some(j) => j,
                            None => {
                                eprintln!(r#"{{"error": "Malformed artifact data URL"}}"#);
                                return ExitCode::FAILURE;
                            }
                        };
                        if let Err(e) = std::fs::write(&out, jpeg) {
                            eprintln!(r#"{{"error": "Failed to write poster: {}"}}"#, e);
                            return ExitCode::FAILURE;
                        }
                        artifact.data_url = out.display().to_string();
                    }
                    println!("{}", serde_json::to_string_pretty(&artifact).unwrap());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    let output = serde_json::json!({
                        "success": false,
                        "error": e.to_string(),
                    });
                    println!("{}", serde_json::to_string(&output).unwrap());
                    ExitCode::FAILURE
                }
            }
        }

        Commands::Audit => {
            let report = run_audit();
            println!("{}", serde_json::to_string_pretty(&report).unwrap());
            if report.passed {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2) // Coverage failure
            }
        }
    }
}

fn parse_category(label: &str) -> Result<Category, ExitCode> {
    Category::from_label(label).ok_or_else(|| {
        eprintln!(r#"{{"error": "Unknown category: {}"}}"#, label);
        ExitCode::FAILURE
    })
}

fn parse_pair(recipient: &str, category: &str) -> Result<(Recipient, Category), ExitCode> {
    let recipient = Recipient::from_label(recipient).ok_or_else(|| {
        eprintln!(r#"{{"error": "Unknown recipient: {}"}}"#, recipient);
        ExitCode::FAILURE
    })?;
    let category = parse_category(category)?;
    Ok((recipient, category))
}

fn strip_data_url(url: &str) -> Option<Vec<u8>> {
    let (_, payload) = url.split_once(";base64,")?;
    base64::engine::general_purpose::STANDARD.decode(payload).ok()
}
