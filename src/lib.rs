//! SigilForge Core - Deterministic Sigil & Poster Engine
//!
//! # The Four Laws (Non-Negotiable)
//! 1. The Seed Is Truth: one string fully determines every artifact
//! 2. Categories Are Closed: dispatch is an exhaustive enum match
//! 3. Fallbacks Are Silent, Audits Are Loud
//! 4. Decode Failures Abort: no partial posters

pub mod audit;
pub mod blessing;
pub mod category;
pub mod generators;
pub mod manifestations;
pub mod path;
pub mod pipeline;
pub mod poster;
pub mod raster;
pub mod seed;
pub mod text;
pub mod texture;

pub use audit::{run_audit, AuditFailure, AuditReport};
pub use blessing::{generate_blessing, BlessingData};
pub use category::{Category, Recipient};
pub use generators::{generate_sigil_path, SigilKind, DEFAULT_SIZE, SEED_VERSION};
pub use path::{Segment, SigilPath};
pub use pipeline::{ForgePipeline, PosterArtifact, PosterRequest};
pub use poster::{compose_poster, PosterError, PosterLayout, POSTER_HEIGHT, POSTER_WIDTH};
pub use raster::Surface;
pub use seed::{derive_seed, RandomStream, SeedWords};
pub use texture::{create_overlay_texture, TextureOptions};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
