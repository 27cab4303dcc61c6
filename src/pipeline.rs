//! Poster Pipeline - Single Entry Point
//!
//! The one externally callable operation for the end-to-end shareable
//! artifact: decode the captured card, compose the poster, encode it, and
//! wrap the result in a manifest carrying a content hash for reproduction
//! checks. Each request is stateless; surfaces are created per call and
//! never shared between in-flight generations.

use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::blessing::BlessingData;
use crate::poster::{compose_poster, encode_poster_jpeg, PosterError, POSTER_HEIGHT, POSTER_WIDTH};
use crate::raster::Surface;
use crate::ENGINE_VERSION;

#[cfg(feature = "test-hooks")]
use std::sync::atomic::{AtomicU32, Ordering};

#[cfg(feature = "test-hooks")]
static COMPOSE_CALL_COUNT: AtomicU32 = AtomicU32::new(0);

#[cfg(feature = "test-hooks")]
pub fn get_compose_call_count() -> u32 {
    COMPOSE_CALL_COUNT.load(Ordering::SeqCst)
}

/// One poster generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosterRequest {
    /// Captured 3D card render as a base64 data URL (PNG or JPEG).
    pub card_image: String,
    pub blessing: BlessingData,
    pub recipient: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// Manifest of a produced poster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosterArtifact {
    pub id: String,
    pub engine_version: String,
    pub created_at: DateTime<Utc>,
    pub width: u32,
    pub height: u32,
    pub format: String,
    /// SHA-256 hex of the encoded bytes; identical requests with identical
    /// card captures reproduce this hash.
    pub content_hash: String,
    /// `data:image/jpeg;base64,...` payload ready for download/sharing.
    pub data_url: String,
}

/// The poster pipeline. Stateless; one instance serves any number of
/// independent requests.
#[derive(Debug, Default)]
pub struct ForgePipeline;

impl ForgePipeline {
    pub fn new() -> Self {
        Self
    }

    /// Full pipeline: decode capture, compose, encode, manifest.
    ///
    /// A capture that fails to decode aborts the whole operation; no
    /// partial poster is ever returned.
    pub fn generate_poster(&self, request: &PosterRequest) -> Result<PosterArtifact, PosterError> {
        #[cfg(feature = "test-hooks")]
        COMPOSE_CALL_COUNT.fetch_add(1, Ordering::SeqCst);

        let span = tracing::debug_span!("generate_poster", recipient = %request.recipient);
        let _guard = span.enter();

        let card = decode_card_data_url(&request.card_image)?;
        tracing::debug!(width = card.width(), height = card.height(), "card capture decoded");

        let username = request.username.as_deref().unwrap_or("Seeker");
        let poster = compose_poster(&card, &request.blessing, &request.recipient, username)?;

        let bytes = encode_poster_jpeg(&poster, 95)?;
        let content_hash = hex(&Sha256::digest(&bytes));
        let data_url = format!(
            "data:image/jpeg;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&bytes)
        );
        tracing::debug!(bytes = bytes.len(), %content_hash, "poster encoded");

        Ok(PosterArtifact {
            id: Uuid::new_v4().to_string(),
            engine_version: ENGINE_VERSION.to_string(),
            created_at: Utc::now(),
            width: POSTER_WIDTH,
            height: POSTER_HEIGHT,
            format: "jpeg".to_string(),
            content_hash,
            data_url,
        })
    }
}

/// Decode a `data:image/...;base64,` payload into a surface.
pub fn decode_card_data_url(data_url: &str) -> Result<Surface, PosterError> {
    let encoded = data_url
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(";base64,"))
        .map(|(_, payload)| payload)
        .ok_or(PosterError::BadDataUrl)?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| PosterError::CardDecode(e.to_string()))?;

    decode_card_bytes(&bytes)
}

/// Decode raw PNG/JPEG bytes into a surface.
pub fn decode_card_bytes(bytes: &[u8]) -> Result<Surface, PosterError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| PosterError::CardDecode(e.to_string()))?
        .to_rgba8();
    let (w, h) = img.dimensions();
    Surface::from_raw(w, h, img.into_raw())
        .ok_or_else(|| PosterError::CardDecode("unexpected buffer size".to_string()))
}

fn hex(bytes: impl AsRef<[u8]>) -> String {
    bytes.as_ref().iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_data_url_is_rejected() {
        let err = decode_card_data_url("http://example.com/card.png").unwrap_err();
        assert!(matches!(err, PosterError::BadDataUrl));
    }

    #[test]
    fn garbage_payload_is_a_decode_failure() {
        let err = decode_card_data_url("data:image/png;base64,!!!notbase64!!!").unwrap_err();
        assert!(matches!(err, PosterError::CardDecode(_)));
    }

    #[test]
    fn hex_is_lowercase_pairs() {
        assert_eq!(hex(&[0x00, 0xff, 0x1a]), "00ff1a");
    }
}
