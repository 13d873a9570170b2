//! Session identifier generation

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;

use crate::error::Result;

/// Pluggable session-id generator; stores fall back to [`random_id`]
/// when no override is configured.
pub type KeyGenFn = Arc<dyn Fn() -> Result<String> + Send + Sync>;

/// Generate a random session id: 64 bytes from a CSPRNG, URL-safe
/// base64 without padding (cookie-value safe).
pub fn random_id() -> Result<String> {
    let mut bytes = [0u8; 64];
    rand::rng().fill_bytes(&mut bytes);
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}
