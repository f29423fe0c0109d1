//! Reveal key fingerprinting for operational visibility.
//!
//! Links issued under one key stop opening once the key changes, so operators
//! need to tell at a glance whether a restart kept the same key. The
//! fingerprint is logged on startup; it is a truncated hash and cannot be used
//! to recover the key.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Truncated SHA-256 of the key's encryption half, as 16 lowercase hex
/// characters.
///
/// # Examples
///
/// ```rust
/// use actix_web::cookie::Key;
/// use backend::outbound::reveal_token::key_fingerprint;
///
/// let key = Key::derive_from(&[42_u8; 64]);
/// let fp = key_fingerprint(&key);
///
/// assert_eq!(fp.len(), 16);
/// assert_eq!(fp, key_fingerprint(&key));
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.encryption());
    digest
        .get(..FINGERPRINT_BYTES)
        .map(hex::encode)
        .unwrap_or_default()
}
