//! XChaCha20-Poly1305 reveal token codec.
//!
//! Token layout before encoding:
//!
//! ```text
//! version (1 byte) || nonce (24 bytes) || ciphertext || tag (16 bytes)
//! ```
//!
//! The version byte is also the associated data, so changing it breaks
//! authentication. The whole frame is encoded as unpadded URL-safe base64 so
//! it can sit directly in a path segment. Nonces are random per token; the
//! 192-bit XChaCha nonce makes collisions negligible without any counter
//! state.

use std::fmt;

use actix_web::cookie::Key;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chacha20poly1305::aead::{Aead, Payload};
use chacha20poly1305::{KeyInit, XChaCha20Poly1305, XNonce};
use rand::Rng;

use crate::domain::ports::{RevealCodec, RevealCodecError};
use crate::domain::{RevealPayload, RevealToken};

/// Format version written as the first byte of every token.
pub const TOKEN_VERSION: u8 = 1;

/// Longest encoded token accepted by [`XChaChaRevealCodec::open`].
pub const MAX_TOKEN_LEN: usize = 8 * 1024;

const NONCE_LEN: usize = 24;

/// Seals reveal payloads with a key derived from the reveal key file.
#[derive(Clone)]
pub struct XChaChaRevealCodec {
    cipher: XChaCha20Poly1305,
}

impl XChaChaRevealCodec {
    /// Build a codec from the encryption half of `key`.
    ///
    /// # Examples
    /// ```
    /// use actix_web::cookie::Key;
    /// use backend::domain::ports::RevealCodec;
    /// use backend::domain::RevealPayload;
    /// use backend::outbound::reveal_token::XChaChaRevealCodec;
    /// use pairing::Participant;
    ///
    /// let codec = XChaChaRevealCodec::new(&Key::generate());
    /// let payload = RevealPayload::new(
    ///     Participant::new("Ada").expect("valid name"),
    ///     vec![Participant::new("Brian").expect("valid name")],
    /// );
    ///
    /// let token = codec.seal(&payload).expect("seal");
    /// assert_eq!(codec.open(token.as_str()).expect("open"), payload);
    /// ```
    #[must_use]
    pub fn new(key: &Key) -> Self {
        // `Key::encryption` is always 32 bytes, exactly an XChaCha20 key.
        let cipher_key = chacha20poly1305::Key::clone_from_slice(key.encryption());
        Self {
            cipher: XChaCha20Poly1305::new(&cipher_key),
        }
    }
}

impl fmt::Debug for XChaChaRevealCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XChaChaRevealCodec").finish_non_exhaustive()
    }
}

impl RevealCodec for XChaChaRevealCodec {
    fn seal(&self, payload: &RevealPayload) -> Result<RevealToken, RevealCodecError> {
        let plaintext = serde_json::to_vec(payload).map_err(|err| RevealCodecError::Sealing {
            message: err.to_string(),
        })?;
        let mut nonce = [0_u8; NONCE_LEN];
        rand::rng().fill(&mut nonce);

        let ciphertext = self
            .cipher
            .encrypt(
                &XNonce::from(nonce),
                Payload {
                    msg: &plaintext,
                    aad: &[TOKEN_VERSION],
                },
            )
            .map_err(|_| RevealCodecError::Sealing {
                message: "encryption failed".to_owned(),
            })?;

        let mut frame = Vec::with_capacity(1 + NONCE_LEN + ciphertext.len());
        frame.push(TOKEN_VERSION);
        frame.extend_from_slice(&nonce);
        frame.extend_from_slice(&ciphertext);
        Ok(RevealToken::new(URL_SAFE_NO_PAD.encode(frame)))
    }

    fn open(&self, token: &str) -> Result<RevealPayload, RevealCodecError> {
        if token.len() > MAX_TOKEN_LEN {
            return Err(RevealCodecError::Invalid);
        }
        let frame = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| RevealCodecError::Invalid)?;
        let (version, sealed) = frame.split_first().ok_or(RevealCodecError::Invalid)?;
        if *version != TOKEN_VERSION {
            return Err(RevealCodecError::Invalid);
        }
        let (nonce, ciphertext) = sealed
            .split_at_checked(NONCE_LEN)
            .ok_or(RevealCodecError::Invalid)?;

        let plaintext = self
            .cipher
            .decrypt(
                XNonce::from_slice(nonce),
                Payload {
                    msg: ciphertext,
                    aad: &[TOKEN_VERSION],
                },
            )
            .map_err(|_| RevealCodecError::Invalid)?;
        serde_json::from_slice(&plaintext).map_err(|_| RevealCodecError::Invalid)
    }
}
