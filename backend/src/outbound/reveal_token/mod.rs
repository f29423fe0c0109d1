//! Reveal token adapter.
//!
//! [`XChaChaRevealCodec`] implements [`crate::domain::ports::RevealCodec`]
//! with XChaCha20-Poly1305. [`key_config`] loads (or creates) the key file it
//! derives its cipher key from, and [`fingerprint`] gives operators a safe way
//! to tell keys apart in logs.

mod codec;
pub mod fingerprint;
pub mod key_config;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

pub use codec::{MAX_TOKEN_LEN, TOKEN_VERSION, XChaChaRevealCodec};
pub use fingerprint::key_fingerprint;
pub use key_config::{BuildMode, KeyConfigError, KeySource, RevealKeySettings, reveal_key_from_env};
