//! Driven port for sealing reveal payloads into tokens.

use crate::domain::{RevealPayload, RevealToken};

/// Failures reported by a [`RevealCodec`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RevealCodecError {
    /// The token could not be decoded, authenticated, or parsed.
    ///
    /// Deliberately carries no detail: callers must not learn which step
    /// failed.
    #[error("reveal token is invalid")]
    Invalid,
    /// Sealing failed inside the codec.
    #[error("failed to seal reveal payload: {message}")]
    Sealing {
        /// Codec-specific description.
        message: String,
    },
}

/// Seals payloads into opaque tokens and opens them again.
///
/// Implementations must guarantee that [`RevealCodec::open`] succeeds only for
/// tokens produced by [`RevealCodec::seal`] under the same key, and that the
/// token reveals nothing about the payload.
#[cfg_attr(test, mockall::automock)]
pub trait RevealCodec: Send + Sync {
    /// Seal `payload` into a URL-safe token.
    fn seal(&self, payload: &RevealPayload) -> Result<RevealToken, RevealCodecError>;

    /// Open a token previously produced by [`RevealCodec::seal`].
    fn open(&self, token: &str) -> Result<RevealPayload, RevealCodecError>;
}
