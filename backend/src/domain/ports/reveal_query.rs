//! Driving port for opening a reveal link.

use crate::domain::{Error, RevealPayload};

/// Domain use-case port for resolving a token back to its payload.
#[cfg_attr(test, mockall::automock)]
pub trait RevealQuery: Send + Sync {
    /// Open `token`. Any failure to decode or authenticate it is reported as
    /// [`crate::domain::ErrorCode::InvalidToken`].
    fn reveal(&self, token: &str) -> Result<RevealPayload, Error>;
}
