//! Reveal use case: open a token and hand back the giver's receivers.

use std::sync::Arc;

use tracing::{debug, error};

use crate::domain::ports::{RevealCodec, RevealCodecError, RevealQuery};
use crate::domain::{Error, RevealPayload};

/// Message shown for any token that cannot be opened.
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or corrupted link.";

/// [`RevealQuery`] backed by a [`RevealCodec`].
#[derive(Clone)]
pub struct RevealService {
    codec: Arc<dyn RevealCodec>,
}

impl RevealService {
    /// Build a service opening tokens with `codec`.
    #[must_use]
    pub fn new(codec: Arc<dyn RevealCodec>) -> Self {
        Self { codec }
    }
}

impl RevealQuery for RevealService {
    fn reveal(&self, token: &str) -> Result<RevealPayload, Error> {
        self.codec.open(token).map_err(|err| match err {
            RevealCodecError::Invalid => {
                debug!(token_len = token.len(), "rejected reveal token");
                Error::invalid_token(INVALID_TOKEN_MESSAGE)
            }
            RevealCodecError::Sealing { message } => {
                error!(%message, "reveal codec failed while opening");
                Error::internal("failed to open reveal token")
            }
        })
    }
}
