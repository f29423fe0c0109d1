//! Draw use case: generate an assignment and seal one token per giver.

use std::sync::Arc;

use pairing::{AssignmentGenerator, ConfigurationError, GiftAssignment, PairingError};
use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::domain::ports::{DrawCommand, DrawOutcome, RevealCodec, SealedEntry};
use crate::domain::{DrawRequest, Error, RevealPayload};

/// Message shown when the attempt budget runs out.
pub const INFEASIBLE_MESSAGE: &str =
    "Could not generate valid pairs. Try again or reduce constraints.";

/// [`DrawCommand`] backed by the `pairing` generator and a [`RevealCodec`].
#[derive(Clone)]
pub struct DrawService {
    codec: Arc<dyn RevealCodec>,
    generator: AssignmentGenerator,
}

impl DrawService {
    /// Build a service sealing tokens with `codec`.
    #[must_use]
    pub fn new(codec: Arc<dyn RevealCodec>, generator: AssignmentGenerator) -> Self {
        Self { codec, generator }
    }

    fn seal(&self, entry: GiftAssignment) -> Result<SealedEntry, Error> {
        let payload = RevealPayload::from(entry);
        let token = self.codec.seal(&payload).map_err(|err| {
            error!(error = %err, "failed to seal reveal payload");
            Error::internal("failed to seal reveal token")
        })?;
        Ok(SealedEntry {
            giver: payload.giver().clone(),
            token,
        })
    }
}

impl DrawCommand for DrawService {
    fn draw(&self, request: DrawRequest) -> Result<DrawOutcome, Error> {
        let participants = request.participants().len();
        let assignment = self
            .generator
            .generate(
                request.participants(),
                request.giftee_count(),
                request.exclusions(),
            )
            .map_err(|err| {
                let mapped = map_pairing_error(&err);
                if err.is_retryable_by_user() {
                    warn!(
                        participants,
                        giftee_count = request.giftee_count(),
                        exclusions = request.exclusions().len(),
                        "no valid draw within attempt budget"
                    );
                } else {
                    debug!(error = %err, "draw request rejected");
                }
                mapped
            })?;

        let giftee_count = assignment.giftee_count();
        let attempts = assignment.attempts();
        let entries = assignment
            .into_iter()
            .map(|entry| self.seal(entry))
            .collect::<Result<Vec<_>, _>>()?;

        info!(participants, giftee_count, attempts, "draw completed");
        Ok(DrawOutcome {
            entries,
            giftee_count,
            attempts,
        })
    }
}

fn map_pairing_error(err: &PairingError) -> Error {
    match err {
        PairingError::InvalidConfiguration(config) => Error::invalid_request(config.to_string())
            .with_details(json!({ "code": configuration_code(config) })),
        PairingError::Infeasible { attempts } => {
            Error::infeasible(INFEASIBLE_MESSAGE).with_details(json!({ "attempts": attempts }))
        }
    }
}

fn configuration_code(err: &ConfigurationError) -> &'static str {
    match err {
        ConfigurationError::TooFewParticipants { .. } => "too_few_participants",
        ConfigurationError::ZeroGifteeCount => "zero_giftee_count",
        ConfigurationError::GifteeCountTooLarge { .. } => "giftee_count_too_large",
        ConfigurationError::DrawTooLarge { .. } => "draw_too_large",
        ConfigurationError::DuplicateParticipant { .. } => "duplicate_participant",
    }
}
