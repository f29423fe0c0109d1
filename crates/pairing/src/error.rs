//! Error types for assignment generation.
//!
//! Two failure kinds are kept apart: [`PairingError::InvalidConfiguration`]
//! is raised before any search begins and means the request itself cannot be
//! satisfied by any draw, while [`PairingError::Infeasible`] means the bounded
//! search gave up.

use thiserror::Error;

/// Reasons a draw request is rejected before searching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Fewer participants than the minimum group size.
    #[error("at least 2 participants are required, got {count}")]
    TooFewParticipants {
        /// Number of participants supplied.
        count: usize,
    },

    /// Each participant must give to at least one other person.
    #[error("the number of giftees per person must be at least 1")]
    ZeroGifteeCount,

    /// Self-exclusion leaves only `participants - 1` candidates per giver.
    #[error(
        "not enough participants: {participants} cannot each give to {giftee_count} \
         distinct others; add participants or lower the number of giftees"
    )]
    GifteeCountTooLarge {
        /// Requested receivers per giver.
        giftee_count: usize,
        /// Number of participants supplied.
        participants: usize,
    },

    /// The draw would need more receiver slots than the generator allows.
    #[error(
        "draw is too large: {participants} participants with {giftee_count} giftees each \
         exceeds the limit of {max_slots} gift assignments per draw"
    )]
    DrawTooLarge {
        /// Number of participants supplied.
        participants: usize,
        /// Requested receivers per giver.
        giftee_count: usize,
        /// Configured cap on `participants * giftee_count`.
        max_slots: usize,
    },

    /// The same name was supplied twice.
    #[error("participant '{name}' is listed more than once")]
    DuplicateParticipant {
        /// The repeated name.
        name: String,
    },
}

/// Failures returned by the assignment generator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PairingError {
    /// The request was malformed; retrying with the same input never helps.
    #[error(transparent)]
    InvalidConfiguration(#[from] ConfigurationError),

    /// Every attempt in the restart budget failed to satisfy the constraints.
    #[error("could not find a valid assignment after {attempts} attempts")]
    Infeasible {
        /// Number of attempts made before giving up.
        attempts: usize,
    },
}

impl PairingError {
    /// Whether a user could reasonably succeed by loosening constraints or
    /// simply trying again, as opposed to fixing malformed input.
    #[must_use]
    pub fn is_retryable_by_user(&self) -> bool {
        matches!(self, Self::Infeasible { .. })
    }
}
