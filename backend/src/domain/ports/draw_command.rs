//! Driving port for running a draw.

use pairing::Participant;

use crate::domain::{DrawRequest, Error, RevealToken};

/// One giver and the sealed token that reveals their receivers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedEntry {
    /// The giver this token belongs to.
    pub giver: Participant,
    /// Token to hand to the giver.
    pub token: RevealToken,
}

/// Result of a successful draw.
///
/// Receivers are never exposed in the clear here; they only exist inside
/// each entry's token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawOutcome {
    /// One entry per participant, in submission order.
    pub entries: Vec<SealedEntry>,
    /// Receivers drawn per giver.
    pub giftee_count: usize,
    /// Shuffles the generator consumed.
    pub attempts: usize,
}

/// Domain use-case port for drawing and sealing an assignment.
#[cfg_attr(test, mockall::automock)]
pub trait DrawCommand: Send + Sync {
    /// Draw an assignment for `request` and seal each giver's receivers.
    ///
    /// Errors carry [`crate::domain::ErrorCode::InvalidRequest`] for requests
    /// no draw can satisfy and [`crate::domain::ErrorCode::Infeasible`] when
    /// the attempt budget ran out.
    fn draw(&self, request: DrawRequest) -> Result<DrawOutcome, Error>;
}
