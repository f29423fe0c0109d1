//! The immutable result of a successful draw.

use serde::Serialize;

use crate::participant::Participant;

/// One giver together with the receivers they were drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GiftAssignment {
    giver: Participant,
    receivers: Vec<Participant>,
}

impl GiftAssignment {
    /// The participant buying the gifts.
    #[must_use]
    pub fn giver(&self) -> &Participant {
        &self.giver
    }

    /// The distinct participants this giver buys for, in draw order.
    #[must_use]
    pub fn receivers(&self) -> &[Participant] {
        &self.receivers
    }

    /// Split into owned giver and receivers.
    #[must_use]
    pub fn into_parts(self) -> (Participant, Vec<Participant>) {
        (self.giver, self.receivers)
    }
}

/// Mapping from every participant to their receivers.
///
/// ## Invariants
/// - Entries follow the order of the participant list given to the
///   generator, one entry per participant.
/// - Each entry holds exactly [`Self::giftee_count`] distinct receivers, none
///   equal to the giver and none excluded for that giver.
/// - Across all entries every participant is a receiver exactly
///   [`Self::giftee_count`] times.
///
/// Only the generator constructs assignments, so these invariants hold for
/// every value of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    giftee_count: usize,
    attempts: usize,
    entries: Vec<GiftAssignment>,
}

impl Assignment {
    /// Resolve an index-based draw back into participants.
    pub(crate) fn from_indices(
        participants: &[Participant],
        giftee_count: usize,
        attempts: usize,
        drawn: Vec<Vec<usize>>,
    ) -> Self {
        let entries = participants
            .iter()
            .zip(drawn)
            .map(|(giver, receivers)| GiftAssignment {
                giver: giver.clone(),
                receivers: receivers
                    .into_iter()
                    .filter_map(|index| participants.get(index).cloned())
                    .collect(),
            })
            .collect();
        Self {
            giftee_count,
            attempts,
            entries,
        }
    }

    /// Receivers drawn per giver.
    #[must_use]
    pub fn giftee_count(&self) -> usize {
        self.giftee_count
    }

    /// Number of shuffles the search consumed, starting at 1.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Number of givers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the assignment has no givers. Never true for generated values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in participant order.
    pub fn iter(&self) -> std::slice::Iter<'_, GiftAssignment> {
        self.entries.iter()
    }

    /// Receivers drawn by `giver`, or `None` if they were not in the draw.
    #[must_use]
    pub fn receivers_of(&self, giver: &Participant) -> Option<&[Participant]> {
        self.entries
            .iter()
            .find(|entry| &entry.giver == giver)
            .map(GiftAssignment::receivers)
    }

    /// Consume the assignment, returning its entries in participant order.
    #[must_use]
    pub fn into_entries(self) -> Vec<GiftAssignment> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Assignment {
    type Item = &'a GiftAssignment;
    type IntoIter = std::slice::Iter<'a, GiftAssignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Assignment {
    type Item = GiftAssignment;
    type IntoIter = std::vec::IntoIter<GiftAssignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
