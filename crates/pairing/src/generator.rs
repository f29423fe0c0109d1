//! Randomised greedy search with bounded restarts.
//!
//! Each attempt builds a receiver pool holding every participant
//! `giftee_count` times, shuffles it, and walks the givers in a shuffled
//! order. A giver takes the first slot in pool order that is not themselves,
//! not already one of their receivers, and not excluded for them. Because the
//! pool is consumed exactly, every participant ends up receiving
//! `giftee_count` gifts. If some giver finds no usable slot the attempt is
//! discarded and a fresh shuffle starts.
//!
//! Shuffling the giver order as well as the pool makes the outcome invariant
//! under relabelling participants, so without exclusions every assignment of
//! the same shape is equally likely.

use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::assignment::Assignment;
use crate::error::{ConfigurationError, PairingError};
use crate::participant::{Exclusion, Participant};

/// Smallest group that can hold a draw.
pub const MIN_PARTICIPANTS: usize = 2;

const DEFAULT_MAX_ATTEMPTS: usize = 1000;

const DEFAULT_MAX_SLOTS: usize = 5000;

/// Upper bound on the number of shuffles tried before reporting
/// [`PairingError::Infeasible`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptBudget(NonZeroUsize);

impl AttemptBudget {
    /// The reference budget of 1000 attempts.
    pub const DEFAULT: Self = Self(NonZeroUsize::MIN.saturating_add(DEFAULT_MAX_ATTEMPTS - 1));

    /// Budget of exactly `max_attempts` shuffles.
    #[must_use]
    pub const fn new(max_attempts: NonZeroUsize) -> Self {
        Self(max_attempts)
    }

    /// Budget from a plain count, or `None` when `max_attempts` is zero.
    #[must_use]
    pub fn from_count(max_attempts: usize) -> Option<Self> {
        NonZeroUsize::new(max_attempts).map(Self)
    }

    /// Maximum number of attempts.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for AttemptBudget {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Upper bound on `participants * giftee_count`, the number of receiver
/// slots a single attempt shuffles and consumes.
///
/// Each attempt scans the pool once per slot, so its cost grows with the
/// square of the slot count. Requests above the limit are rejected with
/// [`ConfigurationError::DrawTooLarge`] before anything is allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotLimit(NonZeroUsize);

impl SlotLimit {
    /// The reference limit of 5000 slots.
    pub const DEFAULT: Self = Self(NonZeroUsize::MIN.saturating_add(DEFAULT_MAX_SLOTS - 1));

    /// Limit of exactly `max_slots` receiver slots.
    #[must_use]
    pub const fn new(max_slots: NonZeroUsize) -> Self {
        Self(max_slots)
    }

    /// Limit from a plain count, or `None` when `max_slots` is zero.
    #[must_use]
    pub fn from_count(max_slots: usize) -> Option<Self> {
        NonZeroUsize::new(max_slots).map(Self)
    }

    /// Maximum number of receiver slots.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for SlotLimit {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Draws balanced assignments under self, duplicate, and exclusion
/// constraints.
///
/// The generator holds no state besides its budget; concurrent calls share
/// nothing and each call owns its pool and partial result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssignmentGenerator {
    budget: AttemptBudget,
    slot_limit: SlotLimit,
}

impl AssignmentGenerator {
    /// Generator with the default budget of 1000 attempts and the default
    /// limit of 5000 receiver slots.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator with a custom attempt budget.
    #[must_use]
    pub const fn with_budget(budget: AttemptBudget) -> Self {
        Self {
            budget,
            slot_limit: SlotLimit::DEFAULT,
        }
    }

    /// Replace the cap on receiver slots per draw.
    #[must_use]
    pub const fn with_slot_limit(mut self, slot_limit: SlotLimit) -> Self {
        self.slot_limit = slot_limit;
        self
    }

    /// The configured attempt budget.
    #[must_use]
    pub const fn budget(&self) -> AttemptBudget {
        self.budget
    }

    /// The configured cap on receiver slots per draw.
    #[must_use]
    pub const fn slot_limit(&self) -> SlotLimit {
        self.slot_limit
    }

    /// Draw an assignment using the thread-local CSPRNG.
    ///
    /// # Errors
    ///
    /// Returns [`PairingError::InvalidConfiguration`] when the request cannot
    /// be satisfied by any draw, and [`PairingError::Infeasible`] when every
    /// attempt in the budget failed.
    pub fn generate(
        &self,
        participants: &[Participant],
        giftee_count: usize,
        exclusions: &[Exclusion],
    ) -> Result<Assignment, PairingError> {
        self.generate_with_rng(participants, giftee_count, exclusions, &mut rand::rng())
    }

    /// Draw an assignment using the supplied random source.
    ///
    /// Seeded generators make draws reproducible.
    ///
    /// # Errors
    ///
    /// See [`Self::generate`].
    ///
    /// # Examples
    ///
    /// ```
    /// use pairing::{AssignmentGenerator, Participant};
    /// use rand::SeedableRng;
    /// use rand_chacha::ChaCha8Rng;
    ///
    /// let participants: Vec<Participant> = ["Ada", "Brian", "Chloe"]
    ///     .iter()
    ///     .map(|name| Participant::new(name).expect("valid name"))
    ///     .collect();
    /// let generator = AssignmentGenerator::new();
    ///
    /// let first = generator
    ///     .generate_with_rng(&participants, 1, &[], &mut ChaCha8Rng::seed_from_u64(7))
    ///     .expect("feasible");
    /// let second = generator
    ///     .generate_with_rng(&participants, 1, &[], &mut ChaCha8Rng::seed_from_u64(7))
    ///     .expect("feasible");
    /// assert_eq!(first, second);
    /// ```
    pub fn generate_with_rng<R>(
        &self,
        participants: &[Participant],
        giftee_count: usize,
        exclusions: &[Exclusion],
        rng: &mut R,
    ) -> Result<Assignment, PairingError>
    where
        R: Rng + ?Sized,
    {
        validate(participants, giftee_count, self.slot_limit)?;
        let forbidden = forbidden_receivers(participants, exclusions);

        for attempt in 1..=self.budget.get() {
            if let Some(drawn) = attempt_draw(giftee_count, &forbidden, rng) {
                return Ok(Assignment::from_indices(
                    participants,
                    giftee_count,
                    attempt,
                    drawn,
                ));
            }
        }

        Err(PairingError::Infeasible {
            attempts: self.budget.get(),
        })
    }
}

/// Draw with the default generator and the thread-local CSPRNG.
///
/// # Errors
///
/// See [`AssignmentGenerator::generate`].
pub fn generate_assignment(
    participants: &[Participant],
    giftee_count: usize,
    exclusions: &[Exclusion],
) -> Result<Assignment, PairingError> {
    AssignmentGenerator::new().generate(participants, giftee_count, exclusions)
}

/// Size checks run first so nothing proportional to the input is allocated
/// for a request that will be rejected.
fn validate(
    participants: &[Participant],
    giftee_count: usize,
    slot_limit: SlotLimit,
) -> Result<(), ConfigurationError> {
    let count = participants.len();
    if count < MIN_PARTICIPANTS {
        return Err(ConfigurationError::TooFewParticipants { count });
    }
    if giftee_count == 0 {
        return Err(ConfigurationError::ZeroGifteeCount);
    }
    if giftee_count >= count {
        return Err(ConfigurationError::GifteeCountTooLarge {
            giftee_count,
            participants: count,
        });
    }
    let slots = count.saturating_mul(giftee_count);
    if slots > slot_limit.get() {
        return Err(ConfigurationError::DrawTooLarge {
            participants: count,
            giftee_count,
            max_slots: slot_limit.get(),
        });
    }

    let mut seen = HashSet::with_capacity(count);
    if let Some(duplicate) = participants
        .iter()
        .find(|participant| !seen.insert(*participant))
    {
        return Err(ConfigurationError::DuplicateParticipant {
            name: duplicate.to_string(),
        });
    }
    Ok(())
}

/// Forbidden receiver indices per giver index.
///
/// Exclusions naming someone outside the draw can never apply and are
/// dropped.
fn forbidden_receivers(
    participants: &[Participant],
    exclusions: &[Exclusion],
) -> Vec<HashSet<usize>> {
    let index: HashMap<&Participant, usize> = participants
        .iter()
        .enumerate()
        .map(|(position, participant)| (participant, position))
        .collect();

    let mut forbidden = vec![HashSet::new(); participants.len()];
    for exclusion in exclusions {
        let (Some(&giver), Some(&receiver)) =
            (index.get(exclusion.giver()), index.get(exclusion.receiver()))
        else {
            continue;
        };
        if let Some(set) = forbidden.get_mut(giver) {
            set.insert(receiver);
        }
    }
    forbidden
}

/// One shuffle of the pool. Returns receiver indices per giver index, or
/// `None` when some giver ran out of usable slots.
fn attempt_draw<R>(
    giftee_count: usize,
    forbidden: &[HashSet<usize>],
    rng: &mut R,
) -> Option<Vec<Vec<usize>>>
where
    R: Rng + ?Sized,
{
    let count = forbidden.len();
    let mut pool: Vec<usize> = (0..giftee_count).flat_map(|_| 0..count).collect();
    pool.shuffle(rng);
    let mut givers: Vec<usize> = (0..count).collect();
    givers.shuffle(rng);

    let mut drawn = vec![Vec::with_capacity(giftee_count); count];
    for giver in givers {
        let excluded = forbidden.get(giver)?;
        let receivers = drawn.get_mut(giver)?;
        for _ in 0..giftee_count {
            let slot = pool.iter().position(|&candidate| {
                candidate != giver && !receivers.contains(&candidate) && !excluded.contains(&candidate)
            })?;
            receivers.push(pool.swap_remove(slot));
        }
    }
    Some(drawn)
}
