//! Constrained, balanced gift-exchange assignment generation.
//!
//! Given a group of participants, the number of giftees each participant must
//! buy for, and a list of directed exclusions, this crate produces an
//! [`Assignment`] in which:
//!
//! - every giver has exactly `giftee_count` distinct receivers,
//! - nobody is assigned to themselves,
//! - no excluded `(giver, receiver)` pair is ever drawn, and
//! - every participant receives exactly `giftee_count` gifts overall.
//!
//! The search is a randomised greedy fill with bounded restarts. Exhausting
//! the restart budget is reported as [`PairingError::Infeasible`], which is
//! distinct from the up-front [`PairingError::InvalidConfiguration`] raised
//! for malformed requests.
//!
//! Exclusions are directional: `("Ada", "Brian")` stops Ada drawing Brian but
//! still allows Brian to draw Ada. Couples who must not draw each other need
//! both directions; [`Exclusion::mutual`] builds the pair.
//!
//! # Example
//!
//! ```
//! use pairing::{Exclusion, Participant, generate_assignment};
//!
//! let names = ["Ada", "Brian", "Chloe", "Dev"];
//! let participants: Vec<Participant> = names
//!     .iter()
//!     .map(|name| Participant::new(name).expect("valid name"))
//!     .collect();
//! let exclusions = Exclusion::mutual(
//!     Participant::new("Ada").expect("valid name"),
//!     Participant::new("Brian").expect("valid name"),
//! );
//!
//! let assignment =
//!     generate_assignment(&participants, 1, &exclusions).expect("feasible draw");
//!
//! assert_eq!(assignment.len(), 4);
//! let ada = Participant::new("Ada").expect("valid name");
//! let brian = Participant::new("Brian").expect("valid name");
//! assert!(!assignment.receivers_of(&ada).expect("Ada gives").contains(&brian));
//! ```

mod assignment;
mod error;
mod generator;
mod participant;

pub use assignment::{Assignment, GiftAssignment};
pub use error::{ConfigurationError, PairingError};
pub use generator::{
    AssignmentGenerator, AttemptBudget, MIN_PARTICIPANTS, SlotLimit, generate_assignment,
};
pub use participant::{Exclusion, Participant, ParticipantError};
