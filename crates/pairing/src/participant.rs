//! Participant identities and directed exclusion constraints.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation failures raised when constructing a [`Participant`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParticipantError {
    /// The name was empty once surrounding whitespace was removed.
    #[error("participant name must not be empty")]
    Empty,
}

/// A member of the gift exchange, identified by name.
///
/// Names are trimmed on construction and compared exactly, so `"Ada"` and
/// `"ada"` are different participants.
///
/// # Examples
///
/// ```
/// use pairing::Participant;
///
/// let ada = Participant::new("  Ada ").expect("valid name");
/// assert_eq!(ada.as_str(), "Ada");
/// assert!(Participant::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Participant(String);

impl Participant {
    /// Build a participant from a display name.
    ///
    /// # Errors
    ///
    /// Returns [`ParticipantError::Empty`] when the trimmed name is empty.
    pub fn new(name: impl AsRef<str>) -> Result<Self, ParticipantError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ParticipantError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the participant's name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Consume the participant, returning the owned name.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for Participant {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Participant {
    type Error = ParticipantError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Participant> for String {
    fn from(value: Participant) -> Self {
        value.0
    }
}

/// Directed rule forbidding `giver` from drawing `receiver`.
///
/// The reverse direction is unaffected. Rules whose giver is not part of the
/// draw are ignored by the generator rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Exclusion {
    giver: Participant,
    receiver: Participant,
}

impl Exclusion {
    /// Forbid `giver` from drawing `receiver`.
    #[must_use]
    pub fn new(giver: Participant, receiver: Participant) -> Self {
        Self { giver, receiver }
    }

    /// Forbid `first` and `second` from drawing each other.
    ///
    /// # Examples
    ///
    /// ```
    /// use pairing::{Exclusion, Participant};
    ///
    /// let ada = Participant::new("Ada").expect("valid name");
    /// let brian = Participant::new("Brian").expect("valid name");
    /// let [forward, backward] = Exclusion::mutual(ada.clone(), brian.clone());
    ///
    /// assert_eq!(forward.giver(), &ada);
    /// assert_eq!(backward.giver(), &brian);
    /// ```
    #[must_use]
    pub fn mutual(first: Participant, second: Participant) -> [Self; 2] {
        [
            Self::new(first.clone(), second.clone()),
            Self::new(second, first),
        ]
    }

    /// The participant who must not give to [`Self::receiver`].
    #[must_use]
    pub fn giver(&self) -> &Participant {
        &self.giver
    }

    /// The participant [`Self::giver`] must not draw.
    #[must_use]
    pub fn receiver(&self) -> &Participant {
        &self.receiver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Ada", "Ada")]
    #[case("  Brian\t", "Brian")]
    #[case("Chloe Dubois", "Chloe Dubois")]
    fn names_are_trimmed(#[case] raw: &str, #[case] expected: &str) {
        let participant = Participant::new(raw).expect("valid name");
        assert_eq!(participant.as_str(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn blank_names_are_rejected(#[case] raw: &str) {
        assert_eq!(Participant::new(raw), Err(ParticipantError::Empty));
    }

    #[rstest]
    fn serde_round_trips_through_plain_string() {
        let participant = Participant::new("Ada").expect("valid name");
        let json = serde_json::to_string(&participant).expect("serialise");
        assert_eq!(json, "\"Ada\"");
        let decoded: Participant = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(decoded, participant);
    }

    #[rstest]
    fn deserialising_blank_name_fails() {
        let result = serde_json::from_str::<Participant>("\"  \"");
        assert!(result.is_err());
    }

    #[rstest]
    fn exclusion_is_directional() {
        let ada = Participant::new("Ada").expect("valid name");
        let brian = Participant::new("Brian").expect("valid name");
        let exclusion = Exclusion::new(ada.clone(), brian.clone());

        assert_eq!(exclusion.giver(), &ada);
        assert_eq!(exclusion.receiver(), &brian);
        assert_ne!(exclusion, Exclusion::new(brian, ada));
    }
}
