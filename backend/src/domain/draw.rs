//! Normalisation of raw draw input into a [`DrawRequest`].
//!
//! Two inbound shapes feed the same request type. The HTML form supplies free
//! text: one name per line, one `giver, receiver` exclusion per line, and the
//! giftee count as a string. The JSON API supplies lists. Free text is parsed
//! leniently (blank and malformed lines are skipped) while the structured
//! shape rejects blank entries, since a client sending an empty string in a
//! list has a bug worth reporting.

use pairing::{Exclusion, Participant, ParticipantError};
use serde_json::json;

use super::Error;

/// Giftee count used when the form field is left empty.
pub const DEFAULT_GIFTEE_COUNT: usize = 1;

/// Input rejected before it reaches the generator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DrawInputError {
    /// The giftee count was not a non-negative whole number.
    #[error("number of giftees must be a whole number, got '{value}'")]
    InvalidGifteeCount {
        /// The rejected input.
        value: String,
    },
    /// A structured participant list contained a blank name.
    #[error("participant {index} has an empty name")]
    BlankParticipant {
        /// Zero-based position in the list.
        index: usize,
    },
    /// A structured exclusion named a blank giver or receiver.
    #[error("exclusion {index} has an empty giver or receiver")]
    BlankExclusion {
        /// Zero-based position in the list.
        index: usize,
    },
}

impl From<DrawInputError> for Error {
    fn from(value: DrawInputError) -> Self {
        let details = match &value {
            DrawInputError::InvalidGifteeCount { value } => json!({
                "field": "gifteeCount",
                "value": value,
                "code": "invalid_giftee_count",
            }),
            DrawInputError::BlankParticipant { index } => json!({
                "field": "participants",
                "index": index,
                "code": "blank_participant",
            }),
            DrawInputError::BlankExclusion { index } => json!({
                "field": "exclusions",
                "index": index,
                "code": "blank_exclusion",
            }),
        };
        Self::invalid_request(value.to_string()).with_details(details)
    }
}

/// Parse one participant per line, trimming each and skipping blank lines.
///
/// Duplicates are kept so the generator can report them.
///
/// # Examples
/// ```
/// use backend::domain::parse_participants;
///
/// let names = parse_participants("Ada\n\n  Brian \r\nChloe");
/// let names: Vec<&str> = names.iter().map(|p| p.as_str()).collect();
/// assert_eq!(names, ["Ada", "Brian", "Chloe"]);
/// ```
#[must_use]
pub fn parse_participants(text: &str) -> Vec<Participant> {
    text.lines()
        .filter_map(|line| Participant::new(line).ok())
        .collect()
}

/// Parse one `giver, receiver` exclusion per line.
///
/// Only the first two comma-separated fields are used. Lines without a comma,
/// or with a blank giver or receiver, are skipped.
///
/// # Examples
/// ```
/// use backend::domain::parse_exclusions;
///
/// let rules = parse_exclusions("Ada, Brian\nno comma here\nChloe,Dev,ignored");
/// assert_eq!(rules.len(), 2);
/// assert_eq!(rules[1].receiver().as_str(), "Dev");
/// ```
#[must_use]
pub fn parse_exclusions(text: &str) -> Vec<Exclusion> {
    text.lines().filter_map(parse_exclusion_line).collect()
}

fn parse_exclusion_line(line: &str) -> Option<Exclusion> {
    let mut fields = line.split(',');
    let giver = Participant::new(fields.next()?).ok()?;
    let receiver = Participant::new(fields.next()?).ok()?;
    Some(Exclusion::new(giver, receiver))
}

/// Parse the giftee count field; blank input means [`DEFAULT_GIFTEE_COUNT`].
///
/// Zero parses successfully and is rejected later by the generator.
///
/// # Errors
/// Returns [`DrawInputError::InvalidGifteeCount`] for anything that is not a
/// non-negative integer.
pub fn parse_giftee_count(raw: &str) -> Result<usize, DrawInputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(DEFAULT_GIFTEE_COUNT);
    }
    trimmed
        .parse()
        .map_err(|_| DrawInputError::InvalidGifteeCount {
            value: trimmed.to_owned(),
        })
}

/// A normalised draw request ready for the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawRequest {
    participants: Vec<Participant>,
    giftee_count: usize,
    exclusions: Vec<Exclusion>,
}

impl DrawRequest {
    /// Assemble a request from already-validated parts.
    #[must_use]
    pub fn new(
        participants: Vec<Participant>,
        giftee_count: usize,
        exclusions: Vec<Exclusion>,
    ) -> Self {
        Self {
            participants,
            giftee_count,
            exclusions,
        }
    }

    /// Build a request from the three free-text form fields.
    ///
    /// # Errors
    /// Returns [`DrawInputError::InvalidGifteeCount`] when the count field is
    /// not a whole number.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::DrawRequest;
    ///
    /// let request = DrawRequest::from_text("Ada\nBrian\nChloe", "", "Ada, Brian")
    ///     .expect("valid form");
    /// assert_eq!(request.participants().len(), 3);
    /// assert_eq!(request.giftee_count(), 1);
    /// assert_eq!(request.exclusions().len(), 1);
    /// ```
    pub fn from_text(
        names: &str,
        giftee_count: &str,
        exclusions: &str,
    ) -> Result<Self, DrawInputError> {
        Ok(Self::new(
            parse_participants(names),
            parse_giftee_count(giftee_count)?,
            parse_exclusions(exclusions),
        ))
    }

    /// Build a request from structured lists.
    ///
    /// # Errors
    /// Returns [`DrawInputError::BlankParticipant`] or
    /// [`DrawInputError::BlankExclusion`] for the first blank entry found.
    pub fn from_parts<N, E>(
        names: N,
        giftee_count: usize,
        exclusions: E,
    ) -> Result<Self, DrawInputError>
    where
        N: IntoIterator<Item = String>,
        E: IntoIterator<Item = (String, String)>,
    {
        let participants = names
            .into_iter()
            .enumerate()
            .map(|(index, name)| {
                Participant::new(name).map_err(|_| DrawInputError::BlankParticipant { index })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let exclusions = exclusions
            .into_iter()
            .enumerate()
            .map(|(index, (giver, receiver))| -> Result<Exclusion, DrawInputError> {
                let blank = |_: ParticipantError| DrawInputError::BlankExclusion { index };
                Ok(Exclusion::new(
                    Participant::new(giver).map_err(blank)?,
                    Participant::new(receiver).map_err(blank)?,
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(participants, giftee_count, exclusions))
    }

    /// Participants in submission order.
    #[must_use]
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Receivers each giver must draw.
    #[must_use]
    pub fn giftee_count(&self) -> usize {
        self.giftee_count
    }

    /// Directed exclusions.
    #[must_use]
    pub fn exclusions(&self) -> &[Exclusion] {
        &self.exclusions
    }
}
