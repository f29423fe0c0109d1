//! What a giver sees when they open their link, and the token that hides it.

use std::fmt;

use pairing::{GiftAssignment, Participant};
use serde::{Deserialize, Serialize};

/// Plaintext sealed inside a reveal token: one giver and their receivers.
///
/// Serialised as `{"giver": "...", "receivers": ["..."]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RevealPayload {
    giver: Participant,
    receivers: Vec<Participant>,
}

impl RevealPayload {
    /// Pair a giver with the receivers they drew.
    #[must_use]
    pub fn new(giver: Participant, receivers: Vec<Participant>) -> Self {
        Self { giver, receivers }
    }

    /// The participant buying the gifts.
    #[must_use]
    pub fn giver(&self) -> &Participant {
        &self.giver
    }

    /// The participants they buy for.
    #[must_use]
    pub fn receivers(&self) -> &[Participant] {
        &self.receivers
    }
}

impl From<GiftAssignment> for RevealPayload {
    fn from(value: GiftAssignment) -> Self {
        let (giver, receivers) = value.into_parts();
        Self::new(giver, receivers)
    }
}

/// Opaque, URL-safe token carrying one sealed [`RevealPayload`].
///
/// Only the codec that issued a token can open it; anyone else sees an
/// unstructured string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RevealToken(String);

impl RevealToken {
    /// Wrap an encoded token.
    #[must_use]
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Borrow the encoded token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the token, returning the encoded string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for RevealToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RevealToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
