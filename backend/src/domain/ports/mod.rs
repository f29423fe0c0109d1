//! Domain ports.
//!
//! Driving ports ([`DrawCommand`], [`RevealQuery`]) are what inbound adapters
//! call. The driven port ([`RevealCodec`]) is what the domain needs from the
//! outside world: a way to seal a payload into a token and open it again.

mod draw_command;
mod reveal_codec;
mod reveal_query;

pub use draw_command::{DrawCommand, DrawOutcome, SealedEntry};
pub use reveal_codec::{RevealCodec, RevealCodecError};
pub use reveal_query::RevealQuery;

#[cfg(test)]
pub use draw_command::MockDrawCommand;
#[cfg(test)]
pub use reveal_codec::MockRevealCodec;
#[cfg(test)]
pub use reveal_query::MockRevealQuery;
