//! Domain layer for the gift-exchange service.
//!
//! Draw requests are normalised here, handed to the `pairing` generator, and
//! each giver's receivers are sealed into an opaque reveal token. Nothing in
//! this module knows about HTTP: inbound adapters drive the use cases through
//! [`ports::DrawCommand`] and [`ports::RevealQuery`], and the sealing codec is
//! a driven port ([`ports::RevealCodec`]) implemented in `crate::outbound`.

pub mod draw;
pub mod draw_service;
pub mod error;
pub mod ports;
pub mod reveal;
pub mod reveal_service;
pub mod trace_id;

pub use self::draw::{
    DEFAULT_GIFTEE_COUNT, DrawInputError, DrawRequest, parse_exclusions, parse_giftee_count,
    parse_participants,
};
pub use self::draw_service::{DrawService, INFEASIBLE_MESSAGE};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::reveal::{RevealPayload, RevealToken};
pub use self::reveal_service::{INVALID_TOKEN_MESSAGE, RevealService};
pub use self::trace_id::TraceId;
