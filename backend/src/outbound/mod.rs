//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **reveal_token**: authenticated encryption of reveal payloads into
//!   URL-safe tokens, plus loading of the key that protects them
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod reveal_token;
