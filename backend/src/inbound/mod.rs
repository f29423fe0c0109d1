//! Inbound adapters that translate external requests into domain service
//! calls while keeping framework details at the edge.
//!
//! The only transport is HTTP, under [`http`]: an HTML form flow for people
//! and a JSON API for scripts.

pub mod http;
