//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::cookie::Key;
use pairing::{AssignmentGenerator, AttemptBudget, SlotLimit};
use url::Url;

use backend::domain::ports::RevealCodec;
use backend::outbound::reveal_token::XChaChaRevealCodec;

/// Everything [`super::create_server`] needs to assemble the app.
pub struct ServerConfig {
    pub(crate) codec: Arc<dyn RevealCodec>,
    pub(crate) generator: AssignmentGenerator,
    pub(crate) public_base_url: Option<Url>,
    pub(crate) bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Configure a server sealing tokens with `key`.
    #[must_use]
    pub fn new(key: &Key, bind_addr: SocketAddr) -> Self {
        Self {
            codec: Arc::new(XChaChaRevealCodec::new(key)),
            generator: AssignmentGenerator::new(),
            public_base_url: None,
            bind_addr,
        }
    }

    /// Cap the shuffles spent on each draw.
    #[must_use]
    pub fn with_attempt_budget(mut self, budget: AttemptBudget) -> Self {
        self.generator =
            AssignmentGenerator::with_budget(budget).with_slot_limit(self.generator.slot_limit());
        self
    }

    /// Cap `participants * giftees per person` for each draw.
    #[must_use]
    pub fn with_slot_limit(mut self, slot_limit: SlotLimit) -> Self {
        self.generator = self.generator.with_slot_limit(slot_limit);
        self
    }

    /// Build reveal links from `base` instead of the request host.
    #[must_use]
    pub fn with_public_base_url(mut self, base: Option<Url>) -> Self {
        self.public_base_url = base;
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(any(test, doctest)),
        expect(
            dead_code,
            reason = "Exercised by bootstrap tests; retained for fixture access"
        )
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
