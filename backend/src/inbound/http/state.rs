//! Shared HTTP adapter state.
//!
//! Handlers accept this via `actix_web::web::Data` so they only depend on
//! domain ports and remain testable with mocks.

use std::sync::Arc;

use actix_web::web;
use tracing::{Span, error};

use crate::domain::ports::{DrawCommand, DrawOutcome, RevealQuery};
use crate::domain::{DrawRequest, Error, TraceId};
use crate::inbound::http::links::LinkBuilder;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Draw use case.
    pub draws: Arc<dyn DrawCommand>,
    /// Reveal use case.
    pub reveals: Arc<dyn RevealQuery>,
    /// Builds absolute reveal links.
    pub links: LinkBuilder,
}

impl HttpState {
    /// Bundle the ports handlers need.
    #[must_use]
    pub fn new(
        draws: Arc<dyn DrawCommand>,
        reveals: Arc<dyn RevealQuery>,
        links: LinkBuilder,
    ) -> Self {
        Self {
            draws,
            reveals,
            links,
        }
    }

    /// Run a draw on actix's blocking thread pool.
    ///
    /// The search is CPU-bound, so it must not occupy an async worker. The
    /// request's span and trace id follow the draw onto the pool thread.
    ///
    /// # Errors
    /// Returns the draw's own error, or [`Error::internal`] when the pool
    /// task is cancelled or panics.
    pub async fn draw(&self, request: DrawRequest) -> Result<DrawOutcome, Error> {
        let draws = Arc::clone(&self.draws);
        let span = Span::current();
        let trace_id = TraceId::current();
        let result = web::block(move || span.in_scope(|| draws.draw(request)))
            .await
            .unwrap_or_else(|err| {
                error!(error = %err, "draw task failed");
                Err(Error::internal("draw task failed"))
            });
        result.map_err(|err| match trace_id {
            Some(id) if err.trace_id().is_none() => err.with_trace_id(id.to_string()),
            _ => err,
        })
    }
}
