//! Absolute reveal links.

use actix_web::HttpRequest;
use tracing::error;
use url::Url;

use crate::domain::{Error, RevealToken};

/// Builds `{base}reveal/{token}` links.
///
/// With a configured base URL every link uses it. Without one, the base is
/// taken from the request's scheme and host (honouring `Forwarded` and
/// `X-Forwarded-*` headers), which suits a single host behind a proxy.
#[derive(Debug, Clone, Default)]
pub struct LinkBuilder {
    base: Option<Url>,
}

impl LinkBuilder {
    /// Use `base` for every link, or the request's own origin when `None`.
    ///
    /// `base` should end in `/`; `crate::settings::ServerSettings` normalises
    /// it that way.
    #[must_use]
    pub fn new(base: Option<Url>) -> Self {
        Self { base }
    }

    /// Absolute link that opens `token`.
    ///
    /// # Errors
    /// Returns an internal error if the request origin does not form a URL.
    pub fn reveal_link(&self, req: &HttpRequest, token: &RevealToken) -> Result<Url, Error> {
        let base = match &self.base {
            Some(base) => base.clone(),
            None => request_origin(req)?,
        };
        base.join(&format!("reveal/{token}")).map_err(|err| {
            error!(error = %err, "failed to build reveal link");
            Error::internal("failed to build reveal link")
        })
    }
}

fn request_origin(req: &HttpRequest) -> Result<Url, Error> {
    let info = req.connection_info();
    let origin = format!("{}://{}/", info.scheme(), info.host());
    Url::parse(&origin).map_err(|err| {
        error!(error = %err, "request origin is not a valid URL");
        Error::internal("failed to build reveal link")
    })
}
