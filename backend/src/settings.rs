//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `WICHTELN_*` environment variables, or a
//! configuration file, in OrthoConfig's usual precedence order. Every field is
//! optional; accessors apply defaults and validate.

use std::net::{AddrParseError, SocketAddr};

use ortho_config::OrthoConfig;
use pairing::{AttemptBudget, SlotLimit};
use serde::Deserialize;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Configuration values for the HTTP server and draw engine.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "WICHTELN")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Absolute base URL for reveal links, e.g. `https://gifts.example.org/`.
    /// When unset, links are built from each request's scheme and host.
    pub public_base_url: Option<String>,
    /// Upper bound on shuffles per draw before reporting it infeasible.
    pub max_attempts: Option<usize>,
    /// Upper bound on `participants * giftees per person` for one draw.
    pub max_slots: Option<usize>,
}

/// Errors raised while validating [`ServerSettings`].
#[derive(Debug, thiserror::Error)]
pub enum ServerSettingsError {
    /// The bind address is not a socket address.
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        /// Rejected value.
        value: String,
        /// Parser failure.
        #[source]
        source: AddrParseError,
    },
    /// The public base URL does not parse.
    #[error("invalid public base URL '{value}': {source}")]
    InvalidBaseUrl {
        /// Rejected value.
        value: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// The public base URL parses but cannot prefix a path.
    #[error("public base URL '{value}' must be an http or https URL")]
    UnsupportedBaseUrl {
        /// Rejected value.
        value: String,
    },
    /// A zero attempt budget could never produce a draw.
    #[error("max attempts must be at least 1")]
    ZeroAttempts,
    /// A zero slot limit would reject every draw.
    #[error("max slots must be at least 1")]
    ZeroSlots,
}

impl ServerSettings {
    /// The socket address to bind, defaulting to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns [`ServerSettingsError::InvalidBindAddr`] for unparsable input.
    pub fn bind_addr(&self) -> Result<SocketAddr, ServerSettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|source| ServerSettingsError::InvalidBindAddr {
                value: value.to_owned(),
                source,
            })
    }

    /// The configured base URL for reveal links, normalised to end in `/`.
    ///
    /// # Errors
    /// Returns [`ServerSettingsError::InvalidBaseUrl`] or
    /// [`ServerSettingsError::UnsupportedBaseUrl`].
    pub fn public_base_url(&self) -> Result<Option<Url>, ServerSettingsError> {
        let Some(value) = self.public_base_url.as_deref() else {
            return Ok(None);
        };
        let mut url = Url::parse(value).map_err(|source| ServerSettingsError::InvalidBaseUrl {
            value: value.to_owned(),
            source,
        })?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(ServerSettingsError::UnsupportedBaseUrl {
                value: value.to_owned(),
            });
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        url.set_query(None);
        url.set_fragment(None);
        Ok(Some(url))
    }

    /// The generator's attempt budget, defaulting to 1000.
    ///
    /// # Errors
    /// Returns [`ServerSettingsError::ZeroAttempts`] for a budget of zero.
    pub fn attempt_budget(&self) -> Result<AttemptBudget, ServerSettingsError> {
        match self.max_attempts {
            None => Ok(AttemptBudget::default()),
            Some(count) => AttemptBudget::from_count(count).ok_or(ServerSettingsError::ZeroAttempts),
        }
    }

    /// The cap on receiver slots per draw, defaulting to 5000.
    ///
    /// # Errors
    /// Returns [`ServerSettingsError::ZeroSlots`] for a limit of zero.
    pub fn slot_limit(&self) -> Result<SlotLimit, ServerSettingsError> {
        match self.max_slots {
            None => Ok(SlotLimit::default()),
            Some(count) => SlotLimit::from_count(count).ok_or(ServerSettingsError::ZeroSlots),
        }
    }
}
