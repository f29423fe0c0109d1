//! HTTP inbound adapter.
//!
//! ```text
//! GET  /                      draw form
//! POST /                      run a draw, render links
//! GET  /reveal/{token}        reveal page
//! POST /api/v1/draws          run a draw (JSON)
//! GET  /api/v1/reveals/{token} open a token (JSON)
//! GET  /health/ready, /health/live
//! ```

pub mod draws;
pub mod error;
pub mod form;
pub mod health;
pub mod links;
pub mod pages;
pub mod reveals;
pub mod schemas;
pub mod state;

pub use error::ApiResult;

use actix_web::web;

/// Largest urlencoded draw form accepted, in bytes.
pub const FORM_BODY_LIMIT: usize = 64 * 1024;

/// Largest JSON request body accepted, in bytes.
pub const JSON_BODY_LIMIT: usize = 256 * 1024;

/// Register the draw, reveal, and JSON API routes.
///
/// Health probes are registered separately because they depend on
/// [`health::HealthState`] rather than [`state::HttpState`].
///
/// # Examples
/// ```no_run
/// use actix_web::{App, web};
/// use backend::inbound::http::{configure, state::HttpState};
///
/// fn app(state: HttpState) -> App<
///     impl actix_web::dev::ServiceFactory<
///         actix_web::dev::ServiceRequest,
///         Config = (),
///         Response = actix_web::dev::ServiceResponse,
///         Error = actix_web::Error,
///         InitError = (),
///     >,
/// > {
///     App::new().app_data(web::Data::new(state)).configure(configure)
/// }
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_BODY_LIMIT)
            .error_handler(error::json_error_handler),
    )
    .app_data(
        web::FormConfig::default()
            .limit(FORM_BODY_LIMIT)
            .error_handler(form::form_error_handler),
    )
    .service(form::show_draw_form)
        .service(form::submit_draw_form)
        .service(form::show_reveal)
        .service(
            web::scope("/api/v1")
                .service(draws::create_draw)
                .service(reveals::get_reveal),
        );
}
