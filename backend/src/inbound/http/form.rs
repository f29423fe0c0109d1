//! HTML form handlers.
//!
//! ```text
//! GET  /               draw form
//! POST /               run a draw and list the reveal links
//! GET  /reveal/{token} show one giver's receivers
//! ```

use actix_web::error::{InternalError, UrlencodedError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use pairing::Participant;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::domain::{DrawRequest, Error};
use crate::inbound::http::error::{redact_if_internal, status_for};
use crate::inbound::http::pages::{
    FormValues, html_response, index_page, reveal_error_page, reveal_page, results_page,
};
use crate::inbound::http::state::HttpState;

/// Message shown when the names field is empty.
pub const MISSING_NAMES_MESSAGE: &str = "Please enter names.";

/// Message shown when the form body exceeds the configured limit.
pub const FORM_TOO_LARGE_MESSAGE: &str =
    "The form is too large. Enter fewer names or exclusions.";

/// Message shown when the form body cannot be decoded.
pub const FORM_UNREADABLE_MESSAGE: &str = "The form could not be read. Please try again.";

/// Urlencoded draw form fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DrawForm {
    /// One participant per line.
    #[serde(default)]
    pub names: String,
    /// Receivers per giver; blank means one.
    #[serde(default)]
    pub n_giftees: String,
    /// One `Giver, Receiver` pair per line.
    #[serde(default)]
    pub exclusions: String,
}

impl DrawForm {
    fn values(&self) -> FormValues<'_> {
        FormValues {
            names: &self.names,
            giftee_count: &self.n_giftees,
            exclusions: &self.exclusions,
        }
    }
}

fn form_error(form: &DrawForm, error: &Error) -> HttpResponse {
    let shown = redact_if_internal(error);
    html_response(
        status_for(error.code()),
        index_page(&form.values(), Some(shown.message())),
    )
}

/// Render the draw form for bodies the urlencoded extractor rejects.
///
/// Oversized bodies answer 413, anything else 400. The submitted values are
/// not echoed back since they could not be decoded.
pub(crate) fn form_error_handler(err: UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected form body");
    let (status, message) = match err {
        UrlencodedError::Overflow { .. } => (StatusCode::PAYLOAD_TOO_LARGE, FORM_TOO_LARGE_MESSAGE),
        _ => (StatusCode::BAD_REQUEST, FORM_UNREADABLE_MESSAGE),
    };
    let page = html_response(status, index_page(&FormValues::default(), Some(message)));
    InternalError::from_response(err, page).into()
}

/// Render an empty draw form.
#[get("/")]
pub async fn show_draw_form() -> HttpResponse {
    html_response(StatusCode::OK, index_page(&FormValues::default(), None))
}

/// Run a draw from the submitted form.
///
/// Failures re-render the form with the submitted values and the reason.
#[post("/")]
pub async fn submit_draw_form(
    state: web::Data<HttpState>,
    req: HttpRequest,
    form: web::Form<DrawForm>,
) -> HttpResponse {
    let form = form.into_inner();
    if form.names.trim().is_empty() {
        return form_error(&form, &Error::invalid_request(MISSING_NAMES_MESSAGE));
    }
    match run_draw(&state, &req, &form).await {
        Ok(links) => html_response(StatusCode::OK, results_page(&links)),
        Err(error) => form_error(&form, &error),
    }
}

async fn run_draw(
    state: &HttpState,
    req: &HttpRequest,
    form: &DrawForm,
) -> Result<Vec<(Participant, Url)>, Error> {
    let request = DrawRequest::from_text(&form.names, &form.n_giftees, &form.exclusions)?;
    let outcome = state.draw(request).await?;
    outcome
        .entries
        .into_iter()
        .map(|entry| {
            let link = state.links.reveal_link(req, &entry.token)?;
            Ok((entry.giver, link))
        })
        .collect()
}

/// Show the receivers sealed in `token`.
#[get("/reveal/{token}")]
pub async fn show_reveal(state: web::Data<HttpState>, token: web::Path<String>) -> HttpResponse {
    match state.reveals.reveal(&token) {
        Ok(payload) => html_response(StatusCode::OK, reveal_page(&payload)),
        Err(error) => {
            let shown = redact_if_internal(&error);
            html_response(status_for(error.code()), reveal_error_page(shown.message()))
        }
    }
}
