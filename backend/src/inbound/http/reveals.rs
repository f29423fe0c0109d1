//! Reveal API handler.
//!
//! ```text
//! GET /api/v1/reveals/{token}
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::RevealPayload;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Response body for `GET /api/v1/reveals/{token}`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RevealBody {
    /// Participant the link was issued to.
    #[schema(example = "Ada")]
    pub giver: String,
    /// Participants they buy for.
    #[schema(example = json!(["Brian"]))]
    pub receivers: Vec<String>,
}

impl From<RevealPayload> for RevealBody {
    fn from(value: RevealPayload) -> Self {
        Self {
            giver: value.giver().as_str().to_owned(),
            receivers: value
                .receivers()
                .iter()
                .map(|receiver| receiver.as_str().to_owned())
                .collect(),
        }
    }
}

/// Open a reveal token.
///
/// Malformed, tampered, and foreign-key tokens are indistinguishable and all
/// yield `invalid_token`.
#[utoipa::path(
    get,
    path = "/api/v1/reveals/{token}",
    params(("token" = String, Path, description = "Token from a draw link")),
    responses(
        (status = 200, description = "Assignment for the token's giver", body = RevealBody),
        (status = 400, description = "Invalid or corrupted token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["reveals"],
    operation_id = "getReveal"
)]
#[get("/reveals/{token}")]
pub async fn get_reveal(
    state: web::Data<HttpState>,
    token: web::Path<String>,
) -> ApiResult<web::Json<RevealBody>> {
    let payload = state.reveals.reveal(&token)?;
    Ok(web::Json(payload.into()))
}
