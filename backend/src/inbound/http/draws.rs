//! Draw API handler.
//!
//! ```text
//! POST /api/v1/draws {"participants":["Ada","Brian","Chloe"],"gifteeCount":1,
//!                     "exclusions":[{"giver":"Ada","receiver":"Brian"}]}
//! ```

use actix_web::{HttpRequest, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{DEFAULT_GIFTEE_COUNT, DrawRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

const fn default_giftee_count() -> usize {
    DEFAULT_GIFTEE_COUNT
}

/// One directed exclusion: `giver` must not draw `receiver`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ExclusionBody {
    /// Participant who gives.
    #[schema(example = "Ada")]
    pub giver: String,
    /// Participant they must not draw.
    #[schema(example = "Brian")]
    pub receiver: String,
}

/// Request body for `POST /api/v1/draws`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DrawRequestBody {
    /// Participant names in the order links are returned.
    #[schema(example = json!(["Ada", "Brian", "Chloe"]))]
    pub participants: Vec<String>,
    /// Receivers per giver.
    #[serde(default = "default_giftee_count")]
    #[schema(default = 1, minimum = 1)]
    pub giftee_count: usize,
    /// Directed exclusions; add both directions to keep a pair apart.
    #[serde(default)]
    pub exclusions: Vec<ExclusionBody>,
}

impl TryFrom<DrawRequestBody> for DrawRequest {
    type Error = crate::domain::DrawInputError;

    fn try_from(value: DrawRequestBody) -> Result<Self, Self::Error> {
        Self::from_parts(
            value.participants,
            value.giftee_count,
            value
                .exclusions
                .into_iter()
                .map(|exclusion| (exclusion.giver, exclusion.receiver)),
        )
    }
}

/// One giver's private link.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct DrawLinkBody {
    /// Participant the link belongs to.
    #[schema(example = "Ada")]
    pub giver: String,
    /// Opaque reveal token.
    pub token: String,
    /// Absolute URL of the reveal page.
    #[schema(example = "https://gifts.example.org/reveal/AQ3k...")]
    pub link: String,
}

/// Response body for `POST /api/v1/draws`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DrawResponseBody {
    /// Receivers per giver.
    pub giftee_count: usize,
    /// Shuffles the generator needed.
    pub attempts: usize,
    /// One link per participant, in submission order.
    pub draws: Vec<DrawLinkBody>,
}

/// Run a draw and return one sealed reveal link per participant.
///
/// The response never contains assignments in clear text; each giver's
/// receivers are only visible by opening their link.
#[utoipa::path(
    post,
    path = "/api/v1/draws",
    request_body = DrawRequestBody,
    responses(
        (status = 200, description = "Draw completed", body = DrawResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 422, description = "No valid draw within the attempt budget", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["draws"],
    operation_id = "createDraw"
)]
#[post("/draws")]
pub async fn create_draw(
    state: web::Data<HttpState>,
    req: HttpRequest,
    payload: web::Json<DrawRequestBody>,
) -> ApiResult<web::Json<DrawResponseBody>> {
    let request = DrawRequest::try_from(payload.into_inner())?;
    let outcome = state.draw(request).await?;
    let draws = outcome
        .entries
        .into_iter()
        .map(|entry| {
            let link = state.links.reveal_link(&req, &entry.token)?;
            Ok(DrawLinkBody {
                giver: entry.giver.into_inner(),
                token: entry.token.into_inner(),
                link: link.into(),
            })
        })
        .collect::<ApiResult<Vec<_>>>()?;
    Ok(web::Json(DrawResponseBody {
        giftee_count: outcome.giftee_count,
        attempts: outcome.attempts,
        draws,
    }))
}
