//! OpenAPI documentation for the JSON API.
//!
//! [`ApiDoc`] registers the draw, reveal, and health endpoints together with
//! the error envelope wrappers from [`crate::inbound::http::schemas`], which
//! keep the domain free of utoipa. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` writes it out for external tooling.

use crate::inbound::http::draws::{DrawLinkBody, DrawRequestBody, DrawResponseBody, ExclusionBody};
use crate::inbound::http::reveals::RevealBody;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Wichteln backend API",
        description = "Gift exchange draws with encrypted, per-participant reveal links.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::draws::create_draw,
        crate::inbound::http::reveals::get_reveal,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        DrawRequestBody,
        ExclusionBody,
        DrawResponseBody,
        DrawLinkBody,
        RevealBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "draws", description = "Run a draw and issue reveal links"),
        (name = "reveals", description = "Open a reveal token"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
