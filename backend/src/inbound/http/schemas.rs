//! OpenAPI schema wrappers for domain types.
//!
//! The domain error stays free of utoipa; these mirror its serialised shape
//! so the generated document describes what clients actually receive.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub enum ErrorCodeSchema {
    /// The draw request is malformed or can never be satisfied.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// A reveal token failed decoding or authentication.
    #[schema(rename = "invalid_token")]
    InvalidToken,
    /// No draw satisfied the constraints within the attempt budget.
    #[schema(rename = "infeasible")]
    Infeasible,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "infeasible")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Could not generate valid pairs. Try again or reduce constraints.")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "6f1c8a0e-3b1d-4c55-9a7e-2f0d4b9c1e11")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::PartialSchema;

    fn schema_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises")
    }

    #[test]
    fn error_code_schema_lists_wire_names() {
        assert_eq!(ErrorCodeSchema::name(), "crate.domain.ErrorCode");
        let json = schema_json::<ErrorCodeSchema>();
        for code in ["invalid_request", "invalid_token", "infeasible", "internal_error"] {
            assert!(json.contains(code), "missing {code}");
        }
    }

    #[test]
    fn error_schema_uses_camel_case_fields() {
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        let json = schema_json::<ErrorSchema>();
        assert!(json.contains("traceId"));
        assert!(json.contains("message"));
    }
}
