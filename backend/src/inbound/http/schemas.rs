//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror the JSON shape of their domain counterparts and live
//! in the inbound adapter where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The resource does not exist or belongs to someone else.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request collides with an existing record.
    #[schema(rename = "conflict")]
    Conflict,
    /// A dependency such as the mail relay or search index is down.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
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
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    #[schema(example = "job payload is invalid")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level problems under `fieldErrors` for validation failures.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "recruiter1")]
    username: String,
    #[schema(example = "recruiter1@example.com")]
    email: String,
    first_name: String,
    last_name: String,
    phone_number: Option<String>,
    /// One of `seeker`, `recruiter` or `admin`.
    #[schema(example = "recruiter")]
    role: String,
    #[schema(example = "2026-01-05T09:30:00Z")]
    date_joined: String,
}

/// OpenAPI schema for [`crate::domain::Job`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Job, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct JobSchema {
    #[schema(example = "6f0c3bb8-6a36-4d5e-9a31-3f3e1e0b2f10")]
    id: String,
    #[schema(example = "Backend Engineer")]
    title: String,
    description: String,
    #[schema(example = "Remote")]
    location: String,
    /// Annual salary in whole currency units.
    #[schema(example = 90000)]
    salary: Option<i64>,
    /// Identifier of the posting user.
    posted_by: String,
    #[schema(example = "2026-01-05T09:30:00Z")]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::JobDocument`], a job search hit.
#[derive(ToSchema)]
#[schema(as = crate::domain::JobDocument, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct JobHitSchema {
    id: String,
    title: String,
    description: String,
    location: String,
    salary: Option<i64>,
}

/// OpenAPI schema for an application with its embedded job.
#[derive(ToSchema)]
#[schema(as = crate::domain::ApplicationDetails, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ApplicationSchema {
    id: String,
    job_id: String,
    job: JobSchema,
    applicant: String,
    cover_letter: String,
    /// One of `applied`, `viewed`, `rejected` or `accepted`.
    #[schema(example = "applied")]
    status: String,
    applied_at: String,
}

/// OpenAPI schema for [`crate::domain::Profile`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Profile, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ProfileSchema {
    id: String,
    /// Identifier of the owning user.
    user: String,
    bio: String,
    location: String,
    #[schema(example = "1990-04-01")]
    birth_date: Option<String>,
    /// Comma-separated skills.
    #[schema(example = "rust, sql")]
    skills: String,
    contact: String,
}

/// OpenAPI schema for [`crate::domain::ProfileDocument`], a profile search hit.
#[derive(ToSchema)]
#[schema(as = crate::domain::ProfileDocument, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ProfileHitSchema {
    id: String,
    bio: String,
    username: String,
    email: String,
}
