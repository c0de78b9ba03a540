//! OpenAPI documentation for the job board API.
//!
//! [`ApiDoc`] registers every handler under `/api/v1`, the health checks and
//! the schema wrappers from [`crate::inbound::http::schemas`]. Swagger UI
//! serves it in debug builds and `cargo run --bin openapi-dump` prints it.

use crate::inbound::http::applications::{ApplicationBody, ApplicationPatchBody};
use crate::inbound::http::jobs::{JobBody, JobPatchBody};
use crate::inbound::http::profiles::ProfileBody;
use crate::inbound::http::schemas::{
    ApplicationSchema, ErrorCodeSchema, ErrorSchema, JobHitSchema, JobSchema, ProfileHitSchema,
    ProfileSchema, UserSchema,
};
use crate::inbound::http::users::{LoginRequest, SignupBody};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Job board API",
        description = "Accounts, job postings, applications and seeker profiles behind a session cookie."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::signup,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::jobs::list_jobs,
        crate::inbound::http::jobs::create_job,
        crate::inbound::http::jobs::search_jobs,
        crate::inbound::http::jobs::get_job,
        crate::inbound::http::jobs::update_job,
        crate::inbound::http::jobs::delete_job,
        crate::inbound::http::applications::list_applications,
        crate::inbound::http::applications::create_application,
        crate::inbound::http::applications::get_application,
        crate::inbound::http::applications::update_application,
        crate::inbound::http::applications::delete_application,
        crate::inbound::http::profiles::list_profiles,
        crate::inbound::http::profiles::create_profile,
        crate::inbound::http::profiles::search_profiles,
        crate::inbound::http::profiles::my_profile,
        crate::inbound::http::profiles::update_my_profile,
        crate::inbound::http::profiles::get_profile,
        crate::inbound::http::profiles::update_profile,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UserSchema,
        JobSchema,
        JobHitSchema,
        ApplicationSchema,
        ProfileSchema,
        ProfileHitSchema,
        SignupBody,
        LoginRequest,
        JobBody,
        JobPatchBody,
        ApplicationBody,
        ApplicationPatchBody,
        ProfileBody,
    )),
    tags(
        (name = "users", description = "Signup, login and the user directory"),
        (name = "jobs", description = "Job postings"),
        (name = "applications", description = "Applications to jobs, private to the applicant"),
        (name = "profiles", description = "Seeker profiles"),
        (name = "health", description = "Liveness and readiness checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn object_has_field(schema: &RefOr<Schema>, field: &str) -> bool {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj.properties.contains_key(field),
            _ => false,
        }
    }

    #[rstest]
    #[case("/api/v1/jobs/search")]
    #[case("/api/v1/jobs/{id}")]
    #[case("/api/v1/applications/{id}")]
    #[case("/api/v1/profiles/me")]
    #[case("/api/v1/users/me")]
    #[case("/health/ready")]
    fn document_lists_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    #[case("crate.domain.Error", "traceId")]
    #[case("crate.domain.User", "dateJoined")]
    #[case("crate.domain.Job", "postedBy")]
    #[case("crate.domain.ApplicationDetails", "job")]
    #[case("crate.domain.Profile", "birthDate")]
    fn schemas_expose_wire_fields(#[case] name: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).unwrap_or_else(|| panic!("{name} schema"));
        assert!(object_has_field(schema, field), "{name} lacks {field}");
    }

    #[rstest]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
