//! Job application handlers.
//!
//! ```text
//! GET    /api/v1/applications
//! POST   /api/v1/applications {"jobId":"…","coverLetter":"…"}
//! GET    /api/v1/applications/{id}
//! PATCH  /api/v1/applications/{id} {"coverLetter":"…","status":"viewed"}
//! DELETE /api/v1/applications/{id}
//! ```
//!
//! Responses embed the targeted job so clients can render an application
//! without a second request.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{ApplicationPatch, CreateApplicationRequest};
use crate::domain::{
    Application, ApplicationDetails, ApplicationId, ApplicationStatus, FieldErrors,
    JOB_DOES_NOT_EXIST, Job, JobId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::current_principal;
use crate::inbound::http::schemas::{ApplicationSchema, ErrorSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_resource_id;

/// Wire shape of an application: its own fields plus the nested job.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    #[serde(flatten)]
    pub application: Application,
    pub job: Job,
}

impl From<ApplicationDetails> for ApplicationResponse {
    fn from(details: ApplicationDetails) -> Self {
        Self {
            application: details.application,
            job: details.job,
        }
    }
}

/// Request body for `POST /api/v1/applications`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationBody {
    #[serde(default)]
    pub job_id: String,
    #[serde(default)]
    pub cover_letter: String,
}

impl TryFrom<ApplicationBody> for CreateApplicationRequest {
    type Error = crate::domain::Error;

    fn try_from(body: ApplicationBody) -> Result<Self, Self::Error> {
        let job_id = JobId::new(body.job_id.trim()).map_err(|_| {
            let mut errors = FieldErrors::default();
            errors.push("job_id", JOB_DOES_NOT_EXIST);
            errors.into_error("application payload is invalid")
        })?;
        Ok(Self {
            job_id,
            cover_letter: body.cover_letter,
        })
    }
}

/// Request body for `PATCH /api/v1/applications/{id}`.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPatchBody {
    pub cover_letter: Option<String>,
    /// One of `applied`, `viewed`, `rejected` or `accepted`.
    #[schema(example = "viewed")]
    pub status: Option<String>,
}

impl TryFrom<ApplicationPatchBody> for ApplicationPatch {
    type Error = crate::domain::Error;

    fn try_from(body: ApplicationPatchBody) -> Result<Self, Self::Error> {
        let status = body
            .status
            .map(|raw| {
                raw.trim().parse::<ApplicationStatus>().map_err(|_| {
                    let mut errors = FieldErrors::default();
                    errors.push("status", format!("\"{}\" is not a valid choice.", raw.trim()));
                    errors.into_error("application payload is invalid")
                })
            })
            .transpose()?;
        Ok(Self {
            cover_letter: body.cover_letter,
            status,
        })
    }
}

fn respond(details: ApplicationDetails) -> web::Json<ApplicationResponse> {
    web::Json(details.into())
}

/// List the caller's own applications.
#[utoipa::path(
    get,
    path = "/api/v1/applications",
    responses(
        (status = 200, description = "Caller's applications", body = [ApplicationSchema]),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "listApplications"
)]
#[get("/applications")]
pub async fn list_applications(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ApplicationResponse>>> {
    let principal = current_principal(&state, &session).await?;
    let applications = state.applications.list_applications(principal).await?;
    Ok(web::Json(
        applications.into_iter().map(ApplicationResponse::from).collect(),
    ))
}

/// Apply to a job. The job's owner is notified by mail.
#[utoipa::path(
    post,
    path = "/api/v1/applications",
    request_body = ApplicationBody,
    responses(
        (status = 201, description = "Application submitted", body = ApplicationSchema),
        (status = 400, description = "Unknown job", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 409, description = "Already applied", body = ErrorSchema),
        (status = 503, description = "Owner could not be notified", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "createApplication"
)]
#[post("/applications")]
pub async fn create_application(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ApplicationBody>,
) -> ApiResult<HttpResponse> {
    let principal = current_principal(&state, &session).await?;
    let request = CreateApplicationRequest::try_from(payload.into_inner())?;
    let details = state
        .applications_command
        .create_application(principal, request)
        .await?;
    Ok(HttpResponse::Created().json(ApplicationResponse::from(details)))
}

#[utoipa::path(
    get,
    path = "/api/v1/applications/{id}",
    params(("id" = String, Path, description = "Application identifier")),
    responses(
        (status = 200, description = "Application", body = ApplicationSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Unknown or someone else's application", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "getApplication"
)]
#[get("/applications/{id}")]
pub async fn get_application(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ApplicationResponse>> {
    let principal = current_principal(&state, &session).await?;
    let id = parse_resource_id(&path, "application", ApplicationId::new)?;
    let details = state.applications.get_application(principal, id).await?;
    Ok(respond(details))
}

#[utoipa::path(
    patch,
    path = "/api/v1/applications/{id}",
    params(("id" = String, Path, description = "Application identifier")),
    request_body = ApplicationPatchBody,
    responses(
        (status = 200, description = "Updated application", body = ApplicationSchema),
        (status = 400, description = "Invalid status", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Unknown or someone else's application", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "updateApplication"
)]
#[patch("/applications/{id}")]
pub async fn update_application(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ApplicationPatchBody>,
) -> ApiResult<web::Json<ApplicationResponse>> {
    let principal = current_principal(&state, &session).await?;
    let id = parse_resource_id(&path, "application", ApplicationId::new)?;
    let patch = ApplicationPatch::try_from(payload.into_inner())?;
    let details = state
        .applications_command
        .update_application(principal, id, patch)
        .await?;
    Ok(respond(details))
}

#[utoipa::path(
    delete,
    path = "/api/v1/applications/{id}",
    params(("id" = String, Path, description = "Application identifier")),
    responses(
        (status = 204, description = "Application withdrawn"),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Unknown or someone else's application", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "deleteApplication"
)]
#[delete("/applications/{id}")]
pub async fn delete_application(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let principal = current_principal(&state, &session).await?;
    let id = parse_resource_id(&path, "application", ApplicationId::new)?;
    state
        .applications_command
        .delete_application(principal, id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Error, ErrorCode, JobDraft, Role, not_found};
    use crate::inbound::http::test_utils::{MockPorts, app_with, principal, sign_in};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    fn routes(cfg: &mut web::ServiceConfig) {
        cfg.service(list_applications)
            .service(create_application)
            .service(get_application)
            .service(update_application)
            .service(delete_application);
    }

    fn details(applicant: crate::domain::UserId) -> ApplicationDetails {
        let job = JobDraft::new("Data Engineer", "", "Berlin", None)
            .expect("draft")
            .into_job(crate::domain::UserId::random());
        let application = Application::submit(job.id, applicant, "Hello");
        ApplicationDetails { application, job }
    }

    #[rstest]
    fn response_flattens_application_and_nests_job() {
        let details = details(crate::domain::UserId::random());
        let job_id = details.job.id.to_string();
        let value = serde_json::to_value(ApplicationResponse::from(details)).expect("json");
        assert_eq!(value["jobId"], job_id);
        assert_eq!(value["job"]["id"], job_id);
        assert_eq!(value["coverLetter"], "Hello");
        assert_eq!(value["status"], "applied");
    }

    #[rstest]
    #[case("")]
    #[case("not-a-job")]
    fn malformed_job_reference_is_a_field_error(#[case] raw: &str) {
        let err = CreateApplicationRequest::try_from(ApplicationBody {
            job_id: raw.into(),
            cover_letter: String::new(),
        })
        .expect_err("malformed");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let details = err.details().expect("details");
        assert_eq!(details["fieldErrors"]["job_id"][0], JOB_DOES_NOT_EXIST);
    }

    #[actix_web::test]
    async fn create_returns_created_with_embedded_job() {
        let seeker = principal(Role::Seeker);
        let submitted = details(*seeker.id());
        let job_id = submitted.job.id;
        let mut ports = MockPorts::default().with_principal(seeker);
        ports
            .applications_command
            .expect_create_application()
            .withf(move |p, request| {
                p.as_ref() == Some(&seeker)
                    && request.job_id == job_id
                    && request.cover_letter == "Hello"
            })
            .return_once(move |_, _| Ok(submitted));
        let app = actix_test::init_service(app_with(ports.into_state(), routes)).await;
        let cookie = sign_in(&app, seeker.id()).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/applications")
                .cookie(cookie)
                .set_json(json!({"jobId": job_id.to_string(), "coverLetter": "Hello"}))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["job"]["title"], "Data Engineer");
    }

    #[actix_web::test]
    async fn undelivered_notification_is_service_unavailable() {
        let seeker = principal(Role::Seeker);
        let mut ports = MockPorts::default().with_principal(seeker);
        ports
            .applications_command
            .expect_create_application()
            .return_once(|_, _| {
                Err(Error::service_unavailable(
                    "notification could not be delivered",
                ))
            });
        let app = actix_test::init_service(app_with(ports.into_state(), routes)).await;
        let cookie = sign_in(&app, seeker.id()).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/applications")
                .cookie(cookie)
                .set_json(json!({"jobId": JobId::random().to_string()}))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn foreign_application_reads_as_not_found() {
        let stranger = principal(Role::Admin);
        let mut ports = MockPorts::default().with_principal(stranger);
        ports
            .applications
            .expect_get_application()
            .return_once(|_, _| Err(not_found("application")));
        let app = actix_test::init_service(app_with(ports.into_state(), routes)).await;
        let cookie = sign_in(&app, stranger.id()).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/v1/applications/{}", ApplicationId::random()))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let value: Value = actix_test::read_body_json(response).await;
        assert_eq!(value["message"], "application not found");
    }

    #[actix_web::test]
    async fn patch_forwards_cover_letter_and_status() {
        let seeker = principal(Role::Seeker);
        let updated = details(*seeker.id());
        let id = updated.application.id;
        let mut ports = MockPorts::default().with_principal(seeker);
        ports
            .applications_command
            .expect_update_application()
            .withf(move |_, got, patch| {
                *got == id
                    && patch.cover_letter.as_deref() == Some("Updated")
                    && patch.status == Some(ApplicationStatus::Accepted)
            })
            .return_once(move |_, _, _| Ok(updated));
        let app = actix_test::init_service(app_with(ports.into_state(), routes)).await;
        let cookie = sign_in(&app, seeker.id()).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::patch()
                .uri(&format!("/api/v1/applications/{id}"))
                .cookie(cookie)
                .set_json(json!({"coverLetter": "Updated", "status": "accepted"}))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn delete_returns_no_content() {
        let seeker = principal(Role::Seeker);
        let mut ports = MockPorts::default().with_principal(seeker);
        ports
            .applications_command
            .expect_delete_application()
            .times(1)
            .return_once(|_, _| Ok(()));
        let app = actix_test::init_service(app_with(ports.into_state(), routes)).await;
        let cookie = sign_in(&app, seeker.id()).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!("/api/v1/applications/{}", ApplicationId::random()))
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
