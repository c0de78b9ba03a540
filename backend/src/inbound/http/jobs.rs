//! Job posting handlers.
//!
//! Reads are public. Mutations require a recruiter or admin session; who may
//! change which job is decided by the jobs service.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Job, JobDocument, JobDraft, JobId, JobPatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::current_principal;
use crate::inbound::http::schemas::{ErrorSchema, JobHitSchema, JobSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{double_option, parse_resource_id};

/// Request body for `POST /api/v1/jobs`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobBody {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    pub salary: Option<i64>,
}

/// Request body for `PATCH /api/v1/jobs/{id}`. Absent fields are unchanged;
/// `"salary": null` clears the salary.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobPatchBody {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>)]
    pub salary: Option<Option<i64>>,
}

impl From<JobPatchBody> for JobPatch {
    fn from(body: JobPatchBody) -> Self {
        Self {
            title: body.title,
            description: body.description,
            location: body.location,
            salary: body.salary,
        }
    }
}

/// Query string for search endpoints.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct SearchParams {
    /// Free-text query; blank returns no hits.
    pub q: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/jobs",
    responses((status = 200, description = "Jobs, newest first", body = [JobSchema])),
    tags = ["jobs"],
    operation_id = "listJobs",
    security([])
)]
#[get("/jobs")]
pub async fn list_jobs(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Job>>> {
    let principal = current_principal(&state, &session).await?;
    Ok(web::Json(state.jobs.list_jobs(principal).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/jobs",
    request_body = JobBody,
    responses(
        (status = 201, description = "Job posted", body = JobSchema),
        (status = 400, description = "Invalid job", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Only recruiters and admins post jobs", body = ErrorSchema)
    ),
    tags = ["jobs"],
    operation_id = "createJob"
)]
#[post("/jobs")]
pub async fn create_job(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<JobBody>,
) -> ApiResult<HttpResponse> {
    let principal = current_principal(&state, &session).await?;
    let JobBody {
        title,
        description,
        location,
        salary,
    } = payload.into_inner();
    let draft = JobDraft::new(title, description, location, salary)?;
    let job = state.jobs_command.create_job(principal, draft).await?;
    Ok(HttpResponse::Created().json(job))
}

/// Full-text search over title, description and location.
#[utoipa::path(
    get,
    path = "/api/v1/jobs/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching jobs", body = [JobHitSchema]),
        (status = 503, description = "Search index unavailable", body = ErrorSchema)
    ),
    tags = ["jobs"],
    operation_id = "searchJobs",
    security([])
)]
#[get("/jobs/search")]
pub async fn search_jobs(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<SearchParams>,
) -> ApiResult<web::Json<Vec<JobDocument>>> {
    let principal = current_principal(&state, &session).await?;
    let hits = state
        .jobs
        .search_jobs(principal, params.into_inner().q)
        .await?;
    Ok(web::Json(hits))
}

#[utoipa::path(
    get,
    path = "/api/v1/jobs/{id}",
    params(("id" = String, Path, description = "Job identifier")),
    responses(
        (status = 200, description = "Job", body = JobSchema),
        (status = 404, description = "Unknown job", body = ErrorSchema)
    ),
    tags = ["jobs"],
    operation_id = "getJob",
    security([])
)]
#[get("/jobs/{id}")]
pub async fn get_job(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Job>> {
    let principal = current_principal(&state, &session).await?;
    let id = parse_resource_id(&path, "job", JobId::new)?;
    Ok(web::Json(state.jobs.get_job(principal, id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/v1/jobs/{id}",
    params(("id" = String, Path, description = "Job identifier")),
    request_body = JobPatchBody,
    responses(
        (status = 200, description = "Updated job", body = JobSchema),
        (status = 400, description = "Invalid job", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Not permitted to edit this job", body = ErrorSchema),
        (status = 404, description = "Unknown job", body = ErrorSchema)
    ),
    tags = ["jobs"],
    operation_id = "updateJob"
)]
#[patch("/jobs/{id}")]
pub async fn update_job(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<JobPatchBody>,
) -> ApiResult<web::Json<Job>> {
    let principal = current_principal(&state, &session).await?;
    let id = parse_resource_id(&path, "job", JobId::new)?;
    let job = state
        .jobs_command
        .update_job(principal, id, payload.into_inner().into())
        .await?;
    Ok(web::Json(job))
}

#[utoipa::path(
    delete,
    path = "/api/v1/jobs/{id}",
    params(("id" = String, Path, description = "Job identifier")),
    responses(
        (status = 204, description = "Job and its applications removed"),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Not permitted to delete this job", body = ErrorSchema),
        (status = 404, description = "Unknown job", body = ErrorSchema)
    ),
    tags = ["jobs"],
    operation_id = "deleteJob"
)]
#[delete("/jobs/{id}")]
pub async fn delete_job(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let principal = current_principal(&state, &session).await?;
    let id = parse_resource_id(&path, "job", JobId::new)?;
    state.jobs_command.delete_job(principal, id).await?;
    Ok(HttpResponse::NoContent().finish())
}
