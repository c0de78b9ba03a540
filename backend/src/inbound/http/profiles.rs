//! Seeker profile handlers.
//!
//! A profile is private to its owner: someone else's profile reads as not
//! found. `/profiles/me` lazily creates the caller's profile on first access.

use actix_web::{HttpResponse, get, patch, post, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Profile, ProfileDocument, ProfileFields, ProfileId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::current_principal;
use crate::inbound::http::jobs::SearchParams;
use crate::inbound::http::schemas::{ErrorSchema, ProfileHitSchema, ProfileSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{double_option, parse_resource_id};

/// Profile fields accepted on create and update. Absent fields are left
/// alone; `"birthDate": null` clears the date.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileBody {
    pub bio: Option<String>,
    pub location: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, format = Date)]
    pub birth_date: Option<Option<NaiveDate>>,
    /// Comma-separated skills.
    pub skills: Option<String>,
    pub contact: Option<String>,
}

impl From<ProfileBody> for ProfileFields {
    fn from(body: ProfileBody) -> Self {
        Self {
            bio: body.bio,
            location: body.location,
            birth_date: body.birth_date,
            skills: body.skills,
            contact: body.contact,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/profiles",
    responses(
        (status = 200, description = "The caller's own profiles", body = [ProfileSchema]),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "listProfiles"
)]
#[get("/profiles")]
pub async fn list_profiles(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Profile>>> {
    let principal = current_principal(&state, &session).await?;
    Ok(web::Json(state.profiles.list_profiles(principal).await?))
}

/// Create the caller's profile.
#[utoipa::path(
    post,
    path = "/api/v1/profiles",
    request_body = ProfileBody,
    responses(
        (status = 201, description = "Profile created", body = ProfileSchema),
        (status = 400, description = "Invalid profile", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 409, description = "Profile already exists", body = ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "createProfile"
)]
#[post("/profiles")]
pub async fn create_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileBody>,
) -> ApiResult<HttpResponse> {
    let principal = current_principal(&state, &session).await?;
    let profile = state
        .profiles_command
        .create_profile(principal, payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(profile))
}

/// Search profiles by bio, username and email.
#[utoipa::path(
    get,
    path = "/api/v1/profiles/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching profiles", body = [ProfileHitSchema]),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 503, description = "Search index unavailable", body = ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "searchProfiles"
)]
#[get("/profiles/search")]
pub async fn search_profiles(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<SearchParams>,
) -> ApiResult<web::Json<Vec<ProfileDocument>>> {
    let principal = current_principal(&state, &session).await?;
    let hits = state
        .profiles
        .search_profiles(principal, params.into_inner().q)
        .await?;
    Ok(web::Json(hits))
}

#[utoipa::path(
    get,
    path = "/api/v1/profiles/me",
    responses(
        (status = 200, description = "Caller's profile", body = ProfileSchema),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "myProfile"
)]
#[get("/profiles/me")]
pub async fn my_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Profile>> {
    let principal = current_principal(&state, &session).await?;
    Ok(web::Json(state.profiles_command.my_profile(principal).await?))
}

#[utoipa::path(
    patch,
    path = "/api/v1/profiles/me",
    request_body = ProfileBody,
    responses(
        (status = 200, description = "Updated profile", body = ProfileSchema),
        (status = 400, description = "Invalid profile", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "updateMyProfile"
)]
#[patch("/profiles/me")]
pub async fn update_my_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileBody>,
) -> ApiResult<web::Json<Profile>> {
    let principal = current_principal(&state, &session).await?;
    let profile = state
        .profiles_command
        .update_my_profile(principal, payload.into_inner().into())
        .await?;
    Ok(web::Json(profile))
}

#[utoipa::path(
    get,
    path = "/api/v1/profiles/{id}",
    params(("id" = String, Path, description = "Profile identifier")),
    responses(
        (status = 200, description = "Profile", body = ProfileSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Unknown or someone else's profile", body = ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "getProfile"
)]
#[get("/profiles/{id}")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Profile>> {
    let principal = current_principal(&state, &session).await?;
    let id = parse_resource_id(&path, "profile", ProfileId::new)?;
    Ok(web::Json(state.profiles.get_profile(principal, id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/v1/profiles/{id}",
    params(("id" = String, Path, description = "Profile identifier")),
    request_body = ProfileBody,
    responses(
        (status = 200, description = "Updated profile", body = ProfileSchema),
        (status = 400, description = "Invalid profile", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Unknown or someone else's profile", body = ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "updateProfile"
)]
#[patch("/profiles/{id}")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ProfileBody>,
) -> ApiResult<web::Json<Profile>> {
    let principal = current_principal(&state, &session).await?;
    let id = parse_resource_id(&path, "profile", ProfileId::new)?;
    let profile = state
        .profiles_command
        .update_profile(principal, id, payload.into_inner().into())
        .await?;
    Ok(web::Json(profile))
}
