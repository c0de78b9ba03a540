//! Account and session handlers.
//!
//! ```text
//! POST /api/v1/signup {"username":"ada","email":"ada@example.com","password":"…","password2":"…"}
//! POST /api/v1/login {"username":"ada","password":"…"}
//! POST /api/v1/logout
//! GET /api/v1/users
//! GET /api/v1/users/me
//! GET /api/v1/users/{id}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::{Error, LoginCredentials, SignupForm, User, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::current_principal;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_resource_id;

/// Signup request body for `POST /api/v1/signup`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupBody {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    /// Must repeat `password`.
    #[serde(default)]
    pub password2: String,
    /// `seeker` (default) or `recruiter`.
    #[serde(default)]
    pub role: Option<String>,
}

impl From<SignupBody> for SignupForm {
    fn from(body: SignupBody) -> Self {
        Self {
            username: body.username,
            email: body.email,
            password: Zeroizing::new(body.password),
            password2: Zeroizing::new(body.password2),
            role: body.role,
        }
    }
}

/// Login request body for `POST /api/v1/login`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = Error;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        let password = Zeroizing::new(value.password);
        Self::try_from_parts(&value.username, &password)
    }
}

/// Register an account together with its empty profile.
#[utoipa::path(
    post,
    path = "/api/v1/signup",
    request_body = SignupBody,
    responses(
        (status = 201, description = "Account created", body = UserSchema),
        (status = 400, description = "Invalid signup payload", body = ErrorSchema),
        (status = 503, description = "Storage unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "signup",
    security([])
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<SignupBody>,
) -> ApiResult<HttpResponse> {
    let user = state.signup.signup(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = UserSchema,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<User>> {
    let credentials = LoginCredentials::try_from(payload.into_inner())?;
    let user = state.login.authenticate(&credentials).await?;
    session.sign_in(&user.id)?;
    Ok(web::Json(user))
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.sign_out();
    HttpResponse::NoContent().finish()
}

/// List registered users.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Users", body = [UserSchema]),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<User>>> {
    let principal = current_principal(&state, &session).await?;
    Ok(web::Json(state.users.list_users(principal).await?))
}

/// Return the signed-in user.
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user", body = UserSchema),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<User>> {
    let principal = current_principal(&state, &session)
        .await?
        .ok_or_else(|| Error::unauthorized("login required"))?;
    let user = state.users.get_user(Some(principal), *principal.id()).await?;
    Ok(web::Json(user))
}

/// Fetch one user by id.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let principal = current_principal(&state, &session).await?;
    let id = parse_resource_id(&path, "user", UserId::new)?;
    Ok(web::Json(state.users.get_user(principal, id).await?))
}
