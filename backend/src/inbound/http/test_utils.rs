//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::BoxBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, HttpResponse, test, web};

use crate::domain::ports::{
    MockApplicationsCommand, MockApplicationsQuery, MockJobsCommand, MockJobsQuery,
    MockLoginService, MockProfilesCommand, MockProfilesQuery, MockSignupCommand, MockUsersQuery,
};
use crate::domain::{Error, Principal, Role, UserId};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const SIGN_IN_PATH: &str = "/__test/sign-in";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// One mock per driving port; unset expectations panic when called.
#[derive(Default)]
pub struct MockPorts {
    pub login: MockLoginService,
    pub signup: MockSignupCommand,
    pub users: MockUsersQuery,
    pub jobs: MockJobsQuery,
    pub jobs_command: MockJobsCommand,
    pub applications: MockApplicationsQuery,
    pub applications_command: MockApplicationsCommand,
    pub profiles: MockProfilesQuery,
    pub profiles_command: MockProfilesCommand,
}

impl MockPorts {
    /// Let the session resolve `principal` for its own id.
    pub fn with_principal(mut self, principal: Principal) -> Self {
        self.login
            .expect_principal_for()
            .returning(move |id| Ok((*id == *principal.id()).then_some(principal)));
        self
    }

    pub fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            login: Arc::new(self.login),
            signup: Arc::new(self.signup),
            users: Arc::new(self.users),
            jobs: Arc::new(self.jobs),
            jobs_command: Arc::new(self.jobs_command),
            applications: Arc::new(self.applications),
            applications_command: Arc::new(self.applications_command),
            profiles: Arc::new(self.profiles),
            profiles_command: Arc::new(self.profiles_command),
        })
    }
}

pub fn principal(role: Role) -> Principal {
    Principal::new(UserId::random(), role)
}

async fn sign_in_handler(
    session: SessionContext,
    path: web::Path<String>,
) -> Result<HttpResponse, Error> {
    let id = UserId::new(path.as_str()).map_err(|err| Error::invalid_request(err.to_string()))?;
    session.sign_in(&id)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register a route that signs in whichever user id it is given.
pub fn sign_in_route(cfg: &mut web::ServiceConfig) {
    cfg.route(
        &format!("{SIGN_IN_PATH}/{{id}}"),
        web::post().to(sign_in_handler),
    );
}

/// Obtain a session cookie for `user` from an app that mounts
/// [`sign_in_route`] under `/api/v1`.
pub async fn sign_in<S>(app: &S, user: &UserId) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/v1{SIGN_IN_PATH}/{user}"))
            .to_request(),
    )
    .await;
    assert!(response.status().is_success(), "test sign-in failed");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

/// App with the session middleware, test sign-in route and `state`.
pub fn app_with(
    state: web::Data<HttpState>,
    configure: impl FnOnce(&mut web::ServiceConfig),
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = ServiceResponse<BoxBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(state).service(
        web::scope("/api/v1")
            .wrap(test_session_middleware())
            .configure(sign_in_route)
            .configure(configure),
    )
}
