//! Shared harness for HTTP integration tests.
//!
//! Every test drives the real application built by
//! [`jobboard::server::build_app`] over the in-memory adapters. Password
//! hashing uses a transparent double so tests do not pay Argon2's cost.
#![allow(
    dead_code,
    reason = "each integration test crate uses a different subset of helpers"
)]

use std::sync::Arc;

use actix_web::body::BoxBody;
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web};
use serde_json::{Value, json};

use async_trait::async_trait;
use jobboard::domain::ports::{PasswordHashError, PasswordHasher, UserRepository};
use jobboard::domain::{AccessPolicy, SignupForm, User};
use jobboard::inbound::http::health::HealthState;
use jobboard::outbound::mail::InMemoryOutbox;
use jobboard::outbound::memory::InMemoryStore;
use jobboard::outbound::search::InMemorySearchIndex;
use jobboard::server::{
    AppDependencies, DrivenAdapters, bootstrap_admin, build_app, build_http_state,
};
use zeroize::Zeroizing;

pub const PASSWORD: &str = "Tr1cky-Passw0rd";

/// Bootstrap form for an administrator using [`PASSWORD`].
pub fn admin_form(username: &str) -> SignupForm {
    SignupForm {
        username: username.to_owned(),
        email: format!("{username}@example.com"),
        password: Zeroizing::new(PASSWORD.to_owned()),
        password2: Zeroizing::new(PASSWORD.to_owned()),
        role: None,
    }
}

/// Stores passwords behind a fixed prefix.
pub struct PlainHasher;

#[async_trait]
impl PasswordHasher for PlainHasher {
    async fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        Ok(format!("plain${password}"))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError> {
        hash.strip_prefix("plain$")
            .map(|stored| stored == password)
            .ok_or_else(|| PasswordHashError::malformed("missing plain$ prefix"))
    }
}

/// Handles on the adapters behind a running test app.
pub struct Harness {
    pub store: Arc<InMemoryStore>,
    pub outbox: Arc<InMemoryOutbox>,
}

impl Harness {
    pub fn new(outbox: InMemoryOutbox) -> Self {
        Self {
            store: Arc::new(InMemoryStore::new()),
            outbox: Arc::new(outbox),
        }
    }

    fn adapters(&self) -> DrivenAdapters {
        DrivenAdapters {
            users: self.store.clone(),
            jobs: self.store.clone(),
            applications: self.store.clone(),
            profiles: self.store.clone(),
            search: Arc::new(InMemorySearchIndex::new()),
            notifier: self.outbox.clone(),
            hasher: Arc::new(PlainHasher),
        }
    }

    /// Initialise the full application over this harness.
    pub async fn app(
        &self,
        policy: AccessPolicy,
    ) -> impl Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>
    {
        let http_state = web::Data::new(build_http_state(&self.adapters(), policy));
        test::init_service(build_app(AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state,
            key: Key::generate(),
            cookie_secure: false,
            same_site: SameSite::Lax,
        }))
        .await
    }

    /// Provision an admin through the startup bootstrap; admins cannot
    /// sign up.
    pub async fn seed_admin(&self, username: &str) -> User {
        self.bootstrap_admin(username).await.expect("admin did not exist yet")
    }

    /// Run the startup admin bootstrap against this harness's storage.
    pub async fn bootstrap_admin(&self, username: &str) -> Option<User> {
        bootstrap_admin(&self.adapters(), admin_form(username))
            .await
            .expect("bootstrap admin")
    }

    pub async fn user_count(&self) -> usize {
        self.store.list().await.expect("list users").len()
    }
}

/// Send `request` and decode the JSON body; empty bodies decode as `null`.
pub async fn send<S>(app: &S, request: test::TestRequest) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

/// Register `username` with `role` and return the created user.
pub async fn signup<S>(app: &S, username: &str, role: &str) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let (status, body) = send(
        app,
        test::TestRequest::post().uri("/api/v1/signup").set_json(json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": PASSWORD,
            "password2": PASSWORD,
            "role": role,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {body}");
    body
}

/// Log `username` in and return the session cookie.
pub async fn login<S>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({"username": username, "password": PASSWORD}))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK, "login failed for {username}");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

/// Sign up and log in in one step.
pub async fn register<S>(app: &S, username: &str, role: &str) -> (Value, Cookie<'static>)
where
    S: Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let user = signup(app, username, role).await;
    let cookie = login(app, username).await;
    (user, cookie)
}

/// Post a job as the holder of `cookie` and return its id.
pub async fn post_job<S>(app: &S, cookie: &Cookie<'static>, title: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let (status, body) = send(
        app,
        test::TestRequest::post()
            .uri("/api/v1/jobs")
            .cookie(cookie.clone())
            .set_json(json!({
                "title": title,
                "description": "Build and run services",
                "location": "Remote",
                "salary": 85000,
            })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "job post failed: {body}");
    body["id"].as_str().expect("job id").to_owned()
}
