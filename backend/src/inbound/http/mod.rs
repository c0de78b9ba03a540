//! HTTP inbound adapter exposing the REST API under `/api/v1`.
//!
//! Handlers resolve the session into an optional [`crate::domain::Principal`]
//! and hand it to the driving ports; every access decision happens behind
//! those ports.

use actix_web::web;

pub mod applications;
pub mod auth;
pub mod error;
pub mod health;
pub mod jobs;
pub mod profiles;
pub mod schemas;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use crate::domain::ApiResult;

/// JSON extractor configuration that reports malformed bodies in the API
/// error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(error::json_error_handler)
}

/// Register every API handler. Literal segments such as `/jobs/search` and
/// `/profiles/me` are registered ahead of their `{id}` siblings.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(users::signup)
        .service(users::login)
        .service(users::logout)
        .service(users::list_users)
        .service(users::current_user)
        .service(users::get_user)
        .service(jobs::list_jobs)
        .service(jobs::create_job)
        .service(jobs::search_jobs)
        .service(jobs::get_job)
        .service(jobs::update_job)
        .service(jobs::delete_job)
        .service(applications::list_applications)
        .service(applications::create_application)
        .service(applications::get_application)
        .service(applications::update_application)
        .service(applications::delete_application)
        .service(profiles::list_profiles)
        .service(profiles::create_profile)
        .service(profiles::search_profiles)
        .service(profiles::my_profile)
        .service(profiles::update_my_profile)
        .service(profiles::get_profile)
        .service(profiles::update_profile);
}
