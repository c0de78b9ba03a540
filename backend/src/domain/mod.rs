//! Domain primitives, access rules and use-case services.
//!
//! Purpose: define strongly typed entities (users, jobs, applications,
//! profiles), the single access decision function that gates every resource
//! operation, and the services that drive persistence, search and
//! notification through the traits in [`ports`].
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: transport-agnostic error payload.
//! - [`can_access`] / [`authorize`]: the access decision function and its
//!   error-mapping wrapper.
//! - Services implementing the driving ports, generic over driven ports.

pub mod access;
pub mod application;
mod application_service;
pub mod auth;
pub mod error;
pub(crate) mod error_mapping;
pub mod field_errors;
pub mod job;
mod job_service;
mod login_service;
pub mod notification;
pub mod ownership;
pub mod password_policy;
pub mod ports;
pub mod profile;
mod profile_service;
pub(crate) mod resource_id;
pub mod search;
pub mod signup;
mod signup_service;
pub mod trace_id;
pub mod user;
mod users_service;

pub use self::access::{
    AccessDecision, AccessPolicy, Action, DenialKind, JobEditPolicy, Principal, Resource,
    UnknownJobEditPolicy, authorize, authorize_principal, can_access, not_found,
};
pub use self::application::{
    Application, ApplicationDetails, ApplicationId, ApplicationStatus, UnknownApplicationStatus,
};
pub use self::application_service::{ApplicationService, JOB_DOES_NOT_EXIST};
pub use self::auth::{FIELD_REQUIRED, LoginCredentials};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::field_errors::FieldErrors;
pub use self::job::{JOB_LOCATION_MAX, JOB_TITLE_MAX, JOB_TITLE_MIN, Job, JobDraft, JobId, JobPatch};
pub use self::job_service::JobService;
pub use self::login_service::PasswordLoginService;
pub use self::notification::Notification;
pub use self::ownership::Owned;
pub use self::password_policy::{PASSWORD_MAX_LENGTH, PASSWORD_MIN_LENGTH, validate_password};
pub use self::profile::{PROFILE_SHORT_FIELD_MAX, Profile, ProfileFields, ProfileId};
pub use self::profile_service::ProfileService;
pub use self::resource_id::InvalidResourceId;
pub use self::search::{JobDocument, ProfileDocument, normalise_query};
pub use self::signup::{SignupForm, SignupRequest, USERNAME_TAKEN};
pub use self::signup_service::SignupService;
pub use self::trace_id::TraceId;
pub use self::user::{
    EMAIL_MAX, EmailAddress, Role, USERNAME_MAX, USERNAME_MIN, User, UserId,
    UserValidationError, Username,
};
pub use self::users_service::UserDirectoryService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use jobboard::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
