//! Access decisions.
//!
//! [`can_access`] is the single authority on whether a principal may perform
//! an action on a resource. It is pure: it sees only the principal, the
//! action and a snapshot of the resource passed in, and performs no I/O.
//!
//! Denials carry a [`DenialKind`]. `NotFound` is used where ownership must
//! be indistinguishable from non-existence (applications and profiles), and
//! `Forbidden` only where the caller may know the resource exists (job
//! mutations).
//!
//! Uniqueness rules (one application per job and applicant, one profile per
//! identity) are not decided here. Persistence enforces them and services
//! report the collision as a conflict.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Application, Error, Job, Owned, Profile, Role, User, UserId};

/// Authenticated identity making a request.
///
/// Passed explicitly to every decision and service call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    id: UserId,
    role: Role,
}

impl Principal {
    pub fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self::new(user.id, user.role)
    }
}

/// Operation requested on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Read,
    List,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Read => "read",
            Self::List => "list",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        })
    }
}

/// Resource an action targets.
///
/// Collection-level actions (list, create) pass `None`. Item-level actions
/// (read, update, delete) pass the loaded snapshot, where `None` means the
/// resource does not exist.
#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
    Job(Option<&'a Job>),
    Application(Option<&'a Application>),
    Profile(Option<&'a Profile>),
    UserDirectory,
}

impl Resource<'_> {
    fn kind(&self) -> &'static str {
        match self {
            Self::Job(_) => "job",
            Self::Application(_) => "application",
            Self::Profile(_) => "profile",
            Self::UserDirectory => "user",
        }
    }
}

/// Why a request was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DenialKind {
    /// No principal was supplied for an action that needs one.
    Unauthenticated,
    /// The principal is known but not permitted.
    Forbidden,
    /// The principal may not learn whether the resource exists.
    NotFound,
}

/// Outcome of [`can_access`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessDecision {
    Allowed,
    Denied(DenialKind),
}

impl AccessDecision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Rule applied to job updates and deletions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobEditPolicy {
    /// Recruiters may edit only jobs they posted; admins may edit any job.
    #[default]
    OwnerOrAdmin,
    /// Any recruiter or admin may edit any job.
    RoleOnly,
}

/// Error returned when parsing an unknown [`JobEditPolicy`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown job edit policy `{0}` (expected `owner_or_admin` or `role_only`)")]
pub struct UnknownJobEditPolicy(pub String);

impl std::str::FromStr for JobEditPolicy {
    type Err = UnknownJobEditPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "owner_or_admin" => Ok(Self::OwnerOrAdmin),
            "role_only" => Ok(Self::RoleOnly),
            _ => Err(UnknownJobEditPolicy(s.to_owned())),
        }
    }
}

/// Configurable knobs of the access rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AccessPolicy {
    pub job_edit: JobEditPolicy,
}

impl AccessPolicy {
    pub fn new(job_edit: JobEditPolicy) -> Self {
        Self { job_edit }
    }
}

/// Decide whether `principal` may perform `action` on `resource`.
///
/// # Examples
/// ```
/// use jobboard::domain::{
///     AccessDecision, AccessPolicy, Action, DenialKind, Principal, Resource, Role, UserId,
///     can_access,
/// };
///
/// let seeker = Principal::new(UserId::random(), Role::Seeker);
/// let decision = can_access(
///     AccessPolicy::default(),
///     Some(&seeker),
///     Action::Create,
///     Resource::Job(None),
/// );
/// assert_eq!(decision, AccessDecision::Denied(DenialKind::Forbidden));
///
/// let anonymous = can_access(AccessPolicy::default(), None, Action::List, Resource::Job(None));
/// assert!(anonymous.is_allowed());
/// ```
pub fn can_access(
    policy: AccessPolicy,
    principal: Option<&Principal>,
    action: Action,
    resource: Resource<'_>,
) -> AccessDecision {
    use AccessDecision::{Allowed, Denied};

    match resource {
        Resource::Job(job) => decide_job(policy.job_edit, principal, action, job),
        Resource::Application(application) => authenticated(principal, |principal| match action {
            Action::List | Action::Create => Allowed,
            Action::Read | Action::Update | Action::Delete => owner_only(principal, application),
        }),
        Resource::Profile(profile) => authenticated(principal, |principal| match action {
            Action::List | Action::Create => Allowed,
            Action::Read | Action::Update => owner_only(principal, profile),
            // Profiles live and die with their account.
            Action::Delete => Denied(DenialKind::Forbidden),
        }),
        Resource::UserDirectory => authenticated(principal, |_| match action {
            Action::Read | Action::List => Allowed,
            Action::Create | Action::Update | Action::Delete => Denied(DenialKind::Forbidden),
        }),
    }
}

fn authenticated(
    principal: Option<&Principal>,
    decide: impl FnOnce(&Principal) -> AccessDecision,
) -> AccessDecision {
    principal.map_or(AccessDecision::Denied(DenialKind::Unauthenticated), decide)
}

fn decide_job(
    policy: JobEditPolicy,
    principal: Option<&Principal>,
    action: Action,
    job: Option<&Job>,
) -> AccessDecision {
    use AccessDecision::{Allowed, Denied};

    match action {
        Action::List => return Allowed,
        Action::Read => return job.map_or(Denied(DenialKind::NotFound), |_| Allowed),
        Action::Create | Action::Update | Action::Delete => {}
    }
    let Some(principal) = principal else {
        return Denied(DenialKind::Unauthenticated);
    };
    if !principal.role().can_manage_jobs() {
        return Denied(DenialKind::Forbidden);
    }
    if action == Action::Create {
        return Allowed;
    }

    match (job, policy) {
        (None, _) => Denied(DenialKind::NotFound),
        (Some(_), JobEditPolicy::RoleOnly) => Allowed,
        (Some(_), JobEditPolicy::OwnerOrAdmin) if principal.role() == Role::Admin => Allowed,
        (Some(job), JobEditPolicy::OwnerOrAdmin) if job.is_owned_by(principal.id()) => Allowed,
        (Some(_), JobEditPolicy::OwnerOrAdmin) => Denied(DenialKind::Forbidden),
    }
}

/// Owner-only access with existence masking. No role override applies.
fn owner_only<R: Owned>(principal: &Principal, resource: Option<&R>) -> AccessDecision {
    match resource {
        Some(resource) if resource.is_owned_by(principal.id()) => AccessDecision::Allowed,
        _ => AccessDecision::Denied(DenialKind::NotFound),
    }
}

/// Run [`can_access`] and translate a denial into a domain [`Error`].
///
/// `NotFound` denials use the same message as a genuinely missing resource so
/// responses never reveal whether the resource exists.
pub fn authorize(
    policy: AccessPolicy,
    principal: Option<&Principal>,
    action: Action,
    resource: Resource<'_>,
) -> Result<(), Error> {
    match can_access(policy, principal, action, resource) {
        AccessDecision::Allowed => Ok(()),
        AccessDecision::Denied(kind) => Err(denial_error(kind, action, resource.kind())),
    }
}

/// Like [`authorize`], returning the principal the decision was made for.
///
/// Only meaningful for actions that require authentication.
pub fn authorize_principal<'p>(
    policy: AccessPolicy,
    principal: Option<&'p Principal>,
    action: Action,
    resource: Resource<'_>,
) -> Result<&'p Principal, Error> {
    authorize(policy, principal, action, resource)?;
    principal.ok_or_else(|| denial_error(DenialKind::Unauthenticated, action, resource.kind()))
}

/// Error reported for a missing resource of `kind`.
pub fn not_found(kind: &str) -> Error {
    Error::not_found(format!("{kind} not found"))
}

fn denial_error(kind: DenialKind, action: Action, resource: &str) -> Error {
    match kind {
        DenialKind::Unauthenticated => Error::unauthorized("login required"),
        DenialKind::Forbidden => {
            Error::forbidden(format!("not permitted to {action} this {resource}"))
        }
        DenialKind::NotFound => not_found(resource),
    }
}

#[cfg(test)]
mod tests;
