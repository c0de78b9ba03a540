//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`, [`LoginService`]) are implemented by
//! domain services and called by inbound adapters. Driven ports
//! (repositories, [`SearchIndex`], [`Notifier`], [`PasswordHasher`]) are
//! implemented by outbound adapters and called by the services.

mod macros;
pub(crate) use macros::define_port_error;

mod application_repository;
mod applications_command;
mod applications_query;
mod job_repository;
mod jobs_command;
mod jobs_query;
mod login_service;
mod notifier;
mod password_hasher;
mod profile_repository;
mod profiles_command;
mod profiles_query;
mod search_index;
mod signup_command;
mod user_repository;
mod users_query;

#[cfg(test)]
pub use application_repository::MockApplicationRepository;
pub use application_repository::{ApplicationRepository, ApplicationRepositoryError};
#[cfg(test)]
pub use applications_command::MockApplicationsCommand;
pub use applications_command::{
    ApplicationPatch, ApplicationsCommand, CreateApplicationRequest,
};
#[cfg(test)]
pub use applications_query::MockApplicationsQuery;
pub use applications_query::ApplicationsQuery;
#[cfg(test)]
pub use job_repository::MockJobRepository;
pub use job_repository::{JobRepository, JobRepositoryError};
#[cfg(test)]
pub use jobs_command::MockJobsCommand;
pub use jobs_command::JobsCommand;
#[cfg(test)]
pub use jobs_query::MockJobsQuery;
pub use jobs_query::JobsQuery;
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use notifier::MockNotifier;
pub use notifier::{Notifier, NotifierError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{ProfileRepository, ProfileRepositoryError};
#[cfg(test)]
pub use profiles_command::MockProfilesCommand;
pub use profiles_command::ProfilesCommand;
#[cfg(test)]
pub use profiles_query::MockProfilesQuery;
pub use profiles_query::ProfilesQuery;
#[cfg(test)]
pub use search_index::MockSearchIndex;
pub use search_index::{SearchIndex, SearchIndexError};
#[cfg(test)]
pub use signup_command::MockSignupCommand;
pub use signup_command::SignupCommand;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{NewAccount, StoredCredentials, UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
