//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    ApplicationsCommand, ApplicationsQuery, JobsCommand, JobsQuery, LoginService,
    ProfilesCommand, ProfilesQuery, SignupCommand, UsersQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub signup: Arc<dyn SignupCommand>,
    pub users: Arc<dyn UsersQuery>,
    pub jobs: Arc<dyn JobsQuery>,
    pub jobs_command: Arc<dyn JobsCommand>,
    pub applications: Arc<dyn ApplicationsQuery>,
    pub applications_command: Arc<dyn ApplicationsCommand>,
    pub profiles: Arc<dyn ProfilesQuery>,
    pub profiles_command: Arc<dyn ProfilesCommand>,
}

/// Parameter object for [`HttpState::new`].
///
/// Services usually implement the query and command side together; the
/// `*_pair` helpers split one `Arc` into both trait objects.
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub signup: Arc<dyn SignupCommand>,
    pub users: Arc<dyn UsersQuery>,
    pub jobs: (Arc<dyn JobsQuery>, Arc<dyn JobsCommand>),
    pub applications: (Arc<dyn ApplicationsQuery>, Arc<dyn ApplicationsCommand>),
    pub profiles: (Arc<dyn ProfilesQuery>, Arc<dyn ProfilesCommand>),
}

impl HttpState {
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            signup,
            users,
            jobs: (jobs, jobs_command),
            applications: (applications, applications_command),
            profiles: (profiles, profiles_command),
        } = ports;
        Self {
            login,
            signup,
            users,
            jobs,
            jobs_command,
            applications,
            applications_command,
            profiles,
            profiles_command,
        }
    }
}

/// Split a service implementing both job ports into its two trait objects.
pub fn jobs_pair<S>(service: Arc<S>) -> (Arc<dyn JobsQuery>, Arc<dyn JobsCommand>)
where
    S: JobsQuery + JobsCommand + 'static,
{
    let query: Arc<dyn JobsQuery> = service.clone();
    (query, service)
}

/// Split a service implementing both application ports.
pub fn applications_pair<S>(
    service: Arc<S>,
) -> (Arc<dyn ApplicationsQuery>, Arc<dyn ApplicationsCommand>)
where
    S: ApplicationsQuery + ApplicationsCommand + 'static,
{
    let query: Arc<dyn ApplicationsQuery> = service.clone();
    (query, service)
}

/// Split a service implementing both profile ports.
pub fn profiles_pair<S>(service: Arc<S>) -> (Arc<dyn ProfilesQuery>, Arc<dyn ProfilesCommand>)
where
    S: ProfilesQuery + ProfilesCommand + 'static,
{
    let query: Arc<dyn ProfilesQuery> = service.clone();
    (query, service)
}
