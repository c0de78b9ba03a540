//! Adapter selection and service wiring.
//!
//! Each driven port gets a production adapter when its settings are present
//! and a local stand-in otherwise: in-memory storage and search, and a
//! notifier that only logs.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::domain::ports::{
    ApplicationRepository, JobRepository, Notifier, PasswordHasher, ProfileRepository,
    SearchIndex, SignupCommand, UserRepository,
};
use crate::domain::{
    AccessPolicy, ApplicationService, Error, JobService, PasswordLoginService, ProfileService,
    SignupForm, SignupService, User, UserDirectoryService,
};
use crate::inbound::http::state::{
    HttpState, HttpStatePorts, applications_pair, jobs_pair, profiles_pair,
};
use crate::outbound::mail::{HttpMailRelay, TracingNotifier};
use crate::outbound::memory::InMemoryStore;
use crate::outbound::persistence::{
    DbPool, DieselApplicationRepository, DieselJobRepository, DieselProfileRepository,
    DieselUserRepository,
};
use crate::outbound::search::{ElasticsearchIndex, InMemorySearchIndex};
use crate::outbound::security::Argon2PasswordHasher;

use super::config::{AppSettings, SettingsError};

const OUTBOUND_TIMEOUT: Duration = Duration::from_secs(5);

/// Driven-port adapters shared by every service.
#[derive(Clone)]
pub struct DrivenAdapters {
    pub users: Arc<dyn UserRepository>,
    pub jobs: Arc<dyn JobRepository>,
    pub applications: Arc<dyn ApplicationRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub search: Arc<dyn SearchIndex>,
    pub notifier: Arc<dyn Notifier>,
    pub hasher: Arc<dyn PasswordHasher>,
}

impl DrivenAdapters {
    /// Process-local adapters for development and tests.
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            users: store.clone(),
            jobs: store.clone(),
            applications: store.clone(),
            profiles: store,
            search: Arc::new(InMemorySearchIndex::new()),
            notifier: Arc::new(TracingNotifier),
            hasher: Arc::new(Argon2PasswordHasher::new()),
        }
    }

    /// Swap the repositories for PostgreSQL-backed ones.
    #[must_use]
    pub fn with_postgres(mut self, pool: &DbPool) -> Self {
        self.users = Arc::new(DieselUserRepository::new(pool.clone()));
        self.jobs = Arc::new(DieselJobRepository::new(pool.clone()));
        self.applications = Arc::new(DieselApplicationRepository::new(pool.clone()));
        self.profiles = Arc::new(DieselProfileRepository::new(pool.clone()));
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: Arc<dyn SearchIndex>) -> Self {
        self.search = search;
        self
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Pick adapters according to `settings`.
    ///
    /// # Errors
    ///
    /// Fails when a configured URL is malformed or an HTTP client cannot be
    /// built.
    pub fn from_settings(settings: &AppSettings, pool: Option<&DbPool>) -> Result<Self, SettingsError> {
        let mut adapters = Self::in_memory();
        match pool {
            Some(pool) => adapters = adapters.with_postgres(pool),
            None => info!("no database configured; using in-memory storage"),
        }
        match settings.search_url()? {
            Some(url) => {
                adapters = adapters.with_search(Arc::new(ElasticsearchIndex::new(url, OUTBOUND_TIMEOUT)?));
            }
            None => info!("no search URL configured; using in-memory search"),
        }
        match settings.mail_relay_url()? {
            Some(url) => {
                let relay = HttpMailRelay::new(url, settings.mail_sender(), OUTBOUND_TIMEOUT)?;
                adapters = adapters.with_notifier(Arc::new(relay));
            }
            None => info!("no mail relay configured; notifications are logged only"),
        }
        Ok(adapters)
    }
}

type DynSignupService =
    SignupService<dyn UserRepository, dyn PasswordHasher, dyn Notifier, dyn SearchIndex>;

fn signup_service(adapters: &DrivenAdapters) -> DynSignupService {
    SignupService::new(
        adapters.users.clone(),
        adapters.hasher.clone(),
        adapters.notifier.clone(),
        adapters.search.clone(),
    )
}

/// Create the administrator described by `form` unless the username is
/// already registered.
///
/// # Errors
///
/// Fails when the form is invalid or the account cannot be stored.
pub async fn bootstrap_admin(adapters: &DrivenAdapters, form: SignupForm) -> Result<Option<User>, Error> {
    signup_service(adapters).bootstrap_admin(form).await
}

/// Build the services behind every driving port.
pub fn build_http_state(adapters: &DrivenAdapters, policy: AccessPolicy) -> HttpState {
    let signup = Arc::new(signup_service(adapters));
    let DrivenAdapters {
        users,
        jobs,
        applications,
        profiles,
        search,
        notifier,
        hasher,
    } = adapters.clone();

    HttpState::new(HttpStatePorts {
        login: Arc::new(PasswordLoginService::new(users.clone(), hasher)),
        signup,
        users: Arc::new(UserDirectoryService::new(users.clone(), policy)),
        jobs: jobs_pair(Arc::new(JobService::new(jobs.clone(), search.clone(), policy))),
        applications: applications_pair(Arc::new(ApplicationService::new(
            applications,
            jobs,
            users.clone(),
            notifier,
            policy,
        ))),
        profiles: profiles_pair(Arc::new(ProfileService::new(profiles, users, search, policy))),
    })
}
