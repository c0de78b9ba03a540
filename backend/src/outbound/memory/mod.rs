//! In-process repositories for local development and tests.
//!
//! [`InMemoryStore`] implements every repository port over one mutex so it
//! can honour the same constraints as the PostgreSQL schema: unique
//! usernames, one application per `(job, applicant)`, one profile per user,
//! atomic account provisioning and cascading job deletion.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    ApplicationRepository, ApplicationRepositoryError, JobRepository, JobRepositoryError,
    NewAccount, ProfileRepository, ProfileRepositoryError, StoredCredentials,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    Application, ApplicationId, Job, JobId, Profile, ProfileId, User, UserId,
};

#[derive(Default)]
struct State {
    users: HashMap<UserId, StoredCredentials>,
    jobs: HashMap<JobId, Job>,
    applications: HashMap<ApplicationId, Application>,
    profiles: HashMap<ProfileId, Profile>,
}

impl State {
    fn username_taken(&self, username: &str) -> bool {
        self.users
            .values()
            .any(|stored| stored.user.username.as_ref() == username)
    }

    fn profile_for(&self, user: &UserId) -> Option<&Profile> {
        self.profiles.values().find(|profile| profile.user == *user)
    }
}

/// Shared in-memory implementation of the repository ports.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

/// Lock failure message shared by every repository error type.
const POISONED: &str = "in-memory store lock poisoned";

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, String> {
        self.state.lock().map_err(|_| POISONED.to_owned())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create_account(&self, account: &NewAccount) -> Result<(), UserPersistenceError> {
        let mut state = self.lock().map_err(UserPersistenceError::query)?;
        if state.username_taken(account.user.username.as_ref()) {
            return Err(UserPersistenceError::conflict("users_username_key"));
        }
        if state.profile_for(&account.user.id).is_some() {
            return Err(UserPersistenceError::conflict("profiles_user_id_key"));
        }
        state.users.insert(
            account.user.id,
            StoredCredentials {
                user: account.user.clone(),
                password_hash: account.password_hash.clone(),
            },
        );
        state
            .profiles
            .insert(account.profile.id, account.profile.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::query)?;
        Ok(state.users.get(id).map(|stored| stored.user.clone()))
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::query)?;
        Ok(state
            .users
            .values()
            .find(|stored| stored.user.username.as_ref() == username)
            .cloned())
    }

    async fn username_exists(&self, username: &str) -> Result<bool, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::query)?;
        Ok(state.username_taken(username))
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::query)?;
        let mut users: Vec<User> = state
            .users
            .values()
            .map(|stored| stored.user.clone())
            .collect();
        users.sort_by(|a, b| a.username.as_ref().cmp(b.username.as_ref()));
        Ok(users)
    }
}

#[async_trait]
impl JobRepository for InMemoryStore {
    async fn insert(&self, job: &Job) -> Result<(), JobRepositoryError> {
        let mut state = self.lock().map_err(JobRepositoryError::query)?;
        state.jobs.insert(job.id, job.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &JobId) -> Result<Option<Job>, JobRepositoryError> {
        let state = self.lock().map_err(JobRepositoryError::query)?;
        Ok(state.jobs.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Job>, JobRepositoryError> {
        let state = self.lock().map_err(JobRepositoryError::query)?;
        let mut jobs: Vec<Job> = state.jobs.values().cloned().collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(jobs)
    }

    async fn update(&self, job: &Job) -> Result<bool, JobRepositoryError> {
        let mut state = self.lock().map_err(JobRepositoryError::query)?;
        match state.jobs.get_mut(&job.id) {
            Some(stored) => {
                *stored = job.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &JobId) -> Result<bool, JobRepositoryError> {
        let mut state = self.lock().map_err(JobRepositoryError::query)?;
        if state.jobs.remove(id).is_none() {
            return Ok(false);
        }
        state
            .applications
            .retain(|_, application| application.job_id != *id);
        Ok(true)
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryStore {
    async fn insert(&self, application: &Application) -> Result<(), ApplicationRepositoryError> {
        let mut state = self.lock().map_err(ApplicationRepositoryError::query)?;
        let duplicate = state.applications.values().any(|existing| {
            existing.job_id == application.job_id && existing.applicant == application.applicant
        });
        if duplicate {
            return Err(ApplicationRepositoryError::conflict(
                "applications_job_applicant_key",
            ));
        }
        state
            .applications
            .insert(application.id, application.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        let state = self.lock().map_err(ApplicationRepositoryError::query)?;
        Ok(state.applications.get(id).cloned())
    }

    async fn list_by_applicant(
        &self,
        applicant: &UserId,
    ) -> Result<Vec<Application>, ApplicationRepositoryError> {
        let state = self.lock().map_err(ApplicationRepositoryError::query)?;
        let mut applications: Vec<Application> = state
            .applications
            .values()
            .filter(|application| application.applicant == *applicant)
            .cloned()
            .collect();
        applications.sort_by(|a, b| b.applied_at.cmp(&a.applied_at).then(a.id.cmp(&b.id)));
        Ok(applications)
    }

    async fn update(&self, application: &Application) -> Result<bool, ApplicationRepositoryError> {
        let mut state = self.lock().map_err(ApplicationRepositoryError::query)?;
        match state.applications.get_mut(&application.id) {
            Some(stored) => {
                stored.cover_letter.clone_from(&application.cover_letter);
                stored.status = application.status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &ApplicationId) -> Result<bool, ApplicationRepositoryError> {
        let mut state = self.lock().map_err(ApplicationRepositoryError::query)?;
        Ok(state.applications.remove(id).is_some())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn insert(&self, profile: &Profile) -> Result<(), ProfileRepositoryError> {
        let mut state = self.lock().map_err(ProfileRepositoryError::query)?;
        if state.profile_for(&profile.user).is_some() {
            return Err(ProfileRepositoryError::conflict("profiles_user_id_key"));
        }
        state.profiles.insert(profile.id, profile.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, ProfileRepositoryError> {
        let state = self.lock().map_err(ProfileRepositoryError::query)?;
        Ok(state.profiles.get(id).cloned())
    }

    async fn find_by_user(&self, user: &UserId) -> Result<Option<Profile>, ProfileRepositoryError> {
        let state = self.lock().map_err(ProfileRepositoryError::query)?;
        Ok(state.profile_for(user).cloned())
    }

    async fn update(&self, profile: &Profile) -> Result<bool, ProfileRepositoryError> {
        let mut state = self.lock().map_err(ProfileRepositoryError::query)?;
        match state.profiles.get_mut(&profile.id) {
            Some(stored) => {
                let owner = stored.user;
                *stored = profile.clone();
                stored.user = owner;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmailAddress, JobDraft, Role, Username};
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> InMemoryStore {
        InMemoryStore::new()
    }

    fn account(username: &str) -> NewAccount {
        let user = User::register(
            Username::new(username).expect("username"),
            EmailAddress::new(format!("{username}@example.com")).expect("email"),
            Role::Recruiter,
        );
        let profile = Profile::empty(user.id);
        NewAccount {
            user,
            password_hash: "hash".to_owned(),
            profile,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn account_creation_stores_user_and_profile(store: InMemoryStore) {
        let account = account("ada");
        store.create_account(&account).await.expect("created");

        assert!(store.username_exists("ada").await.expect("lookup"));
        let profile = ProfileRepository::find_by_user(&store, &account.user.id)
            .await
            .expect("lookup");
        assert_eq!(profile, Some(account.profile));
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_username_is_a_conflict(store: InMemoryStore) {
        store.create_account(&account("ada")).await.expect("first");
        let err = store
            .create_account(&account("ada"))
            .await
            .expect_err("second");
        assert!(matches!(err, UserPersistenceError::Conflict { .. }));
        assert_eq!(UserRepository::list(&store).await.expect("list").len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_a_job_cascades_to_applications(store: InMemoryStore) {
        let owner = UserId::random();
        let job = JobDraft::new("Engineer", "", "", None)
            .expect("draft")
            .into_job(owner);
        JobRepository::insert(&store, &job).await.expect("job");
        let application = Application::submit(job.id, UserId::random(), "");
        ApplicationRepository::insert(&store, &application)
            .await
            .expect("application");

        assert!(JobRepository::delete(&store, &job.id).await.expect("delete"));
        let found = ApplicationRepository::find_by_id(&store, &application.id)
            .await
            .expect("lookup");
        assert!(found.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn second_application_for_same_job_conflicts(store: InMemoryStore) {
        let job_id = JobId::random();
        let applicant = UserId::random();
        ApplicationRepository::insert(&store, &Application::submit(job_id, applicant, ""))
            .await
            .expect("first");
        let err = ApplicationRepository::insert(&store, &Application::submit(job_id, applicant, ""))
            .await
            .expect_err("second");
        assert!(matches!(err, ApplicationRepositoryError::Conflict { .. }));
    }
}
