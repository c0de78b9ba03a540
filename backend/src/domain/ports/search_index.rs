//! Port for the full-text search index.
//!
//! The index is a projection of persistence and is allowed to lag behind it.

use async_trait::async_trait;

use crate::domain::{JobDocument, JobId, ProfileDocument};

use super::define_port_error;

define_port_error! {
    /// Errors raised by search index adapters.
    pub enum SearchIndexError {
        /// The index could not be reached.
        Unavailable { message: String } => "search index unavailable: {message}",
        /// The index answered with an error or an unreadable payload.
        Query { message: String } => "search index query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Insert or replace the document for a job.
    async fn index_job(&self, job: &JobDocument) -> Result<(), SearchIndexError>;

    async fn remove_job(&self, id: &JobId) -> Result<(), SearchIndexError>;

    /// Match `query` against job title, description and location.
    async fn search_jobs(&self, query: &str) -> Result<Vec<JobDocument>, SearchIndexError>;

    /// Insert or replace the document for a profile.
    async fn index_profile(&self, profile: &ProfileDocument) -> Result<(), SearchIndexError>;

    /// Match `query` against profile bio, username and email.
    async fn search_profiles(&self, query: &str)
    -> Result<Vec<ProfileDocument>, SearchIndexError>;
}
