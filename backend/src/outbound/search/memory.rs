//! In-process `SearchIndex` for local development and tests.
//!
//! Matching is a case-insensitive substring test over the same fields the
//! Elasticsearch adapter queries.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{SearchIndex, SearchIndexError};
use crate::domain::{JobDocument, JobId, ProfileDocument, ProfileId};

#[derive(Default)]
struct Documents {
    jobs: HashMap<JobId, JobDocument>,
    profiles: HashMap<ProfileId, ProfileDocument>,
}

#[derive(Default)]
pub struct InMemorySearchIndex {
    documents: Mutex<Documents>,
}

impl InMemorySearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Documents>, SearchIndexError> {
        self.documents
            .lock()
            .map_err(|_| SearchIndexError::unavailable("in-memory index lock poisoned"))
    }
}

fn matches_any(query: &str, fields: &[&str]) -> bool {
    let needle = query.to_lowercase();
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

#[async_trait]
impl SearchIndex for InMemorySearchIndex {
    async fn index_job(&self, job: &JobDocument) -> Result<(), SearchIndexError> {
        self.lock()?.jobs.insert(job.id, job.clone());
        Ok(())
    }

    async fn remove_job(&self, id: &JobId) -> Result<(), SearchIndexError> {
        self.lock()?.jobs.remove(id);
        Ok(())
    }

    async fn search_jobs(&self, query: &str) -> Result<Vec<JobDocument>, SearchIndexError> {
        let documents = self.lock()?;
        let mut hits: Vec<JobDocument> = documents
            .jobs
            .values()
            .filter(|job| {
                matches_any(
                    query,
                    &[
                        job.title.as_str(),
                        job.description.as_str(),
                        job.location.as_str(),
                    ],
                )
            })
            .cloned()
            .collect();
        hits.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        Ok(hits)
    }

    async fn index_profile(&self, profile: &ProfileDocument) -> Result<(), SearchIndexError> {
        self.lock()?.profiles.insert(profile.id, profile.clone());
        Ok(())
    }

    async fn search_profiles(
        &self,
        query: &str,
    ) -> Result<Vec<ProfileDocument>, SearchIndexError> {
        let documents = self.lock()?;
        let mut hits: Vec<ProfileDocument> = documents
            .profiles
            .values()
            .filter(|profile| {
                matches_any(
                    query,
                    &[
                        profile.bio.as_str(),
                        profile.username.as_str(),
                        profile.email.as_str(),
                    ],
                )
            })
            .cloned()
            .collect();
        hits.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn job(title: &str, location: &str) -> JobDocument {
        JobDocument {
            id: JobId::random(),
            title: title.to_owned(),
            description: String::new(),
            location: location.to_owned(),
            salary: None,
        }
    }

    #[rstest]
    #[case("rust", 1)]
    #[case("REMOTE", 2)]
    #[case("cobol", 0)]
    #[tokio::test]
    async fn job_search_is_case_insensitive(#[case] query: &str, #[case] expected: usize) {
        let index = InMemorySearchIndex::new();
        index
            .index_job(&job("Rust Engineer", "Remote"))
            .await
            .expect("index");
        index
            .index_job(&job("Go Developer", "remote, EU"))
            .await
            .expect("index");

        let hits = index.search_jobs(query).await.expect("search");
        assert_eq!(hits.len(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn removed_jobs_stop_matching() {
        let index = InMemorySearchIndex::new();
        let document = job("Rust Engineer", "Remote");
        index.index_job(&document).await.expect("index");
        index.remove_job(&document.id).await.expect("remove");
        assert!(index.search_jobs("rust").await.expect("search").is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn reindexing_a_profile_replaces_it() {
        let index = InMemorySearchIndex::new();
        let mut document = ProfileDocument {
            id: ProfileId::random(),
            bio: "Backend developer".to_owned(),
            username: "ada".to_owned(),
            email: "ada@example.com".to_owned(),
        };
        index.index_profile(&document).await.expect("index");
        document.bio = "Compiler hacker".to_owned();
        index.index_profile(&document).await.expect("reindex");

        assert!(index.search_profiles("backend").await.expect("search").is_empty());
        assert_eq!(index.search_profiles("compiler").await.expect("search").len(), 1);
    }
}
