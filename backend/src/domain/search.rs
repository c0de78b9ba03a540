//! Search documents and hits exchanged with the search index.
//!
//! The index is eventually consistent with persistence: a write may not be
//! visible to search immediately, and a failed index update never fails the
//! request that caused it.

use serde::{Deserialize, Serialize};

use crate::domain::{Job, JobId, Profile, ProfileId, User};

/// Indexed projection of a job; also the shape of a job search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDocument {
    pub id: JobId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: Option<i64>,
}

impl From<&Job> for JobDocument {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id,
            title: job.title.clone(),
            description: job.description.clone(),
            location: job.location.clone(),
            salary: job.salary,
        }
    }
}

/// Indexed projection of a profile joined with its owner's public fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDocument {
    pub id: ProfileId,
    pub bio: String,
    pub username: String,
    pub email: String,
}

impl ProfileDocument {
    pub fn new(profile: &Profile, owner: &User) -> Self {
        Self {
            id: profile.id,
            bio: profile.bio.clone(),
            username: owner.username.to_string(),
            email: owner.email.to_string(),
        }
    }
}

/// Normalise a free-text query; `None` means "nothing to search for".
pub fn normalise_query(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|query| !query.is_empty())
        .map(str::to_owned)
}
