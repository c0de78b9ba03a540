//! Reqwest-backed `SearchIndex` for Elasticsearch-compatible servers.
//!
//! Jobs and profiles live in two indices. Documents are written with their
//! domain id as `_id` so re-indexing replaces rather than duplicates.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{SearchResponseDto, multi_match};
use crate::domain::ports::{SearchIndex, SearchIndexError};
use crate::domain::{JobDocument, JobId, ProfileDocument};

pub const JOBS_INDEX: &str = "jobs";
pub const PROFILES_INDEX: &str = "profiles";

const JOB_FIELDS: [&str; 3] = ["title", "description", "location"];
const PROFILE_FIELDS: [&str; 3] = ["bio", "username", "email"];

/// HTTP search adapter bound to one cluster endpoint.
pub struct ElasticsearchIndex {
    client: Client,
    base: Url,
}

impl ElasticsearchIndex {
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base: with_trailing_slash(base),
        })
    }

    fn url(&self, path: &str) -> Result<Url, SearchIndexError> {
        self.base
            .join(path)
            .map_err(|error| SearchIndexError::query(format!("invalid index path {path}: {error}")))
    }

    async fn put_document<T: Serialize + Sync>(
        &self,
        index: &str,
        id: &str,
        document: &T,
    ) -> Result<(), SearchIndexError> {
        let url = self.url(&format!("{index}/_doc/{id}"))?;
        let response = self
            .client
            .put(url)
            .json(document)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        Err(map_status_error(status, body.as_ref()))
    }

    async fn search<T: DeserializeOwned>(
        &self,
        index: &str,
        query: &str,
        fields: &[&str],
    ) -> Result<Vec<T>, SearchIndexError> {
        let url = self.url(&format!("{index}/_search"))?;
        let response = self
            .client
            .request(Method::POST, url)
            .json(&multi_match(query, fields))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if status == StatusCode::NOT_FOUND {
            debug!(index, "search against missing index");
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_hits(body.as_ref())
    }
}

#[async_trait]
impl SearchIndex for ElasticsearchIndex {
    async fn index_job(&self, job: &JobDocument) -> Result<(), SearchIndexError> {
        self.put_document(JOBS_INDEX, &job.id.to_string(), job).await
    }

    async fn remove_job(&self, id: &JobId) -> Result<(), SearchIndexError> {
        let url = self.url(&format!("{JOBS_INDEX}/_doc/{id}"))?;
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        if status.is_success() || status == StatusCode::NOT_FOUND {
            return Ok(());
        }
        let body = response.bytes().await.map_err(map_transport_error)?;
        Err(map_status_error(status, body.as_ref()))
    }

    async fn search_jobs(&self, query: &str) -> Result<Vec<JobDocument>, SearchIndexError> {
        self.search(JOBS_INDEX, query, &JOB_FIELDS).await
    }

    async fn index_profile(&self, profile: &ProfileDocument) -> Result<(), SearchIndexError> {
        self.put_document(PROFILES_INDEX, &profile.id.to_string(), profile)
            .await
    }

    async fn search_profiles(
        &self,
        query: &str,
    ) -> Result<Vec<ProfileDocument>, SearchIndexError> {
        self.search(PROFILES_INDEX, query, &PROFILE_FIELDS).await
    }
}

fn with_trailing_slash(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

fn parse_hits<T: DeserializeOwned>(body: &[u8]) -> Result<Vec<T>, SearchIndexError> {
    let decoded: SearchResponseDto<T> = serde_json::from_slice(body).map_err(|error| {
        SearchIndexError::query(format!("invalid search response: {error}"))
    })?;
    Ok(decoded.into_sources())
}

fn map_transport_error(error: reqwest::Error) -> SearchIndexError {
    SearchIndexError::unavailable(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> SearchIndexError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    };
    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        SearchIndexError::unavailable(message)
    } else {
        SearchIndexError::query(message)
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
