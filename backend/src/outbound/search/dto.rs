//! Wire shapes for the Elasticsearch-compatible REST API.

use serde::Deserialize;
use serde_json::{Value, json};

/// Body of a `_search` request: a `multi_match` across `fields`.
pub(super) fn multi_match(query: &str, fields: &[&str]) -> Value {
    json!({
        "query": {
            "multi_match": {
                "query": query,
                "fields": fields,
            }
        }
    })
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchResponseDto<T> {
    pub(super) hits: HitsDto<T>,
}

#[derive(Debug, Deserialize)]
pub(super) struct HitsDto<T> {
    #[serde(default = "Vec::new")]
    pub(super) hits: Vec<HitDto<T>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct HitDto<T> {
    #[serde(rename = "_source")]
    pub(super) source: T,
}

impl<T> SearchResponseDto<T> {
    pub(super) fn into_sources(self) -> Vec<T> {
        self.hits.hits.into_iter().map(|hit| hit.source).collect()
    }
}
