//! Search index adapters.

mod dto;
mod elasticsearch;
mod memory;

pub use elasticsearch::{ElasticsearchIndex, JOBS_INDEX, PROFILES_INDEX};
pub use memory::InMemorySearchIndex;
