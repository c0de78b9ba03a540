//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **memory**: in-process repositories for development and tests
//! - **search**: Elasticsearch-compatible and in-memory search indices
//! - **mail**: HTTP mail relay, tracing and in-memory notifiers
//! - **security**: Argon2 password hashing
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod mail;
pub mod memory;
pub mod persistence;
pub mod search;
pub mod security;
