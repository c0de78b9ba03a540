//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories are thin translators between Diesel rows (`models`) and
//! domain types. Rows and schema stay private to this module. Unique
//! constraint violations surface as the ports' `Conflict` variants so
//! services can report duplicates deterministically.

mod diesel_application_repository;
pub(crate) mod diesel_error_mapping;
mod diesel_job_repository;
mod diesel_profile_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_application_repository::DieselApplicationRepository;
pub use diesel_job_repository::DieselJobRepository;
pub use diesel_profile_repository::DieselProfileRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
