//! PostgreSQL-backed `JobRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{JobRepository, JobRepositoryError};
use crate::domain::{Job, JobId};

use super::diesel_error_mapping::{Failure, impl_from_failure};
use super::models::{JobChangeset, JobRow};
use super::pool::DbPool;
use super::schema::jobs;

impl_from_failure!(JobRepositoryError);

/// Diesel implementation of [`JobRepository`].
#[derive(Clone)]
pub struct DieselJobRepository {
    pool: DbPool,
}

impl DieselJobRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for DieselJobRepository {
    async fn insert(&self, job: &Job) -> Result<(), JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(Failure::from)?;
        diesel::insert_into(jobs::table)
            .values(JobRow::from(job))
            .execute(&mut conn)
            .await
            .map_err(Failure::from)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &JobId) -> Result<Option<Job>, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(Failure::from)?;
        let row = jobs::table
            .find(id.as_uuid())
            .select(JobRow::as_select())
            .first::<JobRow>(&mut conn)
            .await
            .optional()
            .map_err(Failure::from)?;
        Ok(row.map(Job::from))
    }

    async fn list(&self) -> Result<Vec<Job>, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(Failure::from)?;
        let rows = jobs::table
            .order((jobs::created_at.desc(), jobs::id.asc()))
            .select(JobRow::as_select())
            .load::<JobRow>(&mut conn)
            .await
            .map_err(Failure::from)?;
        Ok(rows.into_iter().map(Job::from).collect())
    }

    async fn update(&self, job: &Job) -> Result<bool, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(Failure::from)?;
        let updated = diesel::update(jobs::table.find(job.id.as_uuid()))
            .set(JobChangeset::from(job))
            .execute(&mut conn)
            .await
            .map_err(Failure::from)?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &JobId) -> Result<bool, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(Failure::from)?;
        let deleted = diesel::delete(jobs::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(Failure::from)?;
        Ok(deleted > 0)
    }
}
