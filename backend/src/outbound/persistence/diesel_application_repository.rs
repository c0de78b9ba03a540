//! PostgreSQL-backed `ApplicationRepository`.
//!
//! `applications_job_applicant_key` makes the second of two concurrent
//! submissions for the same job fail with a conflict.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ApplicationRepository, ApplicationRepositoryError};
use crate::domain::{Application, ApplicationId, UserId};

use super::diesel_error_mapping::{Failure, collect_rows, impl_from_failure};
use super::models::{ApplicationChangeset, ApplicationRow};
use super::pool::DbPool;
use super::schema::applications;

impl_from_failure!(ApplicationRepositoryError, conflict);

/// Diesel implementation of [`ApplicationRepository`].
#[derive(Clone)]
pub struct DieselApplicationRepository {
    pool: DbPool,
}

impl DieselApplicationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationRepository for DieselApplicationRepository {
    async fn insert(&self, application: &Application) -> Result<(), ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(Failure::from)?;
        diesel::insert_into(applications::table)
            .values(ApplicationRow::from(application))
            .execute(&mut conn)
            .await
            .map_err(Failure::from)?;
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<Application>, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(Failure::from)?;
        let row = applications::table
            .find(id.as_uuid())
            .select(ApplicationRow::as_select())
            .first::<ApplicationRow>(&mut conn)
            .await
            .optional()
            .map_err(Failure::from)?;
        Ok(row
            .map(ApplicationRow::into_domain)
            .transpose()
            .map_err(|message| Failure::Query(format!("invalid stored application: {message}")))?)
    }

    async fn list_by_applicant(
        &self,
        applicant: &UserId,
    ) -> Result<Vec<Application>, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(Failure::from)?;
        let rows = applications::table
            .filter(applications::applicant.eq(applicant.as_uuid()))
            .order((applications::applied_at.desc(), applications::id.asc()))
            .select(ApplicationRow::as_select())
            .load::<ApplicationRow>(&mut conn)
            .await
            .map_err(Failure::from)?;
        Ok(collect_rows(rows.into_iter().map(ApplicationRow::into_domain))?)
    }

    async fn update(&self, application: &Application) -> Result<bool, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(Failure::from)?;
        let updated = diesel::update(applications::table.find(application.id.as_uuid()))
            .set(ApplicationChangeset::from(application))
            .execute(&mut conn)
            .await
            .map_err(Failure::from)?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: &ApplicationId) -> Result<bool, ApplicationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(Failure::from)?;
        let deleted = diesel::delete(applications::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(Failure::from)?;
        Ok(deleted > 0)
    }
}
