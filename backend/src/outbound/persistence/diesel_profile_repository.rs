//! PostgreSQL-backed `ProfileRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProfileRepository, ProfileRepositoryError};
use crate::domain::{Profile, ProfileId, UserId};

use super::diesel_error_mapping::{Failure, impl_from_failure};
use super::models::{ProfileChangeset, ProfileRow};
use super::pool::DbPool;
use super::schema::profiles;

impl_from_failure!(ProfileRepositoryError, conflict);

/// Diesel implementation of [`ProfileRepository`].
#[derive(Clone)]
pub struct DieselProfileRepository {
    pool: DbPool,
}

impl DieselProfileRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for DieselProfileRepository {
    async fn insert(&self, profile: &Profile) -> Result<(), ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(Failure::from)?;
        diesel::insert_into(profiles::table)
            .values(ProfileRow::from(profile))
            .execute(&mut conn)
            .await
            .map_err(Failure::from)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(Failure::from)?;
        let row = profiles::table
            .find(id.as_uuid())
            .select(ProfileRow::as_select())
            .first::<ProfileRow>(&mut conn)
            .await
            .optional()
            .map_err(Failure::from)?;
        Ok(row.map(Profile::from))
    }

    async fn find_by_user(&self, user: &UserId) -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(Failure::from)?;
        let row = profiles::table
            .filter(profiles::user_id.eq(user.as_uuid()))
            .select(ProfileRow::as_select())
            .first::<ProfileRow>(&mut conn)
            .await
            .optional()
            .map_err(Failure::from)?;
        Ok(row.map(Profile::from))
    }

    async fn update(&self, profile: &Profile) -> Result<bool, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(Failure::from)?;
        let updated = diesel::update(profiles::table.find(profile.id.as_uuid()))
            .set(ProfileChangeset::from(profile))
            .execute(&mut conn)
            .await
            .map_err(Failure::from)?;
        Ok(updated > 0)
    }
}
