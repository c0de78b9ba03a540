//! PostgreSQL-backed `UserRepository`.
//!
//! Account provisioning writes the user row and the profile row in one
//! transaction. The `users_username_key` unique index turns a racing signup
//! into [`UserPersistenceError::Conflict`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{NewAccount, StoredCredentials, UserPersistenceError, UserRepository};
use crate::domain::{User, UserId};

use super::diesel_error_mapping::{Failure, collect_rows, impl_from_failure};
use super::models::{NewUserRow, ProfileRow, UserRow};
use super::pool::DbPool;
use super::schema::{profiles, users};

impl_from_failure!(UserPersistenceError, conflict);

/// Diesel implementation of [`UserRepository`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    row.into_domain()
        .map_err(|message| Failure::Query(format!("invalid stored user: {message}")).into())
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create_account(&self, account: &NewAccount) -> Result<(), UserPersistenceError> {
        let user_row = NewUserRow::new(&account.user, &account.password_hash);
        let profile_row = ProfileRow::from(&account.profile);
        let mut conn = self.pool.get().await.map_err(Failure::from)?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::insert_into(users::table)
                    .values(&user_row)
                    .execute(conn)
                    .await?;
                diesel::insert_into(profiles::table)
                    .values(&profile_row)
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| Failure::from(err).into())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(Failure::from)?;
        let row = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(Failure::from)?;
        row.map(to_user).transpose()
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(Failure::from)?;
        let row = users::table
            .filter(users::username.eq(username))
            .select((UserRow::as_select(), users::password_hash))
            .first::<(UserRow, String)>(&mut conn)
            .await
            .optional()
            .map_err(Failure::from)?;

        row.map(|(user, password_hash)| {
            Ok(StoredCredentials {
                user: to_user(user)?,
                password_hash,
            })
        })
        .transpose()
    }

    async fn username_exists(&self, username: &str) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(Failure::from)?;
        diesel::select(diesel::dsl::exists(
            users::table.filter(users::username.eq(username)),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(|err| Failure::from(err).into())
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(Failure::from)?;
        let rows = users::table
            .order(users::username.asc())
            .select(UserRow::as_select())
            .load::<UserRow>(&mut conn)
            .await
            .map_err(Failure::from)?;
        Ok(collect_rows(rows.into_iter().map(UserRow::into_domain))?)
    }
}
