//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{NewUser, StoredCredentials, UserPersistenceError, UserRepository};
use crate::domain::{ProfileUpdate, User, UserId, Username};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{CredentialsRow, NewUserRow, UserProfileChangeset, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    row.into_domain().map_err(UserPersistenceError::query)
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            id: *user.id.as_uuid(),
            username: user.username.as_ref(),
            name: user.name.as_ref(),
            bio: user.bio.as_ref().map(AsRef::as_ref),
            password_hash: &user.password_hash,
        };

        let inserted = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    UserPersistenceError::duplicate_username(user.username.to_string())
                } else {
                    map_diesel_error(err)
                }
            })?;
        row_to_user(inserted)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        users::table
            .find(id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_user)
            .transpose()
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_user)
            .transpose()
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = users::table
            .filter(users::username.eq(username))
            .select(CredentialsRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(|row| StoredCredentials {
            user_id: UserId::from_uuid(row.id),
            password_hash: row.password_hash,
        }))
    }

    async fn update_profile(
        &self,
        id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = UserProfileChangeset {
            name: update.name.as_ref().map(AsRef::as_ref),
            bio: update.bio.as_ref().map(AsRef::as_ref),
            image_url: update.image_url.as_ref().map(AsRef::as_ref),
            updated_at: Utc::now(),
        };

        diesel::update(users::table.find(id.as_uuid()))
            .set(&changeset)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_user)
            .transpose()
    }
}
