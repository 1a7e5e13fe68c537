//! PostgreSQL-backed `LikeRepository` implementation using Diesel ORM.
//!
//! Each like or unlike writes the `likes` row and adjusts
//! `posts.total_likes` inside one transaction. The target post row is locked
//! with `FOR UPDATE` first, so concurrent requests for the same post
//! serialise on the counter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{LikeRepository, LikeRepositoryError};
use crate::domain::{PostId, UserId};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::NewLikeRow;
use super::pool::{DbPool, PoolError};
use super::schema::{likes, posts};

/// Diesel-backed implementation of the [`LikeRepository`] port.
#[derive(Clone)]
pub struct DieselLikeRepository {
    pool: DbPool,
}

impl DieselLikeRepository {
    /// Create a new repository with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failure inside a like transaction. Any variant rolls the transaction back.
#[derive(Debug)]
enum LikeTxError {
    Diesel(diesel::result::Error),
    Rejected(LikeRepositoryError),
}

impl From<diesel::result::Error> for LikeTxError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

impl From<LikeRepositoryError> for LikeTxError {
    fn from(error: LikeRepositoryError) -> Self {
        Self::Rejected(error)
    }
}

fn map_pool_error(error: PoolError) -> LikeRepositoryError {
    map_basic_pool_error(error, LikeRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> LikeRepositoryError {
    map_basic_diesel_error(
        error,
        LikeRepositoryError::query,
        LikeRepositoryError::connection,
    )
}

fn map_tx_error(error: LikeTxError) -> LikeRepositoryError {
    match error {
        LikeTxError::Diesel(err) => map_diesel_error(err),
        LikeTxError::Rejected(err) => err,
    }
}

fn counter_to_u64(post_id: i64, total_likes: i64) -> Result<u64, LikeTxError> {
    u64::try_from(total_likes).map_err(|_| LikeRepositoryError::counter_underflow(post_id).into())
}

/// Lock the active post row, failing when it is missing or tombstoned.
async fn lock_active_post(conn: &mut AsyncPgConnection, post_id: i64) -> Result<(), LikeTxError> {
    let locked = posts::table
        .filter(posts::id.eq(post_id))
        .filter(posts::deleted_at.is_null())
        .select(posts::id)
        .for_update()
        .first::<i64>(conn)
        .await
        .optional()?;
    match locked {
        Some(_) => Ok(()),
        None => Err(LikeRepositoryError::post_not_found(post_id).into()),
    }
}

#[async_trait]
impl LikeRepository for DieselLikeRepository {
    async fn exists(&self, post_id: PostId, user_id: &UserId) -> Result<bool, LikeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(
            likes::table.find((post_id.get(), user_id.as_uuid())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn like(&self, post_id: PostId, user_id: &UserId) -> Result<u64, LikeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let post_id = post_id.get();
        let user_id: Uuid = *user_id.as_uuid();

        let total = conn
            .transaction::<_, LikeTxError, _>(|conn| {
                async move {
                    lock_active_post(conn, post_id).await?;

                    diesel::insert_into(likes::table)
                        .values(&NewLikeRow { post_id, user_id })
                        .execute(conn)
                        .await
                        .map_err(|err| {
                            if is_unique_violation(&err) {
                                LikeTxError::from(LikeRepositoryError::already_liked(post_id))
                            } else {
                                LikeTxError::from(err)
                            }
                        })?;

                    let total: i64 = diesel::update(posts::table.find(post_id))
                        .set(posts::total_likes.eq(posts::total_likes + 1))
                        .returning(posts::total_likes)
                        .get_result(conn)
                        .await?;
                    counter_to_u64(post_id, total)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_tx_error)?;

        debug!(post_id, total_likes = total, "post liked");
        Ok(total)
    }

    async fn unlike(&self, post_id: PostId, user_id: &UserId) -> Result<u64, LikeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let post_id = post_id.get();
        let user_id: Uuid = *user_id.as_uuid();

        let total = conn
            .transaction::<_, LikeTxError, _>(|conn| {
                async move {
                    lock_active_post(conn, post_id).await?;

                    let removed = diesel::delete(likes::table.find((post_id, user_id)))
                        .execute(conn)
                        .await?;
                    if removed == 0 {
                        return Err(LikeRepositoryError::not_liked(post_id).into());
                    }

                    let total: Option<i64> = diesel::update(
                        posts::table
                            .filter(posts::id.eq(post_id))
                            .filter(posts::total_likes.gt(0)),
                    )
                    .set(posts::total_likes.eq(posts::total_likes - 1))
                    .returning(posts::total_likes)
                    .get_result(conn)
                    .await
                    .optional()?;
                    match total {
                        Some(total) => counter_to_u64(post_id, total),
                        None => Err(LikeRepositoryError::counter_underflow(post_id).into()),
                    }
                }
                .scope_boxed()
            })
            .await
            .map_err(map_tx_error)?;

        debug!(post_id, total_likes = total, "post unliked");
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn rejected_transactions_keep_their_domain_error() {
        let err = map_tx_error(LikeRepositoryError::already_liked(4_i64).into());

        assert_eq!(err, LikeRepositoryError::already_liked(4_i64));
    }

    #[rstest]
    fn diesel_failures_map_to_query_errors() {
        let err = map_tx_error(diesel::result::Error::NotFound.into());

        assert!(matches!(err, LikeRepositoryError::Query { .. }));
    }

    #[rstest]
    #[case(0, Some(0))]
    #[case(3, Some(3))]
    #[case(-1, None)]
    fn counters_convert_only_when_non_negative(#[case] raw: i64, #[case] expected: Option<u64>) {
        let converted = counter_to_u64(9, raw).ok();

        assert_eq!(converted, expected);
    }
}
