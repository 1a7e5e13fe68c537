//! PostgreSQL-backed `PostRepository` implementation using Diesel ORM.
//!
//! Listings join each post with its author and order newest first
//! (`created_at DESC, id DESC`). Search terms match post text
//! case-insensitively and never match tombstoned rows.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};
use uuid::Uuid;

use crate::domain::ports::{PostRepository, PostRepositoryError};
use crate::domain::{AuthoredPost, NewPost, Post, PostId, PostText, UserId};

use super::diesel_basic_error_mapping::{
    is_foreign_key_violation, like_pattern, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{NewPostRow, PostRow, UserRow, authored_post_from_rows};
use super::pool::{DbPool, PoolError};
use super::schema::{posts, users};

/// Diesel-backed implementation of the [`PostRepository`] port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Which posts a listing covers.
#[derive(Debug, Clone, Copy)]
enum Listing {
    TopLevel,
    RepliesTo(i64),
    AuthoredBy(Uuid),
}

fn map_pool_error(error: PoolError) -> PostRepositoryError {
    map_basic_pool_error(error, PostRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PostRepositoryError {
    map_basic_diesel_error(
        error,
        PostRepositoryError::query,
        PostRepositoryError::connection,
    )
}

fn map_write_error(error: diesel::result::Error) -> PostRepositoryError {
    if is_foreign_key_violation(&error) {
        PostRepositoryError::missing_reference("author or parent post does not exist")
    } else {
        map_diesel_error(error)
    }
}

fn row_to_post(row: PostRow) -> Result<Post, PostRepositoryError> {
    row.into_domain().map_err(PostRepositoryError::query)
}

fn rows_to_authored(
    rows: Vec<(PostRow, UserRow)>,
) -> Result<Vec<AuthoredPost>, PostRepositoryError> {
    rows.into_iter()
        .map(authored_post_from_rows)
        .collect::<Result<Vec<_>, _>>()
        .map_err(PostRepositoryError::query)
}

/// Apply the listing scope and optional search to a boxed posts query.
macro_rules! scoped {
    ($query:expr, $listing:expr, $pattern:expr) => {{
        let mut query = $query;
        query = match $listing {
            Listing::TopLevel => query.filter(posts::parent_id.is_null()),
            Listing::RepliesTo(parent) => query.filter(posts::parent_id.eq(parent)),
            Listing::AuthoredBy(author) => query.filter(posts::user_id.eq(author)),
        };
        if let Some(pattern) = $pattern {
            query = query.filter(
                posts::text
                    .ilike(pattern.to_owned())
                    .and(posts::deleted_at.is_null()),
            );
        }
        query
    }};
}

impl DieselPostRepository {
    async fn list(
        &self,
        listing: Listing,
        page: &PageRequest,
    ) -> Result<Page<AuthoredPost>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let pattern = page.search().map(like_pattern);
        let pattern = pattern.as_deref();

        let count: i64 = scoped!(
            posts::table.select(diesel::dsl::count_star()).into_boxed(),
            listing,
            pattern
        )
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        let count = u64::try_from(count)
            .map_err(|_| PostRepositoryError::query("negative row count"))?;
        if page.offset() >= count {
            return Ok(Page::new(Vec::new(), page, count));
        }

        let offset = i64::try_from(page.offset())
            .map_err(|_| PostRepositoryError::query("page offset out of range"))?;
        let rows: Vec<(PostRow, UserRow)> = scoped!(
            posts::table
                .inner_join(users::table)
                .select((PostRow::as_select(), UserRow::as_select()))
                .into_boxed(),
            listing,
            pattern
        )
        .order((posts::created_at.desc(), posts::id.desc()))
        .limit(i64::from(page.limit()))
        .offset(offset)
        .load(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(Page::new(rows_to_authored(rows)?, page, count))
    }
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn create(&self, post: &NewPost) -> Result<Post, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewPostRow {
            user_id: *post.author_id.as_uuid(),
            parent_id: post.parent_id.map(PostId::get),
            text: post.text.as_ref(),
            created_at: post.created_at,
            updated_at: post.created_at,
        };

        let inserted = diesel::insert_into(posts::table)
            .values(&row)
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_write_error)?;
        row_to_post(inserted)
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<AuthoredPost>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<(PostRow, UserRow)> = posts::table
            .inner_join(users::table)
            .filter(posts::id.eq(id.get()))
            .select((PostRow::as_select(), UserRow::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(|pair| authored_post_from_rows(pair).map_err(PostRepositoryError::query))
            .transpose()
    }

    async fn update_text(
        &self,
        id: PostId,
        text: &PostText,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(
            posts::table
                .filter(posts::id.eq(id.get()))
                .filter(posts::deleted_at.is_null()),
        )
        .set((
            posts::text.eq(text.as_ref()),
            posts::updated_at.eq(updated_at),
        ))
        .returning(PostRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?
        .map(row_to_post)
        .transpose()
    }

    async fn soft_delete(
        &self,
        id: PostId,
        deleted_at: DateTime<Utc>,
    ) -> Result<bool, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(
            posts::table
                .filter(posts::id.eq(id.get()))
                .filter(posts::deleted_at.is_null()),
        )
        .set((
            posts::deleted_at.eq(Some(deleted_at)),
            posts::updated_at.eq(deleted_at),
        ))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn list_top_level(
        &self,
        page: &PageRequest,
    ) -> Result<Page<AuthoredPost>, PostRepositoryError> {
        self.list(Listing::TopLevel, page).await
    }

    async fn list_replies(
        &self,
        parent_id: PostId,
        page: &PageRequest,
    ) -> Result<Page<AuthoredPost>, PostRepositoryError> {
        self.list(Listing::RepliesTo(parent_id.get()), page).await
    }

    async fn list_by_author(
        &self,
        author_id: &UserId,
        page: &PageRequest,
    ) -> Result<Page<AuthoredPost>, PostRepositoryError> {
        self.list(Listing::AuthoredBy(*author_id.as_uuid()), page).await
    }
}
