//! PostgreSQL-backed `PostRepository` implementation using Diesel ORM.
//!
//! Month filtering and page slicing are pushed into SQL:
//! `WHERE pub_date >= $start AND pub_date < $end ORDER BY pub_date DESC, id DESC
//! OFFSET $offset LIMIT $limit`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;

use crate::domain::ports::{PostPersistenceError, PostRepository};
use crate::domain::{Post, PostId, PublishedWindow};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::PostRow;
use super::pool::{DbPool, PoolError};
use super::schema::posts;

/// Diesel-backed content store.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PostPersistenceError {
    PostPersistenceError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error, operation: &str) -> PostPersistenceError {
    match classify_diesel_error(error, operation) {
        DieselFailure::Connection(message) => PostPersistenceError::connection(message),
        DieselFailure::UniqueViolation(constraint) => {
            PostPersistenceError::query(format!("{operation}: violates {constraint}"))
        }
        DieselFailure::Query(message) => PostPersistenceError::query(message),
    }
}

fn row_to_post(row: PostRow) -> Post {
    Post::from_stored(
        PostId::from_uuid(row.id),
        row.title,
        row.author,
        row.body,
        row.pub_date,
    )
}

fn post_to_row(post: &Post) -> PostRow {
    PostRow {
        id: *post.id().as_uuid(),
        title: post.title().to_owned(),
        author: post.author().to_owned(),
        body: post.body().to_owned(),
        pub_date: post.pub_date(),
    }
}

fn sql_offset(page: &PageRequest) -> Result<i64, PostPersistenceError> {
    i64::try_from(page.offset())
        .map_err(|_| PostPersistenceError::query(format!("page {} is out of range", page.page())))
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn insert(&self, post: &Post) -> Result<(), PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(posts::table)
            .values(&post_to_row(post))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "insert post"))?;
        Ok(())
    }

    async fn list(
        &self,
        window: PublishedWindow,
        page: Option<PageRequest>,
    ) -> Result<Vec<Post>, PostPersistenceError> {
        let mut query = posts::table
            .select(PostRow::as_select())
            .order((posts::pub_date.desc(), posts::id.desc()))
            .into_boxed();
        if let Some((start, end)) = window.bounds() {
            query = query.filter(posts::pub_date.ge(start).and(posts::pub_date.lt(end)));
        }
        if let Some(page) = page {
            query = query
                .offset(sql_offset(&page)?)
                .limit(i64::from(page.limit()));
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<PostRow> = query
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list posts"))?;
        Ok(rows.into_iter().map(row_to_post).collect())
    }

    async fn count(&self, window: PublishedWindow) -> Result<u64, PostPersistenceError> {
        let mut query = posts::table.select(diesel::dsl::count_star()).into_boxed();
        if let Some((start, end)) = window.bounds() {
            query = query.filter(posts::pub_date.ge(start).and(posts::pub_date.lt(end)));
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: i64 = query
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "count posts"))?;
        u64::try_from(total)
            .map_err(|_| PostPersistenceError::query(format!("negative post count {total}")))
    }
}
