//! In-memory adapters for tests.
//!
//! Both repositories mirror the PostgreSQL adapters' observable behaviour:
//! unique emails, newest-first ordering with the id as tie breaker, and
//! offset/limit slicing. Integration tests in `tests/` enable the
//! `test-support` feature to reach them.

use std::cmp::Reverse;
use std::sync::Mutex;

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::ports::{
    PostPersistenceError, PostRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{Email, Post, PublishedWindow, User, UserId};

/// Credential store held in memory.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<User>>, UserPersistenceError> {
        self.users
            .lock()
            .map_err(|_| UserPersistenceError::connection("user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.lock()?;
        if users.iter().any(|existing| existing.email() == user.email()) {
            return Err(UserPersistenceError::duplicate_email(user.email().as_ref()));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.iter().find(|user| user.id() == id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .lock()?
            .iter()
            .find(|user| user.email() == email)
            .cloned())
    }
}

/// Content store held in memory.
#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: Mutex<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Post>>, PostPersistenceError> {
        self.posts
            .lock()
            .map_err(|_| PostPersistenceError::connection("post store lock poisoned"))
    }

    fn matching(&self, window: PublishedWindow) -> Result<Vec<Post>, PostPersistenceError> {
        let mut posts: Vec<Post> = self
            .lock()?
            .iter()
            .filter(|post| window.contains(post.pub_date()))
            .cloned()
            .collect();
        posts.sort_by_key(|post| Reverse((post.pub_date(), *post.id().as_uuid())));
        Ok(posts)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, post: &Post) -> Result<(), PostPersistenceError> {
        self.lock()?.push(post.clone());
        Ok(())
    }

    async fn list(
        &self,
        window: PublishedWindow,
        page: Option<PageRequest>,
    ) -> Result<Vec<Post>, PostPersistenceError> {
        let posts = self.matching(window)?;
        let Some(page) = page else {
            return Ok(posts);
        };
        let offset = usize::try_from(page.offset())
            .map_err(|_| PostPersistenceError::query("offset out of range"))?;
        Ok(posts
            .into_iter()
            .skip(offset)
            .take(usize::try_from(page.limit()).unwrap_or(usize::MAX))
            .collect())
    }

    async fn count(&self, window: PublishedWindow) -> Result<u64, PostPersistenceError> {
        let total = self.matching(window)?.len();
        Ok(u64::try_from(total).unwrap_or(u64::MAX))
    }
}
