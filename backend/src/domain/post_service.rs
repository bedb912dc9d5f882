//! Blog post domain service.
//!
//! Implements the post driving ports over a [`PostRepository`]. Slicing and
//! month filtering happen in the repository query, never in memory here.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::{Page, PageRequest};
use tracing::debug;

use crate::domain::ports::{PostCommand, PostPersistenceError, PostQuery, PostRepository};
use crate::domain::{ArchiveMonth, Error, Post, PostDraft, PostId, PublishedWindow};

fn map_repository_error(error: PostPersistenceError) -> Error {
    match error {
        PostPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("post repository unavailable: {message}"))
        }
        PostPersistenceError::Query { message } => {
            Error::internal(format!("post repository error: {message}"))
        }
    }
}

/// Post service implementing [`PostCommand`] and [`PostQuery`].
#[derive(Clone)]
pub struct BlogPostService<R> {
    posts: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> BlogPostService<R> {
    /// Create a service over the content store. `clock` stamps posts
    /// submitted without a publish date.
    pub fn new(posts: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { posts, clock }
    }
}

impl<R> BlogPostService<R>
where
    R: PostRepository,
{
    async fn page(
        &self,
        window: PublishedWindow,
        request: PageRequest,
    ) -> Result<Page<Post>, Error> {
        let total = self
            .posts
            .count(window)
            .await
            .map_err(map_repository_error)?;
        let items = self
            .posts
            .list(window, Some(request))
            .await
            .map_err(map_repository_error)?;
        Ok(Page::new(items, request, total))
    }

    async fn everything(&self, window: PublishedWindow) -> Result<Vec<Post>, Error> {
        self.posts
            .list(window, None)
            .await
            .map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> PostCommand for BlogPostService<R>
where
    R: PostRepository,
{
    async fn create_post(&self, draft: PostDraft) -> Result<Post, Error> {
        let post = draft.publish(PostId::random(), self.clock.utc());
        self.posts
            .insert(&post)
            .await
            .map_err(map_repository_error)?;
        debug!(post_id = %post.id(), "post published");
        Ok(post)
    }
}

#[async_trait]
impl<R> PostQuery for BlogPostService<R>
where
    R: PostRepository,
{
    async fn list_all(&self) -> Result<Vec<Post>, Error> {
        self.everything(PublishedWindow::All).await
    }

    async fn list_page(&self, request: PageRequest) -> Result<Page<Post>, Error> {
        self.page(PublishedWindow::All, request).await
    }

    async fn list_archive(&self, month: ArchiveMonth) -> Result<Vec<Post>, Error> {
        self.everything(PublishedWindow::Month(month)).await
    }

    async fn list_archive_page(
        &self,
        month: ArchiveMonth,
        request: PageRequest,
    ) -> Result<Page<Post>, Error> {
        self.page(PublishedWindow::Month(month), request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockPostRepository;
    use chrono::{DateTime, Local, TimeZone, Utc};
    use rstest::{fixture, rstest};

    struct FixtureClock {
        utc_now: DateTime<Utc>,
    }

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.utc_now.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.utc_now
        }
    }

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 18, 45, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    fn service(repo: MockPostRepository, now: DateTime<Utc>) -> BlogPostService<MockPostRepository> {
        BlogPostService::new(Arc::new(repo), Arc::new(FixtureClock { utc_now: now }))
    }

    fn draft() -> PostDraft {
        PostDraft::try_from_parts("T", "A", "a body long enough", None).expect("valid draft")
    }

    #[rstest]
    #[tokio::test]
    async fn create_post_stamps_clock_time_and_persists(now: DateTime<Utc>) {
        let mut repo = MockPostRepository::new();
        repo.expect_insert()
            .withf(move |post| post.pub_date() == now && post.title() == "T")
            .times(1)
            .return_once(|_| Ok(()));

        let post = service(repo, now)
            .create_post(draft())
            .await
            .expect("create succeeds");

        assert_eq!(post.pub_date(), now);
        assert_eq!(post.author(), "A");
    }

    #[rstest]
    #[case(PostPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(PostPersistenceError::query("constraint"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn create_post_maps_storage_errors(
        now: DateTime<Utc>,
        #[case] failure: PostPersistenceError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockPostRepository::new();
        repo.expect_insert().times(1).return_once(move |_| Err(failure));

        let err = service(repo, now)
            .create_post(draft())
            .await
            .expect_err("create fails");

        assert_eq!(err.code(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn list_page_passes_request_and_total_through(now: DateTime<Utc>) {
        let request = PageRequest::with_default_size(3).expect("valid page");
        let mut repo = MockPostRepository::new();
        repo.expect_count()
            .withf(|window| *window == PublishedWindow::All)
            .times(1)
            .return_once(|_| Ok(25));
        repo.expect_list()
            .withf(move |window, page| *window == PublishedWindow::All && *page == Some(request))
            .times(1)
            .return_once(|_, _| Ok(Vec::new()));

        let page = service(repo, now)
            .list_page(request)
            .await
            .expect("list succeeds");

        assert_eq!(page.total(), 25);
        assert_eq!(page.page(), 3);
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[rstest]
    #[tokio::test]
    async fn list_archive_filters_by_month_without_paging(now: DateTime<Utc>) {
        let month = ArchiveMonth::from_yyyymm(202401).expect("valid month");
        let mut repo = MockPostRepository::new();
        repo.expect_list()
            .withf(move |window, page| *window == PublishedWindow::Month(month) && page.is_none())
            .times(1)
            .return_once(|_, _| Ok(Vec::new()));

        let posts = service(repo, now)
            .list_archive(month)
            .await
            .expect("archive succeeds");

        assert!(posts.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn list_archive_page_combines_window_and_slice(now: DateTime<Utc>) {
        let month = ArchiveMonth::from_yyyymm(202402).expect("valid month");
        let request = PageRequest::with_default_size(1).expect("valid page");
        let mut repo = MockPostRepository::new();
        repo.expect_count()
            .withf(move |window| *window == PublishedWindow::Month(month))
            .times(1)
            .return_once(|_| Ok(11));
        repo.expect_list()
            .withf(move |window, page| {
                *window == PublishedWindow::Month(month) && *page == Some(request)
            })
            .times(1)
            .return_once(|_, _| Ok(Vec::new()));

        let page = service(repo, now)
            .list_archive_page(month, request)
            .await
            .expect("archive page succeeds");

        assert_eq!(page.total_pages(), 2);
        assert!(page.has_next());
    }

    #[rstest]
    #[tokio::test]
    async fn list_all_surfaces_connection_failures(now: DateTime<Utc>) {
        let mut repo = MockPostRepository::new();
        repo.expect_list()
            .times(1)
            .return_once(|_, _| Err(PostPersistenceError::connection("pool timed out")));

        let err = service(repo, now).list_all().await.expect_err("list fails");

        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
