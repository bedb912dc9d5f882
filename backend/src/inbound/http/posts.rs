//! Post listing and creation pages.
//!
//! ```text
//! GET  /                        every post
//! GET  /{page}                  ten posts per page
//! GET  /archive/{YYYYMM}        posts of one month
//! GET  /archive/{YYYYMM}/{page} one page of a month
//! GET  /about
//! GET  /create, POST /create
//! ```
//!
//! `/{page}` matches any single segment, so [`index_page`] must be registered
//! after every other single-segment route.

use actix_web::{HttpResponse, get, http::StatusCode, post, web};
use pagination::{Page, PageRequest};
use serde::Deserialize;
use tracing::info;

use super::auth::{PageContext, see_other};
use super::state::HttpState;
use super::templates::{
    AboutTemplate, CreateTemplate, ListTemplate, Pager, PostView, render_html,
};
use crate::domain::{ApiResult, ArchiveMonth, Error, Post, PostDraft, PostField};

const POST_PUBLISHED: &str = "Post published.";

fn page_request(page: u32) -> Result<PageRequest, Error> {
    PageRequest::with_default_size(page)
        .map_err(|_| Error::not_found(format!("There is no page {page}.")))
}

fn archive_month(date: u32) -> Result<ArchiveMonth, Error> {
    ArchiveMonth::from_yyyymm(date)
        .map_err(|err| Error::not_found(format!("No archive for {date}: {err}.")))
}

fn views(posts: &[Post]) -> Vec<PostView> {
    posts.iter().map(PostView::from).collect()
}

fn listing(
    ctx: &PageContext,
    heading: String,
    posts: &[Post],
    pager: Option<Pager>,
) -> ApiResult<HttpResponse> {
    render_html(
        &ListTemplate {
            layout: ctx.layout(),
            heading,
            posts: views(posts),
            pager,
        },
        StatusCode::OK,
    )
}

fn paged_listing(
    ctx: &PageContext,
    heading: String,
    page: &Page<Post>,
    href: impl Fn(u32) -> String,
) -> ApiResult<HttpResponse> {
    let pager = Pager::for_page(page, href);
    listing(ctx, heading, page.items(), Some(pager))
}

#[get("/")]
pub async fn index(ctx: PageContext, state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let posts = state.posts.list_all().await?;
    listing(&ctx, "Recent posts".to_owned(), &posts, None)
}

#[get("/{page}")]
pub async fn index_page(
    ctx: PageContext,
    state: web::Data<HttpState>,
    path: web::Path<u32>,
) -> ApiResult<HttpResponse> {
    let request = page_request(path.into_inner())?;
    let page = state.posts.list_page(request).await?;
    paged_listing(&ctx, "Recent posts".to_owned(), &page, |n| format!("/{n}"))
}

#[get("/archive/{date}")]
pub async fn archive(
    ctx: PageContext,
    state: web::Data<HttpState>,
    path: web::Path<u32>,
) -> ApiResult<HttpResponse> {
    let month = archive_month(path.into_inner())?;
    let posts = state.posts.list_archive(month).await?;
    listing(&ctx, format!("Archive for {month}"), &posts, None)
}

#[get("/archive/{date}/{page}")]
pub async fn archive_page(
    ctx: PageContext,
    state: web::Data<HttpState>,
    path: web::Path<(u32, u32)>,
) -> ApiResult<HttpResponse> {
    let (date, number) = path.into_inner();
    let month = archive_month(date)?;
    let request = page_request(number)?;
    let page = state.posts.list_archive_page(month, request).await?;
    let date = month.as_yyyymm();
    paged_listing(&ctx, format!("Archive for {month}"), &page, |n| {
        format!("/archive/{date}/{n}")
    })
}

#[get("/about")]
pub async fn about(ctx: PageContext) -> ApiResult<HttpResponse> {
    render_html(
        &AboutTemplate {
            layout: ctx.layout(),
        },
        StatusCode::OK,
    )
}

/// Submitted creation form. Missing fields arrive as empty strings and are
/// reported by validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PostForm {
    pub title: String,
    pub author: String,
    pub body: String,
}

#[get("/create")]
pub async fn create_form(ctx: PageContext) -> ApiResult<HttpResponse> {
    render_html(
        &CreateTemplate {
            layout: ctx.layout(),
            ..CreateTemplate::default()
        },
        StatusCode::OK,
    )
}

#[post("/create")]
pub async fn create_post(
    ctx: PageContext,
    state: web::Data<HttpState>,
    form: web::Form<PostForm>,
) -> ApiResult<HttpResponse> {
    let PostForm {
        title,
        author,
        body,
    } = form.into_inner();
    let draft = match PostDraft::try_from_parts(&title, &author, &body, None) {
        Ok(draft) => draft,
        Err(errors) => {
            info!(fields = %errors, "post rejected");
            let page = CreateTemplate {
                layout: ctx.layout(),
                title_errors: errors.messages_for(PostField::Title),
                author_errors: errors.messages_for(PostField::Author),
                body_errors: errors.messages_for(PostField::Body),
                title,
                author,
                body,
            };
            return render_html(&page, StatusCode::BAD_REQUEST);
        }
    };

    let post = state.post_commands.create_post(draft).await?;
    info!(post_id = %post.id(), "post created");
    ctx.session().flash(POST_PUBLISHED)?;
    Ok(see_other("/"))
}
