//! Askama page templates and the view models they render.
//!
//! Every page embeds a [`Layout`] carrying the navigation state shared by
//! `base.html`: the signed-in email, if any, and pending flash messages.

use actix_web::{HttpResponse, http::StatusCode, http::header::ContentType};
use askama::Template;
use pagination::Page;

use crate::domain::{Error, Post};

/// Shared navigation state.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub current_user: Option<String>,
    pub flashes: Vec<String>,
}

/// A post as shown in listings.
#[derive(Debug, Clone)]
pub struct PostView {
    pub title: String,
    pub author: String,
    pub body: String,
    pub published: String,
}

impl From<&Post> for PostView {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title().to_owned(),
            author: post.author().to_owned(),
            body: post.body().to_owned(),
            published: post.pub_date().format("%B %-d, %Y %H:%M UTC").to_string(),
        }
    }
}

/// Previous/next navigation for paginated listings.
#[derive(Debug, Clone)]
pub struct Pager {
    pub page: u32,
    pub total_pages: u64,
    pub previous: Option<String>,
    pub next: Option<String>,
}

impl Pager {
    /// Build links for `page`, where `href` maps a page number to its URL.
    pub fn for_page<T>(page: &Page<T>, href: impl Fn(u32) -> String) -> Self {
        Self {
            page: page.page(),
            total_pages: page.total_pages(),
            previous: page.previous_page().map(&href),
            next: page.next_page().map(&href),
        }
    }
}

#[derive(Template)]
#[template(path = "posts.html")]
pub struct ListTemplate {
    pub layout: Layout,
    pub heading: String,
    pub posts: Vec<PostView>,
    pub pager: Option<Pager>,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub layout: Layout,
}

/// Creation form, either blank or echoing a rejected submission.
#[derive(Template, Default)]
#[template(path = "create.html")]
pub struct CreateTemplate {
    pub layout: Layout,
    pub title: String,
    pub author: String,
    pub body: String,
    pub title_errors: Vec<String>,
    pub author_errors: Vec<String>,
    pub body_errors: Vec<String>,
}

#[derive(Template, Default)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub layout: Layout,
    pub email: String,
    pub next: String,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "account.html")]
pub struct AccountTemplate {
    pub layout: Layout,
    pub email: String,
    pub user_id: String,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub layout: Layout,
    pub status: u16,
    pub reason: String,
    pub message: String,
    pub trace_id: Option<String>,
}

/// Render `template` as an HTML response with `status`.
pub fn render_html<T: Template>(template: &T, status: StatusCode) -> Result<HttpResponse, Error> {
    let body = template
        .render()
        .map_err(|err| Error::internal(format!("template render failed: {err}")))?;
    Ok(HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(body))
}
