//! HTTP inbound adapter serving the server-rendered blog pages.

pub mod auth;
pub mod error;
pub mod health;
pub mod posts;
pub mod session;
pub mod session_config;
pub mod state;
pub mod templates;
#[cfg(test)]
pub mod test_utils;
pub mod users;

use actix_web::web;

/// Register every page route.
///
/// Session middleware and [`state::HttpState`] are supplied by the caller.
/// The catch-all `/{page}` route is registered last.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::path_config())
        .service(posts::index)
        .service(posts::about)
        .service(posts::create_form)
        .service(posts::create_post)
        .service(posts::archive)
        .service(posts::archive_page)
        .service(users::login_form)
        .service(users::login_submit)
        .service(users::logout)
        .service(users::account)
        .service(posts::index_page);
}
