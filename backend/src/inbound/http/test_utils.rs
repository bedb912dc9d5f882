//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, web};

use super::state::HttpState;
use crate::domain::ports::{MockLoginService, MockPostCommand, MockPostQuery, MockPrincipalQuery};

/// Session middleware with a fresh key and the `Secure` flag off so cookies
/// survive plain-HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by `res`.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// Every page route over `state`, wrapped in [`test_session_middleware`].
pub fn page_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .configure(super::configure)
        .default_service(web::to(super::error::not_found))
}

/// Ports that panic on any call; tests replace the ones they exercise.
pub fn idle_ports() -> (
    MockLoginService,
    MockPrincipalQuery,
    MockPostQuery,
    MockPostCommand,
) {
    (
        MockLoginService::new(),
        MockPrincipalQuery::new(),
        MockPostQuery::new(),
        MockPostCommand::new(),
    )
}

/// Assemble state from mocks.
pub fn state_from(
    login: MockLoginService,
    principals: MockPrincipalQuery,
    posts: MockPostQuery,
    post_commands: MockPostCommand,
) -> HttpState {
    HttpState::new(
        Arc::new(login),
        Arc::new(principals),
        Arc::new(posts),
        Arc::new(post_commands),
    )
}

/// Response body as UTF-8 text.
pub async fn body_text<B: MessageBody>(res: ServiceResponse<B>) -> String {
    let bytes = actix_web::test::read_body(res).await;
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

/// `Location` header of a redirect.
pub fn location<B>(res: &ServiceResponse<B>) -> Option<&str> {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}
