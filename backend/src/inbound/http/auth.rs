//! Request extractors for the signed-in principal.
//!
//! [`PageContext`] resolves whoever is signed in, if anyone, and is taken by
//! every page handler to fill the shared layout. [`RequireLogin`] refuses
//! anonymous requests by redirecting to the login form with a `next`
//! parameter pointing back at the original URL.

use std::fmt;

use actix_web::{
    FromRequest, HttpRequest, HttpResponse, ResponseError,
    dev::Payload,
    http::{StatusCode, header},
    web,
};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, warn};
use url::form_urlencoded;

use super::session::SessionContext;
use super::state::HttpState;
use super::templates::Layout;
use crate::domain::ports::PrincipalQuery;
use crate::domain::{Error, Principal};

/// Path of the login form.
pub const LOGIN_PATH: &str = "/auth/login/";

/// `next` target, or `/` unless it is a path on this site.
///
/// # Examples
/// ```
/// use blog::inbound::http::auth::safe_next;
///
/// assert_eq!(safe_next(Some("/account/")), "/account/");
/// assert_eq!(safe_next(Some("//evil.example")), "/");
/// assert_eq!(safe_next(Some("https://evil.example")), "/");
/// assert_eq!(safe_next(None), "/");
/// ```
pub fn safe_next(next: Option<&str>) -> &str {
    match next {
        Some(path) if is_local_path(path) => path,
        _ => "/",
    }
}

fn is_local_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.starts_with("/\\")
        && !path.chars().any(char::is_control)
}

/// Login form URL that returns to `next` afterwards.
pub fn login_url(next: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("next", next)
        .finish();
    format!("{LOGIN_PATH}?{query}")
}

/// `303 See Other` to `location`.
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

async fn resolve_principal(
    session: &SessionContext,
    principals: &dyn PrincipalQuery,
) -> Result<Option<Principal>, Error> {
    let Some(id) = session.user_id()? else {
        return Ok(None);
    };
    let principal = principals.find_principal(&id).await?;
    if principal.is_none() {
        warn!(user_id = %id, "session refers to an unknown user");
    }
    Ok(principal)
}

fn http_state(req: &HttpRequest) -> Result<web::Data<HttpState>, Error> {
    req.app_data::<web::Data<HttpState>>()
        .cloned()
        .ok_or_else(|| Error::internal("HTTP state is not registered"))
}

/// Session plus the principal it resolves to.
pub struct PageContext {
    principal: Option<Principal>,
    session: SessionContext,
}

impl PageContext {
    /// Signed-in user, or `None` for anonymous visitors.
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    /// Session handle for login, logout and flashes.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Layout for the page being rendered. Consumes pending flashes.
    pub fn layout(&self) -> Layout {
        Layout {
            current_user: self
                .principal
                .as_ref()
                .map(|principal| principal.email().to_string()),
            flashes: self.session.take_flashes(),
        }
    }
}

impl FromRequest for PageContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        let state = http_state(req);
        Box::pin(async move {
            let session = session.await?;
            let state = state?;
            let principal = resolve_principal(&session, state.principals.as_ref()).await?;
            Ok(Self { principal, session })
        })
    }
}

/// Rejection raised by [`RequireLogin`] for anonymous requests.
#[derive(Debug)]
pub struct LoginRedirect {
    location: String,
}

impl LoginRedirect {
    fn for_request(req: &HttpRequest) -> Self {
        let target = req
            .uri()
            .path_and_query()
            .map_or_else(|| req.path().to_owned(), |pq| pq.as_str().to_owned());
        Self {
            location: login_url(&target),
        }
    }

    /// Login URL the client is sent to.
    pub fn location(&self) -> &str {
        &self.location
    }
}

impl fmt::Display for LoginRedirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "login required; redirecting to {}", self.location)
    }
}

impl ResponseError for LoginRedirect {
    fn status_code(&self) -> StatusCode {
        StatusCode::SEE_OTHER
    }

    fn error_response(&self) -> HttpResponse {
        see_other(&self.location)
    }
}

/// Admits only signed-in requests.
pub struct RequireLogin {
    principal: Principal,
    page: PageContext,
}

impl RequireLogin {
    /// The signed-in user.
    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    /// Page context of the admitted request.
    pub fn page(&self) -> &PageContext {
        &self.page
    }
}

impl FromRequest for RequireLogin {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let page = PageContext::from_request(req, payload);
        let redirect = LoginRedirect::for_request(req);
        Box::pin(async move {
            let page = page.await?;
            match page.principal.clone() {
                Some(principal) => Ok(Self { principal, page }),
                None => {
                    debug!(location = %redirect.location(), "anonymous request to protected page");
                    Err(redirect.into())
                }
            }
        })
    }
}
