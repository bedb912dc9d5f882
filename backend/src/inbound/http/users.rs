//! Login, logout and account pages.

use actix_web::{HttpResponse, get, http::StatusCode, post, web};
use serde::Deserialize;
use tracing::info;

use super::auth::{PageContext, RequireLogin, safe_next, see_other};
use super::session::SessionContext;
use super::state::HttpState;
use super::templates::{AccountTemplate, LoginTemplate, render_html};
use crate::domain::{ApiResult, ErrorCode, LoginCredentials};

pub(crate) const LOGGED_IN_MESSAGE: &str = "Logged in successfully.";

/// `?next=` on the login and logout URLs.
#[derive(Debug, Default, Deserialize)]
pub struct NextQuery {
    /// Local path to return to.
    pub next: Option<String>,
}

/// Submitted login form. `next` travels in a hidden field.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub next: Option<String>,
}

fn login_page(
    ctx: &PageContext,
    email: String,
    next: &str,
    error: Option<String>,
    status: StatusCode,
) -> ApiResult<HttpResponse> {
    render_html(
        &LoginTemplate {
            layout: ctx.layout(),
            email,
            next: next.to_owned(),
            errors: error.into_iter().collect(),
        },
        status,
    )
}

#[get("/auth/login/")]
pub async fn login_form(ctx: PageContext, query: web::Query<NextQuery>) -> ApiResult<HttpResponse> {
    let next = safe_next(query.next.as_deref());
    login_page(&ctx, String::new(), next, None, StatusCode::OK)
}

/// Authenticate and start a session.
///
/// Malformed input re-renders the form with `400`; wrong credentials
/// re-render it with `401` and one message that does not reveal which part
/// was wrong.
#[post("/auth/login/")]
pub async fn login_submit(
    ctx: PageContext,
    state: web::Data<HttpState>,
    query: web::Query<NextQuery>,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let LoginForm {
        email,
        password,
        next,
    } = form.into_inner();
    let next = safe_next(
        next.as_deref()
            .filter(|value| !value.is_empty())
            .or(query.next.as_deref()),
    )
    .to_owned();

    let credentials = match LoginCredentials::try_from_parts(&email, &password) {
        Ok(credentials) => credentials,
        Err(err) => {
            return login_page(
                &ctx,
                email,
                &next,
                Some(err.to_string()),
                StatusCode::BAD_REQUEST,
            );
        }
    };

    match state.login.authenticate(&credentials).await {
        Ok(principal) => {
            ctx.session().login(&principal)?;
            ctx.session().flash(LOGGED_IN_MESSAGE)?;
            info!(user_id = %principal.id(), "session started");
            Ok(see_other(&next))
        }
        Err(err) if err.code() == ErrorCode::Unauthorized => login_page(
            &ctx,
            email,
            &next,
            Some(err.message().to_owned()),
            StatusCode::UNAUTHORIZED,
        ),
        Err(err) => Err(err),
    }
}

/// End the session. Anonymous callers are redirected all the same.
#[get("/logout/")]
pub async fn logout(session: SessionContext, query: web::Query<NextQuery>) -> HttpResponse {
    session.logout();
    see_other(safe_next(query.next.as_deref()))
}

#[get("/account/")]
pub async fn account(user: RequireLogin) -> ApiResult<HttpResponse> {
    let principal = user.principal();
    render_html(
        &AccountTemplate {
            layout: user.page().layout(),
            email: principal.email().to_string(),
            user_id: principal.id().to_string(),
        },
        StatusCode::OK,
    )
}
