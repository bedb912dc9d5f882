//! Cookie session access for handlers.
//!
//! The cookie holds only the signed-in user's id and a queue of one-shot
//! flash messages. Resolving the id to a principal is the job of the
//! extractors in [`super::auth`].

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, Principal, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const FLASH_KEY: &str = "flash";

/// Handler-facing wrapper over the Actix session.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Start an authenticated session for `principal`.
    ///
    /// The session is renewed first so a cookie planted before login never
    /// becomes authenticated.
    pub fn login(&self, principal: &Principal) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, principal.id().to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// User id stored by [`Self::login`]. A value that does not parse is
    /// logged and treated as anonymous.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let raw = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        Ok(raw.and_then(|raw| match UserId::new(&raw) {
            Ok(id) => Some(id),
            Err(error) => {
                warn!(%error, "invalid user id in session cookie");
                None
            }
        }))
    }

    /// Drop everything stored in the session. Safe to call when anonymous.
    pub fn logout(&self) {
        self.0.purge();
    }

    /// Queue a message for the next rendered page.
    pub fn flash(&self, message: impl Into<String>) -> Result<(), Error> {
        let mut pending = self.read_flashes();
        pending.push(message.into());
        self.0
            .insert(FLASH_KEY, pending)
            .map_err(|error| Error::internal(format!("failed to persist flash: {error}")))
    }

    /// Remove and return queued flash messages.
    pub fn take_flashes(&self) -> Vec<String> {
        let pending = self.read_flashes();
        if !pending.is_empty() {
            self.0.remove(FLASH_KEY);
        }
        pending
    }

    fn read_flashes(&self) -> Vec<String> {
        match self.0.get::<Vec<String>>(FLASH_KEY) {
            Ok(pending) => pending.unwrap_or_default(),
            Err(error) => {
                warn!(%error, "discarding unreadable flash messages");
                Vec::new()
            }
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Email;
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test, web};

    const FIXTURE_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    fn principal() -> Principal {
        Principal::new(
            UserId::new(FIXTURE_ID).expect("fixture id"),
            Email::new("blogger@sample.com").expect("fixture email"),
        )
    }

    async fn whoami(session: SessionContext) -> Result<HttpResponse, Error> {
        let body = session
            .user_id()?
            .map_or_else(|| "anonymous".to_owned(), |id| id.to_string());
        Ok(HttpResponse::Ok().body(body))
    }

    #[actix_web::test]
    async fn login_round_trips_user_id() {
        let app = actix_test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/login",
                    web::get().to(|session: SessionContext| async move {
                        session.login(&principal())?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/login").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let cookie = session_cookie(&res);

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/whoami")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(actix_test::read_body(res).await, FIXTURE_ID);
    }

    #[actix_web::test]
    async fn tampered_user_id_is_anonymous() {
        let app = actix_test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/plant",
                    web::get().to(|session: Session| async move {
                        session
                            .insert(USER_ID_KEY, "not-a-uuid")
                            .expect("set invalid user id");
                        HttpResponse::Ok()
                    }),
                )
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/plant").to_request()).await;
        let cookie = session_cookie(&res);
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/whoami")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(actix_test::read_body(res).await, "anonymous");
    }

    #[actix_web::test]
    async fn flashes_survive_redirect_and_are_consumed_once() {
        let app = actix_test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/flash",
                    web::get().to(|session: SessionContext| async move {
                        session.flash("first")?;
                        session.flash("second")?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/show",
                    web::get().to(|session: SessionContext| async move {
                        let first = session.take_flashes().join("|");
                        let second = session.take_flashes().join("|");
                        HttpResponse::Ok().body(format!("{first};{second}"))
                    }),
                ),
        )
        .await;

        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/flash").to_request()).await;
        let cookie = session_cookie(&res);
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/show")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(actix_test::read_body(res).await, "first|second;");
    }
}
