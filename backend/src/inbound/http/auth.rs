//! Authentication gate for note routes.
//!
//! [`CurrentUser`] is an extractor: a handler that takes it only runs for a
//! signed-in user. Anonymous callers get a `302` to the login page carrying
//! the requested path in `next`.

use actix_web::error::{ErrorInternalServerError, InternalError};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::User;

use super::paths::{login_url, redirect};
use super::session::SessionContext;
use super::state::HttpState;

/// Signed-in user resolved from the session.
#[derive(Debug, Clone)]
pub struct CurrentUser(User);

impl CurrentUser {
    /// The authenticated user.
    pub fn user(&self) -> &User {
        &self.0
    }

    /// Consume the extractor, returning the user.
    pub fn into_inner(self) -> User {
        self.0
    }
}

/// Resolve the session user, if the session names an existing account.
pub(crate) async fn session_user(
    session: &SessionContext,
    state: &HttpState,
) -> Result<Option<User>, crate::domain::Error> {
    let Some(user_id) = session.user_id()? else {
        return Ok(None);
    };
    let user = state.users.find_user(&user_id).await?;
    if user.is_none() {
        warn!(user_id = %user_id, "session refers to unknown user");
        session.clear();
    }
    Ok(user)
}

fn login_required(req: &HttpRequest) -> actix_web::Error {
    let next = req
        .uri()
        .path_and_query()
        .map_or_else(|| req.path().to_owned(), |pq| pq.as_str().to_owned());
    InternalError::from_response("login required", redirect(&login_url(&next))).into()
}

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        let session = SessionContext::from_request(&req, payload);
        Box::pin(async move {
            let session = session.await?;
            let state = req
                .app_data::<web::Data<HttpState>>()
                .cloned()
                .ok_or_else(|| ErrorInternalServerError("HTTP state is not configured"))?;
            match session_user(&session, &state).await? {
                Some(user) => Ok(Self(user)),
                None => Err(login_required(&req)),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::http::{StatusCode, header};
    use actix_web::{App, HttpResponse, test};
    use rstest::rstest;

    use crate::domain::UserId;
    use crate::domain::ports::{
        MockLoginService, MockNotesCommand, MockNotesQuery, MockSignupService, MockUsersQuery,
    };
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};

    fn state_with_users(users: MockUsersQuery) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            notes: Arc::new(MockNotesCommand::new()),
            notes_query: Arc::new(MockNotesQuery::new()),
            login: Arc::new(MockLoginService::new()),
            signup: Arc::new(MockSignupService::new()),
            users: Arc::new(users),
        })
    }

    async fn whoami(user: CurrentUser) -> HttpResponse {
        HttpResponse::Ok().body(user.user().username().to_string())
    }

    async fn sign_in(session: SessionContext, id: web::Path<String>) -> HttpResponse {
        let id = UserId::new(id.as_str()).expect("valid id");
        match session.persist_user(&id) {
            Ok(()) => HttpResponse::Ok().finish(),
            Err(_) => HttpResponse::InternalServerError().finish(),
        }
    }

    #[rstest]
    #[case("/whoami", "/auth/login/?next=/whoami")]
    #[case("/whoami?x=1", "/auth/login/?next=/whoami%3Fx%3D1")]
    #[actix_web::test]
    async fn anonymous_caller_is_redirected_with_next(
        #[case] uri: &str,
        #[case] location: &str,
    ) {
        let app = test::init_service(
            App::new()
                .app_data(state_with_users(MockUsersQuery::new()))
                .wrap(test_session_middleware())
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(
            res.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()),
            Some(location)
        );
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    #[actix_web::test]
    async fn session_user_must_still_exist(#[case] exists: bool) {
        let user = User::try_from_strings(UserId::random().to_string(), "ada").expect("user");
        let user_id = *user.id();
        let mut users = MockUsersQuery::new();
        users
            .expect_find_user()
            .withf(move |id| *id == user_id)
            .returning(move |_| Ok(exists.then(|| user.clone())));

        let app = test::init_service(
            App::new()
                .app_data(state_with_users(users))
                .wrap(test_session_middleware())
                .route("/sign-in/{id}", web::get().to(sign_in))
                .route("/whoami", web::get().to(whoami)),
        )
        .await;

        let sign_in_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/sign-in/{user_id}"))
                .to_request(),
        )
        .await;
        let cookie = session_cookie(&sign_in_res).expect("session cookie");

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/whoami")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        if exists {
            assert_eq!(res.status(), StatusCode::OK);
            assert_eq!(test::read_body(res).await, "ada");
        } else {
            assert_eq!(res.status(), StatusCode::FOUND);
        }
    }
}
