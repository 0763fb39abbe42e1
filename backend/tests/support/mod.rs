//! Shared helpers for the page-level integration tests.
//!
//! Each test builds the full page router over in-memory repositories and
//! signs users in through the real signup and login forms.

#![allow(dead_code, reason = "each test crate uses a different subset")]

use std::sync::Arc;

use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use chrono::Utc;
use mockable::DefaultClock;

use notes_backend::domain::ports::{NoteRepository, UserAccountRepository};
use notes_backend::domain::{AccountService, Note, NoteForm, NoteId, NoteService, UserId};
use notes_backend::inbound::http::configure;
use notes_backend::inbound::http::state::HttpState;
use notes_backend::outbound::memory::{InMemoryNoteRepository, InMemoryUserAccountRepository};

pub const PASSWORD: &str = "correct-horse-battery";

/// Repositories shared between the app under test and the assertions.
#[derive(Clone, Default)]
pub struct Stores {
    pub notes: Arc<InMemoryNoteRepository>,
    pub accounts: Arc<InMemoryUserAccountRepository>,
}

impl Stores {
    /// Id of the account registered as `username`.
    pub async fn user_id(&self, username: &str) -> UserId {
        let account = self
            .accounts
            .find_by_username(username)
            .await
            .expect("account lookup")
            .expect("account exists");
        *account.id()
    }

    /// Insert a note for `author` without going through HTTP.
    pub async fn seed_note(&self, author: &UserId, title: &str, slug: &str) -> Note {
        let content = NoteForm {
            title: title.to_owned(),
            text: format!("Текст для {title}"),
            slug: Some(slug.to_owned()),
        }
        .clean()
        .expect("valid note");
        let note = Note::new(NoteId::random(), *author, content, Utc::now());
        self.notes.insert(&note).await.expect("insert note");
        note
    }

    /// Current note for `slug`, whoever owns it.
    pub async fn note(&self, slug: &str) -> Option<Note> {
        let slug = notes_backend::domain::NoteSlug::new(slug).ok()?;
        self.notes.find_by_slug(&slug).await.expect("note lookup")
    }

    pub async fn note_count(&self) -> u64 {
        self.notes.count().await.expect("count notes")
    }
}

/// Build the page router over `stores`.
pub async fn init_app(
    stores: &Stores,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> + use<>
{
    let notes = NoteService::new(stores.notes.clone(), Arc::new(DefaultClock));
    let accounts = AccountService::new(stores.accounts.clone());
    let state = HttpState::from_services(Arc::new(notes), Arc::new(accounts));

    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                    .cookie_name("session".to_owned())
                    .cookie_secure(false)
                    .build(),
            )
            .configure(configure),
    )
    .await
}

pub fn location(response: &ServiceResponse) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

fn session_cookie(response: &ServiceResponse) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// Register `username` through the signup form.
pub async fn sign_up<S>(app: &S, username: &str)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/auth/signup/")
            .set_form([
                ("username", username),
                ("password1", PASSWORD),
                ("password2", PASSWORD),
            ])
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FOUND, "signup of {username}");
}

/// Sign `username` in through the login form and return the session cookie.
pub async fn log_in<S>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/auth/login/")
            .set_form([("username", username), ("password", PASSWORD)])
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FOUND, "login of {username}");
    session_cookie(&response).expect("session cookie")
}

/// Register and sign in `username`.
pub async fn signed_in<S>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    sign_up(app, username).await;
    log_in(app, username).await
}

pub async fn get<S>(app: &S, uri: &str, cookie: Option<&Cookie<'static>>) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let mut request = test::TestRequest::get().uri(uri);
    if let Some(cookie) = cookie {
        request = request.cookie(cookie.clone());
    }
    test::call_service(app, request.to_request()).await
}

pub async fn post_form<S>(
    app: &S,
    uri: &str,
    cookie: Option<&Cookie<'static>>,
    form: &[(&str, &str)],
) -> ServiceResponse
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let mut request = test::TestRequest::post().uri(uri).set_form(form);
    if let Some(cookie) = cookie {
        request = request.cookie(cookie.clone());
    }
    test::call_service(app, request.to_request()).await
}
