//! Account page handlers.
//!
//! ```text
//! GET|POST  /auth/login/    login form / authenticate
//! GET|POST  /auth/logout/   forget the session
//! GET|POST  /auth/signup/   signup form / register
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Error, ErrorCode, FieldErrors, FormError, LoginCredentials, NON_FIELD_ERRORS, REQUIRED_FIELD,
    Registration,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::paths::{HOME, LOGIN, redirect, safe_next};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{
    LoginFormView, LoginPage, MessagePage, SignupFormView, SignupPage,
};

/// Non-field message shown when credentials do not match an account.
pub const INVALID_LOGIN: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";
/// Message rendered once the session has been cleared.
pub const LOGGED_OUT: &str = "Вы вышли из своей учётной записи.";

/// Query string accepted by the login page.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct NextQuery {
    /// Local path to return to after signing in.
    pub next: Option<String>,
}

/// Login form body.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Overrides the `next` query value when both are sent.
    #[serde(default)]
    pub next: Option<String>,
}

/// Signup form body.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password1: String,
    #[serde(default)]
    pub password2: String,
}

fn login_page(username: &str, errors: FieldErrors, next: Option<&str>) -> LoginPage {
    LoginPage {
        form: LoginFormView {
            username: username.to_owned(),
        },
        errors,
        next: safe_next(next).map(str::to_owned),
    }
}

/// Render the login form.
#[utoipa::path(
    get,
    path = "/auth/login/",
    params(NextQuery),
    responses((status = 200, description = "Login form", body = LoginPage)),
    tags = ["users"],
    operation_id = "loginForm",
    security([])
)]
#[get("/auth/login/")]
pub async fn login_form(query: web::Query<NextQuery>) -> web::Json<LoginPage> {
    web::Json(login_page("", FieldErrors::default(), query.next.as_deref()))
}

/// Authenticate and start a session.
///
/// Success redirects to `next` when it is a local path, otherwise home.
#[utoipa::path(
    post,
    path = "/auth/login/",
    params(NextQuery),
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Form re-rendered with errors", body = LoginPage),
        (status = 302, description = "Signed in", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login/")]
pub async fn login(
    session: SessionContext,
    state: web::Data<HttpState>,
    query: web::Query<NextQuery>,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let next = form.next.as_deref().or(query.next.as_deref());

    let credentials = match LoginCredentials::try_from_parts(&form.username, &form.password) {
        Ok(credentials) => credentials,
        Err(err) => {
            let errors = FieldErrors::single(err.field(), REQUIRED_FIELD);
            return Ok(HttpResponse::Ok().json(login_page(&form.username, errors, next)));
        }
    };

    let user_id = match state.login.authenticate(&credentials).await {
        Ok(user_id) => user_id,
        Err(err) if err.code() == ErrorCode::Unauthorized => {
            let errors = FieldErrors::single(NON_FIELD_ERRORS, INVALID_LOGIN);
            return Ok(HttpResponse::Ok().json(login_page(&form.username, errors, next)));
        }
        Err(err) => return Err(err),
    };

    session.persist_user(&user_id)?;
    Ok(redirect(safe_next(next).unwrap_or(HOME)))
}

/// Forget the session (GET).
#[utoipa::path(
    get,
    path = "/auth/logout/",
    responses((status = 200, description = "Logged out", body = MessagePage)),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[get("/auth/logout/")]
pub async fn logout(session: SessionContext) -> web::Json<MessagePage> {
    end_session(&session)
}

/// Forget the session (POST).
#[utoipa::path(
    post,
    path = "/auth/logout/",
    responses((status = 200, description = "Logged out", body = MessagePage)),
    tags = ["users"],
    operation_id = "logoutPost",
    security([])
)]
#[post("/auth/logout/")]
pub async fn logout_post(session: SessionContext) -> web::Json<MessagePage> {
    end_session(&session)
}

fn end_session(session: &SessionContext) -> web::Json<MessagePage> {
    if let Ok(Some(user_id)) = session.user_id() {
        info!(user_id = %user_id, "user logged out");
    }
    session.clear();
    web::Json(MessagePage::new(LOGGED_OUT))
}

/// Render the signup form.
#[utoipa::path(
    get,
    path = "/auth/signup/",
    responses((status = 200, description = "Signup form", body = SignupPage)),
    tags = ["users"],
    operation_id = "signupForm",
    security([])
)]
#[get("/auth/signup/")]
pub async fn signup_form() -> web::Json<SignupPage> {
    web::Json(SignupPage {
        form: SignupFormView::default(),
        errors: FieldErrors::default(),
    })
}

/// Create an account and send the caller to the login page.
#[utoipa::path(
    post,
    path = "/auth/signup/",
    request_body(content = SignupForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Form re-rendered with errors", body = SignupPage),
        (status = 302, description = "Registered"),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "signup",
    security([])
)]
#[post("/auth/signup/")]
pub async fn signup(
    state: web::Data<HttpState>,
    form: web::Form<SignupForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let rerender = |errors: FieldErrors| {
        HttpResponse::Ok().json(SignupPage {
            form: SignupFormView {
                username: form.username.clone(),
            },
            errors,
        })
    };

    let registration =
        match Registration::try_from_parts(&form.username, &form.password1, &form.password2) {
            Ok(registration) => registration,
            Err(errors) => return Ok(rerender(errors)),
        };

    match state.signup.register(&registration).await {
        Ok(_) => Ok(redirect(LOGIN)),
        Err(FormError::Invalid(errors)) => Ok(rerender(errors)),
        Err(FormError::Failed(err)) => Err(err),
    }
}
