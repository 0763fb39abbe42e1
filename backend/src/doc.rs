//! OpenAPI document for the notes pages.
//!
//! Served by Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, FieldErrors, NoteForm};
use crate::inbound::http::users::{LoginForm, SignupForm};
use crate::inbound::http::views::{
    HomePage, LoginFormView, LoginPage, MessagePage, NoteFormPage, NoteListPage, NotePage,
    NoteView, SignupFormView, SignupPage,
};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /auth/login/.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Notes",
        description = "Personal notes with author-only access and session login."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::pages::home,
        crate::inbound::http::users::login_form,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::logout_post,
        crate::inbound::http::users::signup_form,
        crate::inbound::http::users::signup,
        crate::inbound::http::notes::list_notes,
        crate::inbound::http::notes::add_form,
        crate::inbound::http::notes::add_note,
        crate::inbound::http::notes::note_detail,
        crate::inbound::http::notes::edit_form,
        crate::inbound::http::notes::edit_note,
        crate::inbound::http::notes::delete_form,
        crate::inbound::http::notes::delete_note,
        crate::inbound::http::notes::success,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        FieldErrors,
        NoteForm,
        NoteView,
        NoteListPage,
        NotePage,
        NoteFormPage,
        LoginForm,
        LoginFormView,
        LoginPage,
        SignupForm,
        SignupFormView,
        SignupPage,
        HomePage,
        MessagePage
    )),
    tags(
        (name = "notes", description = "Note pages, visible to their author only"),
        (name = "users", description = "Login, logout and signup"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/notes/")]
    #[case("/add/")]
    #[case("/note/{slug}/")]
    #[case("/edit/{slug}/")]
    #[case("/delete/{slug}/")]
    #[case("/done/")]
    #[case("/auth/login/")]
    #[case("/auth/signup/")]
    fn document_lists_page_paths(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
