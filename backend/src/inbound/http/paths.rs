//! URL paths for every named route and the login redirect helpers.

use actix_web::HttpResponse;
use actix_web::http::header;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

pub const HOME: &str = "/";
pub const LOGIN: &str = "/auth/login/";
pub const LOGOUT: &str = "/auth/logout/";
pub const SIGNUP: &str = "/auth/signup/";
pub const NOTES_LIST: &str = "/notes/";
pub const NOTES_ADD: &str = "/add/";
pub const NOTES_SUCCESS: &str = "/done/";

/// Characters escaped in the `next` query value; `/` stays readable.
const NEXT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Path of the detail page for `slug`.
pub fn note_detail(slug: &str) -> String {
    format!("/note/{slug}/")
}

/// Path of the edit page for `slug`.
pub fn note_edit(slug: &str) -> String {
    format!("/edit/{slug}/")
}

/// Path of the delete page for `slug`.
pub fn note_delete(slug: &str) -> String {
    format!("/delete/{slug}/")
}

/// Login URL that returns to `next` after authenticating.
///
/// # Examples
/// ```
/// use notes_backend::inbound::http::paths::login_url;
///
/// assert_eq!(login_url("/notes/"), "/auth/login/?next=/notes/");
/// assert_eq!(login_url("/add/?a=1"), "/auth/login/?next=/add/%3Fa%3D1");
/// ```
pub fn login_url(next: &str) -> String {
    format!("{LOGIN}?next={}", utf8_percent_encode(next, NEXT_ENCODE_SET))
}

/// Accept `next` only when it is a path on this site.
///
/// # Examples
/// ```
/// use notes_backend::inbound::http::paths::safe_next;
///
/// assert_eq!(safe_next(Some("/notes/")), Some("/notes/"));
/// assert_eq!(safe_next(Some("//evil.example/")), None);
/// assert_eq!(safe_next(Some("https://evil.example/")), None);
/// ```
pub fn safe_next(next: Option<&str>) -> Option<&str> {
    next.filter(|value| {
        value.starts_with('/')
            && !value.starts_with("//")
            && !value.contains('\\')
            && !value.chars().any(char::is_control)
    })
}

/// `302 Found` pointing at `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.to_owned()))
        .finish()
}
