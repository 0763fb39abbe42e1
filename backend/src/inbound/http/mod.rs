//! HTTP inbound adapter: page handlers, session plumbing and route wiring.

pub mod auth;
pub mod error;
pub mod health;
pub mod notes;
pub mod pages;
pub mod paths;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod views;

use actix_web::web;

pub use error::ApiResult;

/// Register every page route on `cfg`.
///
/// The caller provides [`state::HttpState`] as app data and wraps the scope
/// in a session middleware.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use notes_backend::inbound::http::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(pages::home)
        .service(users::login_form)
        .service(users::login)
        .service(users::logout)
        .service(users::logout_post)
        .service(users::signup_form)
        .service(users::signup)
        .service(notes::list_notes)
        .service(notes::add_form)
        .service(notes::add_note)
        .service(notes::note_detail)
        .service(notes::edit_form)
        .service(notes::edit_note)
        .service(notes::delete_form)
        .service(notes::delete_note)
        .service(notes::success);
}
