//! Note page handlers.
//!
//! ```text
//! GET       /notes/            list own notes
//! GET|POST  /add/              add form / create
//! GET       /note/{slug}/      detail
//! GET|POST  /edit/{slug}/      edit form / update
//! GET|POST  /delete/{slug}/    delete confirmation / delete
//! GET       /done/             success page
//! ```
//!
//! Every handler takes [`CurrentUser`] first, so anonymous callers are
//! redirected to the login page before anything else is read.

use actix_web::{HttpResponse, get, post, web};

use crate::domain::{Error, FieldErrors, FormError, NoteForm};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::CurrentUser;
use crate::inbound::http::paths::{NOTES_SUCCESS, redirect};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{MessagePage, NoteFormPage, NoteListPage, NotePage, NoteView};

/// Re-render a rejected form with its submitted values.
fn render_invalid(form: NoteForm, errors: FieldErrors, note: Option<NoteView>) -> HttpResponse {
    HttpResponse::Ok().json(NoteFormPage { form, errors, note })
}

/// List the caller's notes.
#[utoipa::path(
    get,
    path = "/notes/",
    responses(
        (status = 200, description = "Own notes", body = NoteListPage),
        (status = 302, description = "Login required"),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["notes"],
    operation_id = "listNotes"
)]
#[get("/notes/")]
pub async fn list_notes(
    user: CurrentUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<NoteListPage>> {
    let notes = state.notes_query.list(user.user().id()).await?;
    Ok(web::Json(NoteListPage {
        object_list: notes.iter().map(NoteView::from).collect(),
    }))
}

/// Render an empty note form.
#[utoipa::path(
    get,
    path = "/add/",
    responses(
        (status = 200, description = "Empty note form", body = NoteFormPage),
        (status = 302, description = "Login required")
    ),
    tags = ["notes"],
    operation_id = "addNoteForm"
)]
#[get("/add/")]
pub async fn add_form(_user: CurrentUser) -> web::Json<NoteFormPage> {
    web::Json(NoteFormPage {
        form: NoteForm::default(),
        errors: FieldErrors::default(),
        note: None,
    })
}

/// Create a note owned by the caller.
#[utoipa::path(
    post,
    path = "/add/",
    request_body(content = NoteForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Form re-rendered with errors", body = NoteFormPage),
        (status = 302, description = "Created, or login required"),
        (status = 503, description = "Storage unavailable", body = Error)
    ),
    tags = ["notes"],
    operation_id = "addNote"
)]
#[post("/add/")]
pub async fn add_note(
    user: CurrentUser,
    state: web::Data<HttpState>,
    form: web::Form<NoteForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    match state.notes.create(user.user().id(), &form).await {
        Ok(_) => Ok(redirect(NOTES_SUCCESS)),
        Err(FormError::Invalid(errors)) => Ok(render_invalid(form, errors, None)),
        Err(FormError::Failed(err)) => Err(err),
    }
}

/// Show one of the caller's notes.
#[utoipa::path(
    get,
    path = "/note/{slug}/",
    params(("slug" = String, Path, description = "Note slug")),
    responses(
        (status = 200, description = "Note", body = NotePage),
        (status = 302, description = "Login required"),
        (status = 404, description = "No such note for this user", body = Error)
    ),
    tags = ["notes"],
    operation_id = "noteDetail"
)]
#[get("/note/{slug}/")]
pub async fn note_detail(
    user: CurrentUser,
    state: web::Data<HttpState>,
    slug: web::Path<String>,
) -> ApiResult<web::Json<NotePage>> {
    let note = state.notes_query.get(user.user().id(), &slug).await?;
    Ok(web::Json(NotePage {
        note: NoteView::from(&note),
    }))
}

/// Render the edit form pre-filled with the note's values.
#[utoipa::path(
    get,
    path = "/edit/{slug}/",
    params(("slug" = String, Path, description = "Note slug")),
    responses(
        (status = 200, description = "Pre-filled note form", body = NoteFormPage),
        (status = 302, description = "Login required"),
        (status = 404, description = "No such note for this user", body = Error)
    ),
    tags = ["notes"],
    operation_id = "editNoteForm"
)]
#[get("/edit/{slug}/")]
pub async fn edit_form(
    user: CurrentUser,
    state: web::Data<HttpState>,
    slug: web::Path<String>,
) -> ApiResult<web::Json<NoteFormPage>> {
    let note = state.notes_query.get(user.user().id(), &slug).await?;
    Ok(web::Json(NoteFormPage {
        form: NoteForm::from_content(note.content()),
        errors: FieldErrors::default(),
        note: Some(NoteView::from(&note)),
    }))
}

/// Apply an edit to one of the caller's notes.
#[utoipa::path(
    post,
    path = "/edit/{slug}/",
    params(("slug" = String, Path, description = "Note slug")),
    request_body(content = NoteForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Form re-rendered with errors", body = NoteFormPage),
        (status = 302, description = "Updated, or login required"),
        (status = 404, description = "No such note for this user", body = Error)
    ),
    tags = ["notes"],
    operation_id = "editNote"
)]
#[post("/edit/{slug}/")]
pub async fn edit_note(
    user: CurrentUser,
    state: web::Data<HttpState>,
    slug: web::Path<String>,
    form: web::Form<NoteForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    match state.notes.update(user.user().id(), &slug, &form).await {
        Ok(_) => Ok(redirect(NOTES_SUCCESS)),
        Err(FormError::Invalid(errors)) => {
            // The stored note still carries the old values.
            let note = state.notes_query.get(user.user().id(), &slug).await?;
            Ok(render_invalid(form, errors, Some(NoteView::from(&note))))
        }
        Err(FormError::Failed(err)) => Err(err),
    }
}

/// Render the delete confirmation page.
#[utoipa::path(
    get,
    path = "/delete/{slug}/",
    params(("slug" = String, Path, description = "Note slug")),
    responses(
        (status = 200, description = "Delete confirmation", body = NotePage),
        (status = 302, description = "Login required"),
        (status = 404, description = "No such note for this user", body = Error)
    ),
    tags = ["notes"],
    operation_id = "deleteNoteForm"
)]
#[get("/delete/{slug}/")]
pub async fn delete_form(
    user: CurrentUser,
    state: web::Data<HttpState>,
    slug: web::Path<String>,
) -> ApiResult<web::Json<NotePage>> {
    let note = state.notes_query.get(user.user().id(), &slug).await?;
    Ok(web::Json(NotePage {
        note: NoteView::from(&note),
    }))
}

/// Delete one of the caller's notes.
#[utoipa::path(
    post,
    path = "/delete/{slug}/",
    params(("slug" = String, Path, description = "Note slug")),
    responses(
        (status = 302, description = "Deleted, or login required"),
        (status = 404, description = "No such note for this user", body = Error)
    ),
    tags = ["notes"],
    operation_id = "deleteNote"
)]
#[post("/delete/{slug}/")]
pub async fn delete_note(
    user: CurrentUser,
    state: web::Data<HttpState>,
    slug: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.notes.delete(user.user().id(), &slug).await?;
    Ok(redirect(NOTES_SUCCESS))
}

/// Confirmation shown after a successful mutation.
#[utoipa::path(
    get,
    path = "/done/",
    responses(
        (status = 200, description = "Success page", body = MessagePage),
        (status = 302, description = "Login required")
    ),
    tags = ["notes"],
    operation_id = "noteSuccess"
)]
#[get("/done/")]
pub async fn success(_user: CurrentUser) -> web::Json<MessagePage> {
    web::Json(MessagePage::new("Успешно!"))
}

#[cfg(test)]
#[path = "notes_tests.rs"]
mod tests;
