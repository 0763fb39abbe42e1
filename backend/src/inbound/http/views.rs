//! JSON view models for rendered pages.
//!
//! Each page carries what a template context would: `form` and `errors` on
//! form pages, `objectList` on the list page and `note` on single-note pages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{FieldErrors, Note, NoteForm, User};

/// Public projection of a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteView {
    pub title: String,
    pub text: String,
    pub slug: String,
    #[schema(format = Uuid)]
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Note> for NoteView {
    fn from(note: &Note) -> Self {
        Self {
            title: note.title().to_owned(),
            text: note.text().to_owned(),
            slug: note.slug().to_string(),
            author: note.author().to_string(),
            created_at: note.created_at(),
        }
    }
}

/// `notes:list` page.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteListPage {
    pub object_list: Vec<NoteView>,
}

/// `notes:detail` and `notes:delete` pages.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotePage {
    pub note: NoteView,
}

/// `notes:add` and `notes:edit` pages, including re-rendered invalid forms.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteFormPage {
    pub form: NoteForm,
    pub errors: FieldErrors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<NoteView>,
}

/// Login form values echoed back to the client; the password never is.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct LoginFormView {
    pub username: String,
}

/// `users:login` page.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginPage {
    pub form: LoginFormView,
    pub errors: FieldErrors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// Signup form values echoed back to the client.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SignupFormView {
    pub username: String,
}

/// `users:signup` page.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupPage {
    pub form: SignupFormView,
    pub errors: FieldErrors,
}

/// `notes:home` page.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl HomePage {
    pub fn for_user(user: Option<&User>) -> Self {
        Self {
            authenticated: user.is_some(),
            username: user.map(|user| user.username().to_string()),
        }
    }
}

/// Plain confirmation page (`notes:success`, `users:logout`).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessagePage {
    pub message: String,
}

impl MessagePage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
