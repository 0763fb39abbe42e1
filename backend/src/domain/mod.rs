//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed entities for notes and accounts, the form
//! validation rules, the ownership policy and the services implementing the
//! driving ports. Nothing in here knows about HTTP or SQL.
//!
//! Public surface:
//! - `Error`/`ErrorCode`: transport-agnostic failure payload.
//! - `Note`, `NoteSlug`, `NoteForm`: the notes resource and its input form.
//! - `AccessPolicy`: the single ownership gate.
//! - `NoteService`, `AccountService`: port implementations.

pub mod access;
pub mod account;
pub mod account_service;
pub mod auth;
pub mod error;
pub mod form;
pub mod note;
pub mod note_form;
pub mod note_service;
pub mod ports;
pub mod slug;
pub mod trace_id;
pub mod user;

pub use self::access::{Access, AccessPolicy, Target};
pub use self::account::UserAccount;
pub use self::account_service::{AccountService, USERNAME_TAKEN};
pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MISMATCH, PasswordHash, PasswordHashError,
    REQUIRED_FIELD, Registration,
};
pub use self::error::{Error, ErrorCode};
pub use self::form::{FieldErrors, FormError, NON_FIELD_ERRORS};
pub use self::note::{Note, NoteContent, NoteId, TITLE_MAX_LEN};
pub use self::note_form::{NoteForm, UNDERIVABLE_SLUG, WARNING, duplicate_slug_message};
pub use self::note_service::NoteService;
pub use self::slug::{NoteSlug, SLUG_MAX_LEN, SlugValidationError, slugify};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{USERNAME_MAX, User, UserId, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use notes_backend::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("missing"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
