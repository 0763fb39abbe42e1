//! Ownership-based access policy for notes.
//!
//! Every resource-scoped note operation passes through [`AccessPolicy`]. A
//! denied request is reported as "not found" so callers cannot tell a foreign
//! note from a missing one.

use tracing::warn;

use super::{Error, Note, UserId};

/// What an actor is trying to reach.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    /// The actor's own collection, such as the list page or the add form.
    OwnNotes,
    /// A single stored note.
    Note(&'a Note),
}

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allowed,
    Denied,
}

/// Single authorization gate for note operations.
#[derive(Debug, Default, Clone, Copy)]
pub struct AccessPolicy;

impl AccessPolicy {
    /// Decide whether `actor` may operate on `target`.
    ///
    /// # Examples
    /// ```
    /// use notes_backend::domain::{Access, AccessPolicy, Target, UserId};
    ///
    /// let actor = UserId::random();
    /// assert_eq!(AccessPolicy.check(&actor, Target::OwnNotes), Access::Allowed);
    /// ```
    pub fn check(&self, actor: &UserId, target: Target<'_>) -> Access {
        match target {
            Target::OwnNotes => Access::Allowed,
            Target::Note(note) if note.is_owned_by(actor) => Access::Allowed,
            Target::Note(_) => Access::Denied,
        }
    }

    /// Resolve a looked-up note into one the actor may use.
    ///
    /// Both a missing note and a denied one yield [`Error::not_found`] with the
    /// same message.
    pub fn authorize(&self, actor: &UserId, slug: &str, note: Option<Note>) -> Result<Note, Error> {
        let Some(note) = note else {
            return Err(not_found(slug));
        };
        match self.check(actor, Target::Note(&note)) {
            Access::Allowed => Ok(note),
            Access::Denied => {
                warn!(actor = %actor, note_id = %note.id(), "denied access to foreign note");
                Err(not_found(slug))
            }
        }
    }
}

fn not_found(slug: &str) -> Error {
    Error::not_found(format!("note {slug} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, NoteForm, NoteId};
    use chrono::Utc;
    use rstest::{fixture, rstest};

    #[fixture]
    fn owner() -> UserId {
        UserId::random()
    }

    fn note_owned_by(owner: UserId) -> Note {
        let content = NoteForm {
            title: "Title".into(),
            text: "Text".into(),
            slug: Some("note_1".into()),
        }
        .clean()
        .expect("valid form");
        Note::new(NoteId::random(), owner, content, Utc::now())
    }

    #[rstest]
    fn owner_is_allowed(owner: UserId) {
        let note = note_owned_by(owner);
        assert_eq!(AccessPolicy.check(&owner, Target::Note(&note)), Access::Allowed);
        assert_eq!(
            AccessPolicy.authorize(&owner, "note_1", Some(note.clone())),
            Ok(note)
        );
    }

    #[rstest]
    fn stranger_is_denied(owner: UserId) {
        let note = note_owned_by(owner);
        let stranger = UserId::random();
        assert_eq!(
            AccessPolicy.check(&stranger, Target::Note(&note)),
            Access::Denied
        );
    }

    #[rstest]
    fn denied_and_missing_are_indistinguishable(owner: UserId) {
        let stranger = UserId::random();
        let denied = AccessPolicy
            .authorize(&stranger, "note_1", Some(note_owned_by(owner)))
            .expect_err("stranger denied");
        let missing = AccessPolicy
            .authorize(&stranger, "note_1", None)
            .expect_err("missing note");
        assert_eq!(denied.code(), ErrorCode::NotFound);
        assert_eq!(denied.code(), missing.code());
        assert_eq!(denied.message(), missing.message());
    }

    #[rstest]
    fn own_collection_is_always_allowed(owner: UserId) {
        assert_eq!(AccessPolicy.check(&owner, Target::OwnNotes), Access::Allowed);
    }
}
