//! Tests for the note service.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockNoteRepository;
use crate::domain::{ErrorCode, WARNING, slugify};

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

fn form(title: &str, slug: Option<&str>) -> NoteForm {
    NoteForm {
        title: title.to_owned(),
        text: "Текст".to_owned(),
        slug: slug.map(str::to_owned),
    }
}

fn stored_note(author: UserId, slug: &str) -> Note {
    let content = form("Stored", Some(slug)).clean().expect("valid form");
    Note::new(NoteId::random(), author, content, Utc::now())
}

fn service(repo: MockNoteRepository) -> NoteService<MockNoteRepository> {
    NoteService::new(Arc::new(repo), Arc::new(DefaultClock))
}

fn expect_invalid(err: FormError) -> FieldErrors {
    match err {
        FormError::Invalid(errors) => errors,
        FormError::Failed(other) => panic!("expected field errors, got {other:?}"),
    }
}

#[fixture]
fn author() -> UserId {
    UserId::random()
}

#[rstest]
#[tokio::test]
async fn create_persists_note_with_clock_timestamp(author: UserId) {
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().expect("timestamp");
    let mut repo = MockNoteRepository::new();
    repo.expect_slug_exists()
        .withf(|slug, excluding| slug.as_str() == "note_1" && excluding.is_none())
        .times(1)
        .return_once(|_, _| Ok(false));
    repo.expect_insert().times(1).return_once(|_| Ok(()));

    let service = NoteService::new(Arc::new(repo), Arc::new(FixedClock(now)));
    let note = service
        .create(&author, &form("Заголовок", Some("note_1")))
        .await
        .expect("note created");

    assert_eq!(note.author(), &author);
    assert_eq!(note.slug().as_str(), "note_1");
    assert_eq!(note.created_at(), now);
}

#[rstest]
#[tokio::test]
async fn create_derives_missing_slug_from_title(author: UserId) {
    let mut repo = MockNoteRepository::new();
    repo.expect_slug_exists().return_once(|_, _| Ok(false));
    repo.expect_insert().return_once(|_| Ok(()));

    let note = service(repo)
        .create(&author, &form("Заголовок", None))
        .await
        .expect("note created");

    assert_eq!(note.slug().as_str(), slugify("Заголовок"));
}

#[rstest]
#[tokio::test]
async fn create_rejects_taken_slug_without_inserting(author: UserId) {
    let mut repo = MockNoteRepository::new();
    repo.expect_slug_exists().return_once(|_, _| Ok(true));
    repo.expect_insert().never();

    let err = service(repo)
        .create(&author, &form("Заголовок", Some("note_1")))
        .await
        .expect_err("duplicate slug");

    let errors = expect_invalid(err);
    assert_eq!(errors.get("slug"), Some(&[format!("note_1{WARNING}")][..]));
}

#[rstest]
#[tokio::test]
async fn storage_collision_maps_to_same_field_error(author: UserId) {
    let mut repo = MockNoteRepository::new();
    repo.expect_slug_exists().return_once(|_, _| Ok(false));
    repo.expect_insert()
        .return_once(|note| Err(NoteRepositoryError::duplicate_slug(note.slug().as_str())));

    let err = service(repo)
        .create(&author, &form("Заголовок", Some("note_1")))
        .await
        .expect_err("duplicate slug");

    let errors = expect_invalid(err);
    assert_eq!(errors.get("slug"), Some(&[format!("note_1{WARNING}")][..]));
}

#[rstest]
#[tokio::test]
async fn invalid_form_never_reaches_storage(author: UserId) {
    let mut repo = MockNoteRepository::new();
    repo.expect_slug_exists().never();
    repo.expect_insert().never();

    let err = service(repo)
        .create(&author, &NoteForm::default())
        .await
        .expect_err("invalid form");

    let errors = expect_invalid(err);
    assert!(errors.get("title").is_some());
    assert!(errors.get("text").is_some());
}

#[rstest]
#[case(NoteRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(NoteRepositoryError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn repository_failures_map_to_domain_errors(
    author: UserId,
    #[case] failure: NoteRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockNoteRepository::new();
    repo.expect_list_by_author().return_once(move |_| Err(failure));

    let err = service(repo).list(&author).await.expect_err("failure");
    assert_eq!(err.code(), expected);
}

#[rstest]
#[tokio::test]
async fn update_excludes_own_note_from_uniqueness_check(author: UserId) {
    let existing = stored_note(author, "note_1");
    let existing_id = *existing.id();

    let mut repo = MockNoteRepository::new();
    repo.expect_find_by_slug()
        .return_once(move |_| Ok(Some(existing)));
    repo.expect_slug_exists()
        .withf(move |slug, excluding| {
            slug.as_str() == "note_1" && *excluding == Some(existing_id)
        })
        .return_once(|_, _| Ok(false));
    repo.expect_update().times(1).return_once(|_| Ok(true));

    let note = service(repo)
        .update(&author, "note_1", &form("Новый заголовок", Some("note_1")))
        .await
        .expect("note updated");

    assert_eq!(note.id(), &existing_id);
    assert_eq!(note.title(), "Новый заголовок");
}

#[rstest]
#[tokio::test]
async fn update_by_stranger_is_not_found_and_skips_validation(author: UserId) {
    let existing = stored_note(author, "note_1");
    let mut repo = MockNoteRepository::new();
    repo.expect_find_by_slug()
        .return_once(move |_| Ok(Some(existing)));
    repo.expect_slug_exists().never();
    repo.expect_update().never();

    let err = service(repo)
        .update(&UserId::random(), "note_1", &NoteForm::default())
        .await
        .expect_err("stranger denied");

    match err {
        FormError::Failed(err) => assert_eq!(err.code(), ErrorCode::NotFound),
        FormError::Invalid(errors) => panic!("expected not found, got {errors:?}"),
    }
}

#[rstest]
#[tokio::test]
async fn delete_by_owner_removes_note(author: UserId) {
    let existing = stored_note(author, "note_1");
    let existing_id = *existing.id();
    let mut repo = MockNoteRepository::new();
    repo.expect_find_by_slug()
        .return_once(move |_| Ok(Some(existing)));
    repo.expect_delete()
        .withf(move |id| *id == existing_id)
        .times(1)
        .return_once(|_| Ok(true));

    service(repo)
        .delete(&author, "note_1")
        .await
        .expect("note deleted");
}

#[rstest]
#[tokio::test]
async fn delete_by_stranger_leaves_note(author: UserId) {
    let existing = stored_note(author, "note_1");
    let mut repo = MockNoteRepository::new();
    repo.expect_find_by_slug()
        .return_once(move |_| Ok(Some(existing)));
    repo.expect_delete().never();

    let err = service(repo)
        .delete(&UserId::random(), "note_1")
        .await
        .expect_err("stranger denied");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn malformed_slug_is_not_found_without_lookup(author: UserId) {
    let mut repo = MockNoteRepository::new();
    repo.expect_find_by_slug().never();

    let err = service(repo)
        .get(&author, "Not A Slug")
        .await
        .expect_err("malformed slug");
    assert_eq!(err.code(), ErrorCode::NotFound);
}
