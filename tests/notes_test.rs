//! Tests for the note book.

use futures_util::TryStreamExt;
use rusve::{Note, NoteBook, NoteId, Rusve, RusveError, UserId};

fn notes() -> NoteBook {
    Rusve::builder().build().unwrap().notes
}

async fn list(book: &NoteBook, user: &str) -> Vec<Note> {
    book.get_notes(&UserId::new(user))
        .await
        .unwrap()
        .try_collect()
        .await
        .unwrap()
}

#[tokio::test]
async fn create_list_delete_scenario() {
    let book = notes();
    assert!(list(&book, "u1").await.is_empty());

    let created = book.create_note(Note::new("u1", "x", "")).await.unwrap();

    let listed = list(&book, "u1").await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "x");
    assert_eq!(listed[0].id, created.id);

    book.delete_note(&created.id, &UserId::new("u1")).await.unwrap();
    assert!(list(&book, "u1").await.is_empty());
}

#[tokio::test]
async fn create_requires_a_user() {
    let book = notes();
    let err = book.create_note(Note::new("", "x", "y")).await.unwrap_err();
    assert!(matches!(err, RusveError::InvalidArgument(_)));
}

#[tokio::test]
async fn explicit_ids_must_be_unique_per_user() {
    let book = notes();
    let mut note = Note::new("u1", "x", "y");
    note.id = NoteId::new("n1");
    book.create_note(note.clone()).await.unwrap();

    let err = book.create_note(note.clone()).await.unwrap_err();
    assert!(matches!(err, RusveError::AlreadyExists(_)));

    note.user_id = UserId::new("u2");
    book.create_note(note).await.unwrap();
}

#[tokio::test]
async fn delete_with_wrong_owner_is_not_found() {
    let book = notes();
    let created = book.create_note(Note::new("u1", "x", "y")).await.unwrap();

    let err = book
        .delete_note(&created.id, &UserId::new("u2"))
        .await
        .unwrap_err();
    assert!(matches!(err, RusveError::NotFound(_)));
    assert_eq!(list(&book, "u1").await.len(), 1);
}

#[tokio::test]
async fn delete_without_owner_uses_the_note_id() {
    let book = notes();
    let created = book.create_note(Note::new("u1", "x", "y")).await.unwrap();

    book.delete_note(&created.id, &UserId::default()).await.unwrap();
    assert!(list(&book, "u1").await.is_empty());

    let err = book
        .delete_note(&created.id, &UserId::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RusveError::NotFound(_)));
}

#[tokio::test]
async fn delete_without_owner_refuses_ambiguous_ids() {
    let book = notes();
    for user in ["u1", "u2"] {
        let mut note = Note::new(user, "x", "y");
        note.id = NoteId::new("shared");
        book.create_note(note).await.unwrap();
    }

    let err = book
        .delete_note(&NoteId::new("shared"), &UserId::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RusveError::InvalidArgument(_)));
    assert_eq!(list(&book, "u1").await.len(), 1);
    assert_eq!(list(&book, "u2").await.len(), 1);
}

#[tokio::test]
async fn notes_of_unknown_users_are_empty() {
    let book = notes();
    book.create_note(Note::new("u1", "x", "y")).await.unwrap();
    assert!(list(&book, "nobody").await.is_empty());
    assert!(list(&book, "").await.is_empty());
}
