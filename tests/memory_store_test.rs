//! Tests for the memory store.

use futures_util::{StreamExt, TryStreamExt};
use rusve::{
    File, FileKey, FileStore, FileType, MemoryStore, Note, NoteId, NoteStore, PaymentId,
    RusveError, Target, TargetId, User, UserId, UserStore,
};

fn file(target: &str, id: &str, file_type: FileType) -> File {
    let mut file = File::new(&Target::new(target, file_type), format!("{id}.bin"), vec![1, 2, 3]);
    file.id = id.into();
    file
}

fn note(user: &str, id: &str) -> Note {
    let mut note = Note::new(user, format!("title {id}"), "body");
    note.id = NoteId::new(id);
    note
}

// ============================================================================
// Users
// ============================================================================

#[tokio::test]
async fn users_resolve_by_id_and_subject() {
    let store = MemoryStore::new();
    let user = User::provision("sub-1", "a@example.com");
    store.insert_user(user.clone()).await.unwrap();

    assert_eq!(store.get_user(&user.id).await.unwrap(), Some(user.clone()));
    assert_eq!(store.find_by_subject("sub-1").await.unwrap(), Some(user));
    assert_eq!(store.find_by_subject("sub-2").await.unwrap(), None);
}

#[tokio::test]
async fn duplicate_subject_is_rejected() {
    let store = MemoryStore::new();
    store
        .insert_user(User::provision("sub-1", "a@example.com"))
        .await
        .unwrap();
    let err = store
        .insert_user(User::provision("sub-1", "b@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, RusveError::AlreadyExists(_)));
    assert_eq!(store.user_count().await, 1);
}

#[tokio::test]
async fn replace_unknown_user_is_not_found() {
    let store = MemoryStore::new();
    let err = store
        .replace_user(User::provision("sub-1", "a@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, RusveError::NotFound(_)));
}

#[tokio::test]
async fn payment_id_overwrites() {
    let store = MemoryStore::new();
    let user = User::provision("sub-1", "a@example.com");
    store.insert_user(user.clone()).await.unwrap();

    store
        .set_payment_id(&user.id, PaymentId::new("cus_1"))
        .await
        .unwrap();
    store
        .set_payment_id(&user.id, PaymentId::new("cus_2"))
        .await
        .unwrap();

    let stored = store.get_user(&user.id).await.unwrap().unwrap();
    assert_eq!(stored.payment_id.as_str(), "cus_2");
}

#[tokio::test]
async fn get_users_keeps_request_order_and_skips_unknown() {
    let store = MemoryStore::new();
    let a = User::provision("sub-a", "a@example.com");
    let b = User::provision("sub-b", "b@example.com");
    store.insert_user(a.clone()).await.unwrap();
    store.insert_user(b.clone()).await.unwrap();

    let users: Vec<User> = store
        .get_users(vec![b.id.clone(), UserId::new("ghost"), a.id.clone()])
        .try_collect()
        .await
        .unwrap();
    let ids: Vec<_> = users.iter().map(|u| u.id.clone()).collect();
    assert_eq!(ids, vec![b.id, a.id]);
}

#[tokio::test]
async fn deleted_user_keeps_its_subject() {
    let store = MemoryStore::new();
    let user = User::provision("sub-1", "a@example.com");
    store.insert_user(user.clone()).await.unwrap();

    let marked = store.delete_user(&user.id).await.unwrap().unwrap();
    assert!(marked.is_deleted());
    assert!(store.delete_user(&user.id).await.unwrap().is_none());

    let found = store.find_by_subject("sub-1").await.unwrap().unwrap();
    assert_eq!(found.deleted, marked.deleted);
    let err = store
        .insert_user(User::provision("sub-1", "a@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, RusveError::AlreadyExists(_)));
    assert_eq!(store.user_count().await, 1);
    assert_eq!(store.live_user_count().await, 0);
}

#[tokio::test]
async fn deleted_user_refuses_mutation() {
    let store = MemoryStore::new();
    let user = User::provision("sub-1", "a@example.com");
    store.insert_user(user.clone()).await.unwrap();
    store.delete_user(&user.id).await.unwrap();

    assert!(store.touch_user(&user.id).await.unwrap().is_none());
    assert!(matches!(
        store.set_payment_id(&user.id, PaymentId::new("cus_1")).await,
        Err(RusveError::NotFound(_))
    ));
    assert!(matches!(
        store.replace_user(user.clone()).await,
        Err(RusveError::NotFound(_))
    ));

    let listed: Vec<User> = store.get_users(vec![user.id]).try_collect().await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn touch_bumps_only_the_update_time() {
    let store = MemoryStore::new();
    let user = User::provision("sub-1", "a@example.com");
    store.insert_user(user.clone()).await.unwrap();
    store
        .set_payment_id(&user.id, PaymentId::new("cus_1"))
        .await
        .unwrap();

    let touched = store.touch_user(&user.id).await.unwrap().unwrap();
    assert!(touched.updated >= user.updated);
    assert_eq!(touched.payment_id.as_str(), "cus_1");
    assert!(store.touch_user(&UserId::new("ghost")).await.unwrap().is_none());
}

// ============================================================================
// Files
// ============================================================================

#[tokio::test]
async fn file_ids_are_scoped_to_their_target() {
    let store = MemoryStore::new();
    store.insert_file(file("t1", "f1", FileType::Document)).await.unwrap();
    store.insert_file(file("t2", "f1", FileType::Document)).await.unwrap();

    let err = store
        .insert_file(file("t1", "f1", FileType::Document))
        .await
        .unwrap_err();
    assert!(matches!(err, RusveError::AlreadyExists(_)));
    assert_eq!(store.file_count().await, 2);
}

#[tokio::test]
async fn list_files_filters_by_target_and_type() {
    let store = MemoryStore::new();
    store.insert_file(file("t1", "a", FileType::Document)).await.unwrap();
    store.insert_file(file("t1", "b", FileType::Avatar)).await.unwrap();
    store.insert_file(file("t1", "c", FileType::Document)).await.unwrap();
    store.insert_file(file("t10", "d", FileType::Document)).await.unwrap();
    store.insert_file(file("t0", "e", FileType::Document)).await.unwrap();

    let docs: Vec<File> = store
        .list_files(&Target::new("t1", FileType::Document))
        .try_collect()
        .await
        .unwrap();
    let ids: Vec<_> = docs.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);

    let avatars = store
        .list_files(&Target::new("t1", FileType::Avatar))
        .count()
        .await;
    assert_eq!(avatars, 1);
}

#[tokio::test]
async fn list_files_sees_records_added_while_streaming() {
    let store = MemoryStore::new();
    store.insert_file(file("t1", "a", FileType::Document)).await.unwrap();

    let mut files = store.list_files(&Target::new("t1", FileType::Document));
    assert_eq!(files.next().await.unwrap().unwrap().id.as_str(), "a");

    store.insert_file(file("t1", "b", FileType::Document)).await.unwrap();
    assert_eq!(files.next().await.unwrap().unwrap().id.as_str(), "b");
    assert!(files.next().await.is_none());
}

#[tokio::test]
async fn delete_target_removes_every_type() {
    let store = MemoryStore::new();
    store.insert_file(file("t1", "a", FileType::Document)).await.unwrap();
    store.insert_file(file("t1", "b", FileType::Avatar)).await.unwrap();
    store.insert_file(file("t2", "c", FileType::Document)).await.unwrap();

    let target = TargetId::new("t1");
    assert_eq!(store.count_files(&target).await.unwrap(), 2);
    assert_eq!(store.delete_target(&target).await.unwrap(), 2);
    assert_eq!(store.count_files(&target).await.unwrap(), 0);
    assert!(
        store
            .get_file(&FileKey::new("t2", "c"))
            .await
            .unwrap()
            .is_some()
    );
}

// ============================================================================
// Notes
// ============================================================================

#[tokio::test]
async fn notes_are_keyed_per_user() {
    let store = MemoryStore::new();
    store.insert_note(note("u1", "n1")).await.unwrap();
    store.insert_note(note("u2", "n1")).await.unwrap();

    let mut owners = store.note_owners(&NoteId::new("n1")).await.unwrap();
    owners.sort();
    assert_eq!(owners, vec![UserId::new("u1"), UserId::new("u2")]);

    let err = store.insert_note(note("u1", "n1")).await.unwrap_err();
    assert!(matches!(err, RusveError::AlreadyExists(_)));
}

#[tokio::test]
async fn list_notes_only_returns_the_owner() {
    let store = MemoryStore::new();
    store.insert_note(note("u1", "a")).await.unwrap();
    store.insert_note(note("u1", "b")).await.unwrap();
    store.insert_note(note("u11", "c")).await.unwrap();

    let notes: Vec<Note> = store
        .list_notes(&UserId::new("u1"))
        .try_collect()
        .await
        .unwrap();
    assert_eq!(notes.len(), 2);
    assert!(notes.iter().all(|n| n.user_id.as_str() == "u1"));
    assert_eq!(store.count_notes(&UserId::new("u1")).await.unwrap(), 2);
}

#[tokio::test]
async fn delete_note_requires_matching_owner() {
    let store = MemoryStore::new();
    store.insert_note(note("u1", "n1")).await.unwrap();

    let wrong = store
        .delete_note(&UserId::new("u2"), &NoteId::new("n1"))
        .await
        .unwrap();
    assert!(wrong.is_none());

    let removed = store
        .delete_note(&UserId::new("u1"), &NoteId::new("n1"))
        .await
        .unwrap();
    assert!(removed.is_some());
    assert_eq!(store.note_count().await, 0);
}
