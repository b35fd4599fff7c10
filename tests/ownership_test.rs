//! Tests for owner deletion under both ownership policies.

use rusve::{
    AuthRequest, File, FileType, MemoryStore, Note, OwnershipPolicy, Rusve, RusveError, Services,
    Target, TargetId, User, UserId,
};

async fn user_with_children(policy: OwnershipPolicy) -> (Services, MemoryStore, User) {
    let store = MemoryStore::new();
    let s = Rusve::builder()
        .memory(store.clone())
        .ownership(policy)
        .build()
        .unwrap();
    let user = s.users.auth(&AuthRequest::new("a", "a@x")).await.unwrap();

    let own = Target::new(TargetId::from(&user.id), FileType::Avatar);
    s.user_files
        .create_file(File::new(&own, "me.png", vec![1]))
        .await
        .unwrap();
    s.notes
        .create_note(Note::new(user.id.clone(), "x", "y"))
        .await
        .unwrap();
    (s, store, user)
}

#[tokio::test]
async fn refuse_keeps_everything() {
    let (s, store, user) = user_with_children(OwnershipPolicy::Refuse).await;

    let err = s.users.delete_user(&user.id).await.unwrap_err();
    assert!(matches!(err, RusveError::FailedPrecondition(_)));

    assert_eq!(store.live_user_count().await, 1);
    assert_eq!(store.file_count().await, 1);
    assert_eq!(store.note_count().await, 1);
}

#[tokio::test]
async fn refuse_allows_childless_users() {
    let s = Rusve::builder().build().unwrap();
    let user = s.users.auth(&AuthRequest::new("a", "a@x")).await.unwrap();

    let removed = s.users.delete_user(&user.id).await.unwrap();
    assert_eq!(removed.id, user.id);
    assert!(removed.deleted.is_some());
    assert!(s.users.get_user(&user.id).await.is_err());
}

#[tokio::test]
async fn cascade_removes_files_and_notes() {
    let (s, store, user) = user_with_children(OwnershipPolicy::Cascade).await;

    s.users.delete_user(&user.id).await.unwrap();

    // The account is marked, its children are gone.
    assert_eq!(store.user_count().await, 1);
    assert_eq!(store.live_user_count().await, 0);
    assert_eq!(store.file_count().await, 0);
    assert_eq!(store.note_count().await, 0);
}

#[tokio::test]
async fn cascade_leaves_other_owners_alone() {
    let (s, store, user) = user_with_children(OwnershipPolicy::Cascade).await;
    s.notes
        .create_note(Note::new("someone-else", "x", "y"))
        .await
        .unwrap();
    s.utils_files
        .create_file(File::new(&Target::new("shared", FileType::Document), "a", vec![]))
        .await
        .unwrap();

    s.users.delete_user(&user.id).await.unwrap();
    assert_eq!(store.file_count().await, 1);
    assert_eq!(store.note_count().await, 1);
}

#[tokio::test]
async fn deleting_an_unknown_user_is_not_found() {
    let s = Rusve::builder().build().unwrap();
    let err = s.users.delete_user(&UserId::new("ghost")).await.unwrap_err();
    assert!(matches!(err, RusveError::NotFound(_)));
}

#[tokio::test]
async fn delete_target_follows_policy() {
    let refuse = Rusve::builder().build().unwrap();
    let target = Target::new("t1", FileType::Document);
    refuse
        .utils_files
        .create_file(File::new(&target, "a", vec![]))
        .await
        .unwrap();
    assert!(matches!(
        refuse.utils_files.delete_target(&target.id).await,
        Err(RusveError::FailedPrecondition(_))
    ));

    let cascade = Rusve::builder()
        .ownership(OwnershipPolicy::Cascade)
        .build()
        .unwrap();
    cascade
        .utils_files
        .create_file(File::new(&target, "a", vec![]))
        .await
        .unwrap();
    assert_eq!(cascade.utils_files.delete_target(&target.id).await.unwrap(), 1);
    assert_eq!(cascade.utils_files.delete_target(&target.id).await.unwrap(), 0);
}

#[tokio::test]
async fn zero_stream_buffer_is_a_configuration_error() {
    let result = Rusve::builder().stream_buffer(0).build();
    assert!(matches!(result, Err(RusveError::Configuration(_))));
}
