//! Entity store traits.
//!
//! The service layer delegates all durable state to three capability-specific
//! stores rather than one monolithic backend, so a deployment can keep users
//! in one place and file contents in another.
//!
//! Stores are responsible for per-entity atomicity only: a single insert,
//! replace or delete is atomic, sequences of calls are not.
//!
//! # Errors
//!
//! Stores report conflicts with [`RusveError::AlreadyExists`](crate::RusveError)
//! and missing records for mutations with [`RusveError::NotFound`](crate::RusveError).
//! Lookups return `Ok(None)` for a missing record. Backend failures are
//! [`RusveError::Storage`](crate::RusveError).

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::Result;
use crate::stream::RecordStream;
use crate::types::{File, FileKey, Note, NoteId, PaymentId, Target, TargetId, User, UserId};

/// Storage for user accounts.
///
/// Deleted users stay in the store with `deleted` set and keep their subject.
/// Point lookups return them so callers can tell a deleted account from an
/// unknown one. Mutations and `get_users` treat them as absent.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Store name for logging.
    fn name(&self) -> &str;

    async fn get_user(&self, id: &UserId) -> Result<Option<User>>;

    /// Resolve a user by the subject claim of the identity provider.
    async fn find_by_subject(&self, sub: &str) -> Result<Option<User>>;

    /// Insert a new user. `AlreadyExists` if the id or the subject is taken.
    async fn insert_user(&self, user: User) -> Result<()>;

    /// Replace an existing user record. `NotFound` if the id is unknown or deleted.
    async fn replace_user(&self, user: User) -> Result<()>;

    /// Bump `updated` of a live user and return the stored record.
    async fn touch_user(&self, id: &UserId) -> Result<Option<User>>;

    /// Overwrite the payment id of a user. `NotFound` if the id is unknown or deleted.
    async fn set_payment_id(&self, id: &UserId, payment_id: PaymentId) -> Result<()>;

    /// Mark a live user deleted, returning the marked record.
    async fn delete_user(&self, id: &UserId) -> Result<Option<User>>;

    /// Live users for each id, in the given order. Other ids are skipped.
    fn get_users(&self, ids: Vec<UserId>) -> RecordStream<User>;
}

/// Storage for files, keyed by (target, file).
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Store name for logging.
    fn name(&self) -> &str;

    async fn get_file(&self, key: &FileKey) -> Result<Option<File>>;

    /// Insert a new file. `AlreadyExists` if the key is taken.
    async fn insert_file(&self, file: File) -> Result<()>;

    /// Remove a file, returning the removed record.
    async fn delete_file(&self, key: &FileKey) -> Result<Option<File>>;

    /// Files of a target whose type matches the target's tag.
    fn list_files(&self, target: &Target) -> RecordStream<File>;

    /// Number of files under a target, of any type.
    async fn count_files(&self, target_id: &TargetId) -> Result<usize>;

    /// Remove every file under a target. Returns how many were removed.
    async fn delete_target(&self, target_id: &TargetId) -> Result<usize>;
}

/// Storage for notes, keyed by (user, note).
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Store name for logging.
    fn name(&self) -> &str;

    /// Insert a new note. `AlreadyExists` if the user already has a note with that id.
    async fn insert_note(&self, note: Note) -> Result<()>;

    /// Remove a note of a user, returning the removed record.
    async fn delete_note(&self, user_id: &UserId, note_id: &NoteId) -> Result<Option<Note>>;

    /// Users owning a note with this id.
    async fn note_owners(&self, note_id: &NoteId) -> Result<Vec<UserId>>;

    /// All notes of a user.
    fn list_notes(&self, user_id: &UserId) -> RecordStream<Note>;

    async fn count_notes(&self, user_id: &UserId) -> Result<usize>;

    /// Remove every note of a user. Returns how many were removed.
    async fn delete_notes(&self, user_id: &UserId) -> Result<usize>;
}
