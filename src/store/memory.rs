//! In-process reference store.
//!
//! Keeps every entity in ordered maps behind `tokio::sync::RwLock`. Listing
//! streams are lazy: each step takes the read lock, finds the next record
//! after a cursor and releases the lock, so concurrent writers are never
//! blocked for the lifetime of a stream.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::stream;
use tokio::sync::RwLock;

use super::{FileStore, NoteStore, UserStore};
use crate::stream::RecordStream;
use crate::types::{
    File, FileId, FileKey, Note, NoteId, PaymentId, Target, TargetId, User, UserId,
};
use crate::{Result, RusveError};

type Shared<K, V> = Arc<RwLock<BTreeMap<K, V>>>;

#[derive(Debug, Default)]
struct UserTable {
    by_id: BTreeMap<UserId, User>,
    by_subject: HashMap<String, UserId>,
}

/// Memory-backed implementation of every store trait.
///
/// Cloning is cheap and clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    users: Arc<RwLock<UserTable>>,
    files: Shared<FileKey, File>,
    notes: Shared<(UserId, NoteId), Note>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of users, deleted ones included.
    pub async fn user_count(&self) -> usize {
        self.users.read().await.by_id.len()
    }

    /// Number of users not marked deleted.
    pub async fn live_user_count(&self) -> usize {
        self.users
            .read()
            .await
            .by_id
            .values()
            .filter(|user| !user.is_deleted())
            .count()
    }

    /// Total number of files across all targets.
    pub async fn file_count(&self) -> usize {
        self.files.read().await.len()
    }

    /// Total number of notes across all users.
    pub async fn note_count(&self) -> usize {
        self.notes.read().await.len()
    }
}

/// Lazily walk `map` from `start` while `in_range` holds, yielding values accepted by `keep`.
fn scan<K, V, P, F>(map: Shared<K, V>, start: K, in_range: P, keep: F) -> RecordStream<V>
where
    K: Ord + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    P: Fn(&K) -> bool + Clone + Send + Sync + 'static,
    F: Fn(&V) -> bool + Clone + Send + Sync + 'static,
{
    Box::pin(stream::unfold(
        Some(Bound::Included(start)),
        move |cursor: Option<Bound<K>>| {
            let map = Arc::clone(&map);
            let in_range = in_range.clone();
            let keep = keep.clone();
            async move {
                let lower = cursor?;
                let guard = map.read().await;
                let next = guard
                    .range((lower, Bound::Unbounded))
                    .take_while(|(key, _)| in_range(*key))
                    .find(|(_, value)| keep(*value))
                    .map(|(key, value)| (key.clone(), value.clone()));
                drop(guard);
                let (key, value) = next?;
                Some((Ok::<V, RusveError>(value), Some(Bound::Excluded(key))))
            }
        },
    ))
}

fn live(user: &User) -> Option<&User> {
    (!user.is_deleted()).then_some(user)
}

fn live_mut(user: &mut User) -> Option<&mut User> {
    (!user.is_deleted()).then_some(user)
}

#[async_trait]
impl UserStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<User>> {
        Ok(self.users.read().await.by_id.get(id).cloned())
    }

    async fn find_by_subject(&self, sub: &str) -> Result<Option<User>> {
        let table = self.users.read().await;
        Ok(table
            .by_subject
            .get(sub)
            .and_then(|id| table.by_id.get(id))
            .cloned())
    }

    async fn insert_user(&self, user: User) -> Result<()> {
        let mut table = self.users.write().await;
        if table.by_id.contains_key(&user.id) {
            return Err(RusveError::AlreadyExists(format!("user {}", user.id)));
        }
        if !user.sub.is_empty() && table.by_subject.contains_key(&user.sub) {
            return Err(RusveError::AlreadyExists(format!(
                "user with subject {}",
                user.sub
            )));
        }
        if !user.sub.is_empty() {
            table.by_subject.insert(user.sub.clone(), user.id.clone());
        }
        table.by_id.insert(user.id.clone(), user);
        Ok(())
    }

    async fn replace_user(&self, user: User) -> Result<()> {
        let mut table = self.users.write().await;
        let Some(previous_sub) = table.by_id.get(&user.id).and_then(live).map(|u| u.sub.clone())
        else {
            return Err(RusveError::NotFound(format!("user {}", user.id)));
        };
        if previous_sub != user.sub {
            if !user.sub.is_empty() && table.by_subject.contains_key(&user.sub) {
                return Err(RusveError::AlreadyExists(format!(
                    "user with subject {}",
                    user.sub
                )));
            }
            table.by_subject.remove(&previous_sub);
            if !user.sub.is_empty() {
                table.by_subject.insert(user.sub.clone(), user.id.clone());
            }
        }
        table.by_id.insert(user.id.clone(), user);
        Ok(())
    }

    async fn touch_user(&self, id: &UserId) -> Result<Option<User>> {
        let mut table = self.users.write().await;
        Ok(table.by_id.get_mut(id).and_then(live_mut).map(|user| {
            user.updated = chrono::Utc::now();
            user.clone()
        }))
    }

    async fn set_payment_id(&self, id: &UserId, payment_id: PaymentId) -> Result<()> {
        let mut table = self.users.write().await;
        let user = table
            .by_id
            .get_mut(id)
            .and_then(live_mut)
            .ok_or_else(|| RusveError::NotFound(format!("user {id}")))?;
        user.payment_id = payment_id;
        user.updated = chrono::Utc::now();
        Ok(())
    }

    async fn delete_user(&self, id: &UserId) -> Result<Option<User>> {
        let mut table = self.users.write().await;
        Ok(table.by_id.get_mut(id).and_then(live_mut).map(|user| {
            let now = chrono::Utc::now();
            user.deleted = Some(now);
            user.updated = now;
            user.clone()
        }))
    }

    fn get_users(&self, ids: Vec<UserId>) -> RecordStream<User> {
        let users = Arc::clone(&self.users);
        Box::pin(stream::unfold(ids.into_iter(), move |mut ids| {
            let users = Arc::clone(&users);
            async move {
                let table = users.read().await;
                let found = ids
                    .by_ref()
                    .find_map(|id| table.by_id.get(&id).and_then(live).cloned());
                drop(table);
                found.map(|user| (Ok::<User, RusveError>(user), ids))
            }
        }))
    }
}

#[async_trait]
impl FileStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get_file(&self, key: &FileKey) -> Result<Option<File>> {
        Ok(self.files.read().await.get(key).cloned())
    }

    async fn insert_file(&self, file: File) -> Result<()> {
        let mut files = self.files.write().await;
        let key = file.key();
        if files.contains_key(&key) {
            return Err(RusveError::AlreadyExists(format!(
                "file {} in target {}",
                key.file_id, key.target_id
            )));
        }
        files.insert(key, file);
        Ok(())
    }

    async fn delete_file(&self, key: &FileKey) -> Result<Option<File>> {
        Ok(self.files.write().await.remove(key))
    }

    fn list_files(&self, target: &Target) -> RecordStream<File> {
        let target_id = target.id.clone();
        let file_type = target.file_type;
        scan(
            Arc::clone(&self.files),
            FileKey::new(target_id.clone(), FileId::default()),
            move |key: &FileKey| key.target_id == target_id,
            move |file: &File| file.file_type == file_type,
        )
    }

    async fn count_files(&self, target_id: &TargetId) -> Result<usize> {
        let files = self.files.read().await;
        Ok(files.keys().filter(|k| &k.target_id == target_id).count())
    }

    async fn delete_target(&self, target_id: &TargetId) -> Result<usize> {
        let mut files = self.files.write().await;
        let before = files.len();
        files.retain(|key, _| &key.target_id != target_id);
        Ok(before - files.len())
    }
}

#[async_trait]
impl NoteStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn insert_note(&self, note: Note) -> Result<()> {
        let mut notes = self.notes.write().await;
        let key = (note.user_id.clone(), note.id.clone());
        if notes.contains_key(&key) {
            return Err(RusveError::AlreadyExists(format!(
                "note {} of user {}",
                note.id, note.user_id
            )));
        }
        notes.insert(key, note);
        Ok(())
    }

    async fn delete_note(&self, user_id: &UserId, note_id: &NoteId) -> Result<Option<Note>> {
        let key = (user_id.clone(), note_id.clone());
        Ok(self.notes.write().await.remove(&key))
    }

    async fn note_owners(&self, note_id: &NoteId) -> Result<Vec<UserId>> {
        let notes = self.notes.read().await;
        Ok(notes
            .keys()
            .filter(|(_, id)| id == note_id)
            .map(|(user, _)| user.clone())
            .collect())
    }

    fn list_notes(&self, user_id: &UserId) -> RecordStream<Note> {
        let owner = user_id.clone();
        scan(
            Arc::clone(&self.notes),
            (owner.clone(), NoteId::default()),
            move |(user, _): &(UserId, NoteId)| user == &owner,
            |_: &Note| true,
        )
    }

    async fn count_notes(&self, user_id: &UserId) -> Result<usize> {
        let notes = self.notes.read().await;
        Ok(notes.keys().filter(|(user, _)| user == user_id).count())
    }

    async fn delete_notes(&self, user_id: &UserId) -> Result<usize> {
        let mut notes = self.notes.write().await;
        let before = notes.len();
        notes.retain(|(user, _), _| user != user_id);
        Ok(before - notes.len())
    }
}
