//! Per-user notes.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{info, instrument, warn};

use super::{OwnershipPolicy, record_call};
use crate::store::NoteStore;
use crate::stream::{self, RecordStream};
use crate::types::{Note, NoteId, UserId};
use crate::{Result, RusveError};

const SERVICE: &str = "NotesService";

/// Note operations over a [`NoteStore`].
#[derive(Clone)]
pub struct NoteBook {
    store: Arc<dyn NoteStore>,
    ownership: OwnershipPolicy,
    stream_buffer: usize,
}

impl NoteBook {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self {
            store,
            ownership: OwnershipPolicy::default(),
            stream_buffer: stream::DEFAULT_STREAM_BUFFER,
        }
    }

    pub fn with_ownership(mut self, ownership: OwnershipPolicy) -> Self {
        self.ownership = ownership;
        self
    }

    pub fn with_stream_buffer(mut self, size: usize) -> Self {
        self.stream_buffer = size;
        self
    }

    /// Stream every note of a user. Unknown users have no notes.
    #[instrument(skip(self), fields(user = %user_id))]
    pub async fn get_notes(&self, user_id: &UserId) -> Result<RecordStream<Note>> {
        let start = Instant::now();
        let inner = if user_id.is_empty() {
            stream::from_vec(Vec::new())
        } else {
            self.store.list_notes(user_id)
        };
        record_call::<()>(SERVICE, "GetNotes", start, &Ok(()));
        Ok(stream::bounded_stream(
            stream::counted(inner, SERVICE, "GetNotes"),
            self.stream_buffer,
        ))
    }

    /// Store a new note and return it with its assigned id.
    ///
    /// The owning user is not required to exist.
    #[instrument(skip(self, note), fields(user = %note.user_id))]
    pub async fn create_note(&self, note: Note) -> Result<Note> {
        let start = Instant::now();
        let outcome = self.insert(note).await;
        record_call(SERVICE, "CreateNote", start, &outcome);
        outcome
    }

    async fn insert(&self, mut note: Note) -> Result<Note> {
        if note.user_id.is_empty() {
            return Err(RusveError::InvalidArgument("note user id is required".into()));
        }
        if note.id.is_empty() {
            note.id = NoteId::generate();
        }
        let now = Utc::now();
        note.created = now;
        note.updated = now;
        self.store.insert_note(note.clone()).await?;
        info!(note = %note.id, "note created");
        Ok(note)
    }

    /// Remove a note and return the removed record.
    ///
    /// With a non-empty `user_id` the note must belong to that user. With an
    /// empty one the note id alone must identify a single note.
    #[instrument(skip(self))]
    pub async fn delete_note(&self, note_id: &NoteId, user_id: &UserId) -> Result<Note> {
        let start = Instant::now();
        let outcome = self.remove(note_id, user_id).await;
        record_call(SERVICE, "DeleteNote", start, &outcome);
        outcome
    }

    async fn remove(&self, note_id: &NoteId, user_id: &UserId) -> Result<Note> {
        let owner = if user_id.is_empty() {
            let mut owners = self.store.note_owners(note_id).await?;
            match owners.len() {
                0 => return Err(RusveError::NotFound(format!("note {note_id}"))),
                1 => owners.remove(0),
                n => {
                    return Err(RusveError::InvalidArgument(format!(
                        "note id {note_id} is used by {n} users, a user id is required"
                    )));
                }
            }
        } else {
            user_id.clone()
        };
        self.store
            .delete_note(&owner, note_id)
            .await?
            .ok_or_else(|| RusveError::NotFound(format!("note {note_id} of user {owner}")))
    }

    /// Remove every note of a user, applying the ownership policy.
    pub(crate) async fn delete_user_notes(&self, user_id: &UserId) -> Result<usize> {
        let remaining = self.store.count_notes(user_id).await?;
        if remaining == 0 {
            return Ok(0);
        }
        match self.ownership {
            OwnershipPolicy::Refuse => {
                warn!(user = %user_id, remaining, "user still owns notes");
                Err(RusveError::FailedPrecondition(format!(
                    "user {user_id} still owns {remaining} note(s)"
                )))
            }
            OwnershipPolicy::Cascade => self.store.delete_notes(user_id).await,
        }
    }
}
