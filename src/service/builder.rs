//! Builder for wiring stores and policies into service facades

use std::sync::Arc;

use super::{AuthPolicy, FileRepository, FileSurface, NoteBook, OwnershipPolicy, UserDirectory};
use crate::store::{FileStore, MemoryStore, NoteStore, UserStore};
use crate::stream::DEFAULT_STREAM_BUFFER;
use crate::{Result, RusveError};

/// Main entry point for assembling the services.
pub struct Rusve;

impl Rusve {
    /// Create a new builder for configuring the services.
    pub fn builder() -> RusveBuilder {
        RusveBuilder::new()
    }
}

/// The facades of one deployment. All of them share the same stores.
#[derive(Clone)]
pub struct Services {
    pub users: UserDirectory,
    /// File repository labelled for `UsersService`.
    pub user_files: FileRepository,
    /// File repository labelled for `UtilsService`.
    pub utils_files: FileRepository,
    pub notes: NoteBook,
}

/// Builder for configuring the services.
pub struct RusveBuilder {
    user_store: Option<Arc<dyn UserStore>>,
    file_store: Option<Arc<dyn FileStore>>,
    note_store: Option<Arc<dyn NoteStore>>,
    auth: AuthPolicy,
    ownership: OwnershipPolicy,
    stream_buffer: usize,
}

impl RusveBuilder {
    pub fn new() -> Self {
        Self {
            user_store: None,
            file_store: None,
            note_store: None,
            auth: AuthPolicy::default(),
            ownership: OwnershipPolicy::default(),
            stream_buffer: DEFAULT_STREAM_BUFFER,
        }
    }

    /// Use one memory store for users, files and notes.
    pub fn memory(self, store: MemoryStore) -> Self {
        self.user_store(Arc::new(store.clone()))
            .file_store(Arc::new(store.clone()))
            .note_store(Arc::new(store))
    }

    pub fn user_store(mut self, store: Arc<dyn UserStore>) -> Self {
        self.user_store = Some(store);
        self
    }

    pub fn file_store(mut self, store: Arc<dyn FileStore>) -> Self {
        self.file_store = Some(store);
        self
    }

    pub fn note_store(mut self, store: Arc<dyn NoteStore>) -> Self {
        self.note_store = Some(store);
        self
    }

    /// Whether `Auth` provisions accounts for unknown subjects (default: yes).
    pub fn provision_on_auth(mut self, provision: bool) -> Self {
        self.auth = AuthPolicy { provision };
        self
    }

    /// What deleting a user or target does to its children (default: refuse).
    pub fn ownership(mut self, policy: OwnershipPolicy) -> Self {
        self.ownership = policy;
        self
    }

    /// Records buffered per streaming call (default: [`DEFAULT_STREAM_BUFFER`]).
    pub fn stream_buffer(mut self, size: usize) -> Self {
        self.stream_buffer = size;
        self
    }

    /// Build the services. Stores left unset default to a single shared
    /// [`MemoryStore`].
    pub fn build(self) -> Result<Services> {
        if self.stream_buffer == 0 {
            return Err(RusveError::Configuration(
                "stream buffer must hold at least one record".to_string(),
            ));
        }

        let memory = MemoryStore::new();
        let user_store = self
            .user_store
            .unwrap_or_else(|| Arc::new(memory.clone()) as Arc<dyn UserStore>);
        let file_store = self
            .file_store
            .unwrap_or_else(|| Arc::new(memory.clone()) as Arc<dyn FileStore>);
        let note_store = self
            .note_store
            .unwrap_or_else(|| Arc::new(memory) as Arc<dyn NoteStore>);

        tracing::info!(
            users = user_store.name(),
            files = file_store.name(),
            notes = note_store.name(),
            ownership = ?self.ownership,
            provision = self.auth.provision,
            stream_buffer = self.stream_buffer,
            "building services"
        );

        let utils_files = FileRepository::new(file_store)
            .with_ownership(self.ownership)
            .with_stream_buffer(self.stream_buffer);
        let user_files = utils_files.with_surface(FileSurface::Users);
        let notes = NoteBook::new(note_store)
            .with_ownership(self.ownership)
            .with_stream_buffer(self.stream_buffer);
        let users = UserDirectory::new(user_store, user_files.clone(), notes.clone())
            .with_auth_policy(self.auth)
            .with_stream_buffer(self.stream_buffer);

        Ok(Services {
            users,
            user_files,
            utils_files,
            notes,
        })
    }
}

impl Default for RusveBuilder {
    fn default() -> Self {
        Self::new()
    }
}
