//! Files under typed targets.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{info, instrument, warn};

use super::{OwnershipPolicy, record_call};
use crate::store::FileStore;
use crate::stream::{self, RecordStream};
use crate::types::{File, FileId, FileKey, Target, TargetId};
use crate::{Result, RusveError};

/// Which service surface a file call came through.
///
/// Both surfaces share one repository and one identity space; the tag only
/// labels logs and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileSurface {
    /// File calls scoped under a user's target (`UsersService`).
    Users,
    /// File calls without user context (`UtilsService`).
    Utils,
}

impl FileSurface {
    /// Wire service name.
    pub fn service_name(self) -> &'static str {
        match self {
            FileSurface::Users => "UsersService",
            FileSurface::Utils => "UtilsService",
        }
    }
}

impl fmt::Display for FileSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.service_name())
    }
}

/// File operations over a [`FileStore`].
///
/// Clones share the underlying store. Use [`with_surface`](Self::with_surface)
/// to obtain a handle labelled for the other service.
#[derive(Clone)]
pub struct FileRepository {
    store: Arc<dyn FileStore>,
    surface: FileSurface,
    ownership: OwnershipPolicy,
    stream_buffer: usize,
}

impl FileRepository {
    pub fn new(store: Arc<dyn FileStore>) -> Self {
        Self {
            store,
            surface: FileSurface::Utils,
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

    /// The same repository, labelled for `surface`.
    pub fn with_surface(&self, surface: FileSurface) -> Self {
        Self {
            surface,
            ..self.clone()
        }
    }

    pub fn surface(&self) -> FileSurface {
        self.surface
    }

    /// Stream the files of a target that carry the target's type.
    ///
    /// An empty target id yields an immediately closed stream.
    #[instrument(skip(self), fields(surface = %self.surface, target = %target.id, file_type = %target.file_type))]
    pub async fn get_files(&self, target: &Target) -> Result<RecordStream<File>> {
        let start = Instant::now();
        let service = self.surface.service_name();
        let inner = if target.id.is_empty() {
            stream::from_vec(Vec::new())
        } else {
            self.store.list_files(target)
        };
        record_call::<()>(service, "GetFiles", start, &Ok(()));
        Ok(stream::bounded_stream(
            stream::counted(inner, service, "GetFiles"),
            self.stream_buffer,
        ))
    }

    #[instrument(skip(self), fields(surface = %self.surface))]
    pub async fn get_file(&self, key: &FileKey) -> Result<File> {
        let start = Instant::now();
        let outcome = self.store.get_file(key).await.and_then(|found| {
            found.ok_or_else(|| {
                RusveError::NotFound(format!("file {} in target {}", key.file_id, key.target_id))
            })
        });
        record_call(self.surface.service_name(), "GetFile", start, &outcome);
        outcome
    }

    /// Store a new file, assigning an id when none is given.
    ///
    /// Timestamps are set here; whatever the caller sent is discarded.
    #[instrument(skip(self, file), fields(surface = %self.surface, target = %file.target_id, name = %file.name))]
    pub async fn create_file(&self, file: File) -> Result<File> {
        let start = Instant::now();
        let outcome = self.insert(file).await;
        record_call(self.surface.service_name(), "CreateFile", start, &outcome);
        outcome
    }

    async fn insert(&self, mut file: File) -> Result<File> {
        if file.target_id.is_empty() {
            return Err(RusveError::InvalidArgument("file target id is required".into()));
        }
        if file.name.is_empty() {
            return Err(RusveError::InvalidArgument("file name is required".into()));
        }
        if file.id.is_empty() {
            file.id = FileId::generate();
        }
        let now = Utc::now();
        file.created = now;
        file.updated = now;
        self.store.insert_file(file.clone()).await?;
        info!(file = %file.id, bytes = file.buffer.len(), "file created");
        Ok(file)
    }

    /// Remove a file and return the removed record.
    #[instrument(skip(self), fields(surface = %self.surface))]
    pub async fn delete_file(&self, key: &FileKey) -> Result<File> {
        let start = Instant::now();
        let outcome = self.store.delete_file(key).await.and_then(|removed| {
            removed.ok_or_else(|| {
                RusveError::NotFound(format!("file {} in target {}", key.file_id, key.target_id))
            })
        });
        record_call(self.surface.service_name(), "DeleteFile", start, &outcome);
        outcome
    }

    /// Remove a target. Applies the ownership policy to the files it still
    /// holds and returns how many were removed.
    #[instrument(skip(self), fields(surface = %self.surface, policy = ?self.ownership))]
    pub async fn delete_target(&self, target_id: &TargetId) -> Result<usize> {
        let start = Instant::now();
        let outcome = self.remove_target(target_id).await;
        record_call(self.surface.service_name(), "DeleteTarget", start, &outcome);
        outcome
    }

    async fn remove_target(&self, target_id: &TargetId) -> Result<usize> {
        let remaining = self.store.count_files(target_id).await?;
        if remaining == 0 {
            return Ok(0);
        }
        match self.ownership {
            OwnershipPolicy::Refuse => {
                warn!(remaining, "target still owns files");
                Err(RusveError::FailedPrecondition(format!(
                    "target {target_id} still owns {remaining} file(s)"
                )))
            }
            OwnershipPolicy::Cascade => {
                let removed = self.store.delete_target(target_id).await?;
                info!(removed, "target files deleted");
                Ok(removed)
            }
        }
    }
}
