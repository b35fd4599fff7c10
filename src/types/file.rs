//! Files and the targets that own them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::file_type::FileType;
use super::ids::{FileId, TargetId};

/// A typed container of files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    pub id: TargetId,
    pub file_type: FileType,
}

impl Target {
    pub fn new(id: impl Into<TargetId>, file_type: FileType) -> Self {
        Self {
            id: id.into(),
            file_type,
        }
    }
}

/// Composite store key: a file id is only unique within its target.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FileKey {
    pub target_id: TargetId,
    pub file_id: FileId,
}

impl FileKey {
    pub fn new(target_id: impl Into<TargetId>, file_id: impl Into<FileId>) -> Self {
        Self {
            target_id: target_id.into(),
            file_id: file_id.into(),
        }
    }
}

/// A stored file. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub id: FileId,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub target_id: TargetId,
    pub name: String,
    pub file_type: FileType,
    /// Raw file contents.
    #[serde(skip)]
    pub buffer: Vec<u8>,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub url: String,
}

impl File {
    /// A new, not yet stored file. The id is left empty for the repository to assign.
    pub fn new(
        target: &Target,
        name: impl Into<String>,
        buffer: impl Into<Vec<u8>>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: FileId::default(),
            created: now,
            updated: now,
            target_id: target.id.clone(),
            name: name.into(),
            file_type: target.file_type,
            buffer: buffer.into(),
            url: String::new(),
        }
    }

    pub fn key(&self) -> FileKey {
        FileKey {
            target_id: self.target_id.clone(),
            file_id: self.id.clone(),
        }
    }

    pub fn target(&self) -> Target {
        Target {
            id: self.target_id.clone(),
            file_type: self.file_type,
        }
    }
}
