//! User-owned notes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{NoteId, UserId};

/// A note. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub user_id: UserId,
    pub title: String,
    pub content: String,
}

impl Note {
    /// A new, not yet stored note. The id is left empty for the service to assign.
    pub fn new(
        user_id: impl Into<UserId>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: NoteId::default(),
            created: now,
            updated: now,
            user_id: user_id.into(),
            title: title.into(),
            content: content.into(),
        }
    }
}
