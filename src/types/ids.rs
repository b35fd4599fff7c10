//! Opaque string identifiers.
//!
//! Every identifier wraps a plain string. The layer never interprets the
//! contents; ids it assigns itself are UUIDv7 strings so that they sort by
//! creation time.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Empty ids are the proto3 zero value, i.e. "not set".
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

string_id!(
    /// Identity of a [`User`](super::User).
    UserId
);
string_id!(
    /// Payment-provider customer id attached to a user. Never validated here.
    PaymentId
);
string_id!(
    /// Identity of a target, the typed container that owns files.
    TargetId
);
string_id!(
    /// Identity of a [`File`](super::File), unique within its target.
    FileId
);
string_id!(
    /// Identity of a [`Note`](super::Note), unique within its owner.
    NoteId
);

fn fresh() -> String {
    Uuid::now_v7().to_string()
}

impl UserId {
    /// Allocate a new time-ordered id.
    pub fn generate() -> Self {
        Self(fresh())
    }
}

impl FileId {
    /// Allocate a new time-ordered id.
    pub fn generate() -> Self {
        Self(fresh())
    }
}

impl NoteId {
    /// Allocate a new time-ordered id.
    pub fn generate() -> Self {
        Self(fresh())
    }
}

/// A user's own files live under the target that shares the user's id.
impl From<&UserId> for TargetId {
    fn from(user: &UserId) -> Self {
        Self(user.0.clone())
    }
}
