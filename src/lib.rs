//! Rusve - users, files and notes over gRPC
//!
//! This crate implements three small RPC services on top of pluggable entity
//! stores:
//!
//! - `UsersService`: identity resolution, accounts, payment ids, and files
//!   under the target owned by a user
//! - `UtilsService`: the same file operations without user context
//! - `NotesService`: per-user notes
//!
//! The rules live in the service facades ([`UserDirectory`], [`FileRepository`],
//! [`NoteBook`]), which can be used in-process. The `server` feature exposes
//! them over tonic, the `client` feature provides a typed [`ServiceClient`].
//!
//! # Example
//!
//! ```rust,no_run
//! use futures_util::StreamExt;
//! use rusve::{AuthRequest, Note, Rusve};
//!
//! #[tokio::main]
//! async fn main() -> rusve::Result<()> {
//!     let services = Rusve::builder().build()?;
//!
//!     let user = services
//!         .users
//!         .auth(&AuthRequest::new("oidc|1234", "ada@example.com"))
//!         .await?;
//!     services
//!         .notes
//!         .create_note(Note::new(user.id.clone(), "todo", "write the docs"))
//!         .await?;
//!
//!     let mut notes = services.notes.get_notes(&user.id).await?;
//!     while let Some(note) = notes.next().await {
//!         println!("{}", note?.title);
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod service;
pub mod store;
pub mod stream;
pub mod telemetry;
pub mod types;
mod version;

#[cfg(any(feature = "server", feature = "client"))]
pub mod server;

#[cfg(feature = "client")]
pub mod client;

// Re-export main types at crate root
pub use error::{Result, RusveError};
pub use service::{
    AuthPolicy, FileRepository, FileSurface, NoteBook, OwnershipPolicy, Rusve, RusveBuilder,
    Services, UserDirectory,
};
pub use store::{FileStore, MemoryStore, NoteStore, UserStore};
pub use stream::RecordStream;
pub use version::{GIT_BRANCH, GIT_SHA, PKG_VERSION, git_dirty, version_string};

#[cfg(feature = "client")]
pub use client::ServiceClient;

// Re-export all types
pub use types::{
    AuthRequest, File, FileId, FileKey, FileType, Note, NoteId, PaymentId, Target, TargetId, User,
    UserId, UserRole,
};
