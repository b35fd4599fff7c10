//! Public types for the Rusve API.

mod file;
mod file_type;
mod ids;
mod note;
mod user;

pub use file::{File, FileKey, Target};
pub use file_type::FileType;
pub use ids::{FileId, NoteId, PaymentId, TargetId, UserId};
pub use note::Note;
pub use user::{AuthRequest, User, UserRole};
