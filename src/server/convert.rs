//! Conversions between rusve native types and protobuf types.
//!
//! Decoding is strict: an unknown enum value or a malformed timestamp is an
//! `InvalidArgument`, never a silent default. Timestamps travel as RFC 3339
//! strings; an empty string is the proto3 zero value and decodes to the Unix
//! epoch.

use chrono::{DateTime, SecondsFormat, Utc};
use tonic::{Code, Status};

use crate::types::{
    AuthRequest, File, FileId, FileKey, FileType, Note, NoteId, PaymentId, Target, TargetId, User,
    UserId, UserRole,
};
use crate::{Result, RusveError};

use super::proto;

pub fn format_time(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_time(value: &str, field: &str) -> Result<DateTime<Utc>> {
    if value.is_empty() {
        return Ok(DateTime::<Utc>::UNIX_EPOCH);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| RusveError::InvalidArgument(format!("{field}: invalid timestamp '{value}': {e}")))
}

fn non_empty<T: From<String>>(value: String) -> Option<T> {
    if value.is_empty() { None } else { Some(T::from(value)) }
}

// =============================================================================
// Native → Proto
// =============================================================================

impl From<User> for proto::User {
    fn from(user: User) -> Self {
        proto::User {
            id: user.id.into_string(),
            created: format_time(&user.created),
            updated: format_time(&user.updated),
            email: user.email,
            role: user.role.wire_value(),
            sub: user.sub,
            name: user.name,
            avatar_id: user.avatar_id.map(FileId::into_string).unwrap_or_default(),
            payment_id: user.payment_id.into_string(),
            deleted: user.deleted.as_ref().map(format_time).unwrap_or_default(),
        }
    }
}

impl From<File> for proto::File {
    fn from(file: File) -> Self {
        proto::File {
            id: file.id.into_string(),
            created: format_time(&file.created),
            updated: format_time(&file.updated),
            target_id: file.target_id.into_string(),
            name: file.name,
            r#type: file.file_type.wire_value(),
            buffer: file.buffer,
            url: file.url,
        }
    }
}

impl From<Note> for proto::Note {
    fn from(note: Note) -> Self {
        proto::Note {
            id: note.id.into_string(),
            created: format_time(&note.created),
            updated: format_time(&note.updated),
            user_id: note.user_id.into_string(),
            title: note.title,
            content: note.content,
        }
    }
}

impl From<Target> for proto::TargetId {
    fn from(target: Target) -> Self {
        proto::TargetId {
            target_id: target.id.into_string(),
            r#type: target.file_type.wire_value(),
        }
    }
}

impl From<FileKey> for proto::FileId {
    fn from(key: FileKey) -> Self {
        proto::FileId {
            file_id: key.file_id.into_string(),
            target_id: key.target_id.into_string(),
        }
    }
}

impl From<AuthRequest> for proto::AuthRequest {
    fn from(request: AuthRequest) -> Self {
        proto::AuthRequest {
            sub: request.sub,
            email: request.email,
        }
    }
}

// =============================================================================
// Proto → Native
// =============================================================================

impl TryFrom<proto::User> for User {
    type Error = RusveError;

    fn try_from(p: proto::User) -> Result<Self> {
        Ok(User {
            created: parse_time(&p.created, "user.created")?,
            updated: parse_time(&p.updated, "user.updated")?,
            role: UserRole::try_from(p.role)?,
            id: UserId::from(p.id),
            sub: p.sub,
            email: p.email,
            name: p.name,
            avatar_id: non_empty(p.avatar_id),
            payment_id: PaymentId::from(p.payment_id),
            deleted: match p.deleted.as_str() {
                "" => None,
                value => Some(parse_time(value, "user.deleted")?),
            },
        })
    }
}

impl TryFrom<proto::File> for File {
    type Error = RusveError;

    fn try_from(p: proto::File) -> Result<Self> {
        Ok(File {
            created: parse_time(&p.created, "file.created")?,
            updated: parse_time(&p.updated, "file.updated")?,
            file_type: FileType::try_from(p.r#type)?,
            id: FileId::from(p.id),
            target_id: TargetId::from(p.target_id),
            name: p.name,
            buffer: p.buffer,
            url: p.url,
        })
    }
}

impl TryFrom<proto::Note> for Note {
    type Error = RusveError;

    fn try_from(p: proto::Note) -> Result<Self> {
        Ok(Note {
            created: parse_time(&p.created, "note.created")?,
            updated: parse_time(&p.updated, "note.updated")?,
            id: NoteId::from(p.id),
            user_id: UserId::from(p.user_id),
            title: p.title,
            content: p.content,
        })
    }
}

impl TryFrom<proto::TargetId> for Target {
    type Error = RusveError;

    fn try_from(p: proto::TargetId) -> Result<Self> {
        Ok(Target {
            file_type: FileType::try_from(p.r#type)?,
            id: TargetId::from(p.target_id),
        })
    }
}

impl From<proto::FileId> for FileKey {
    fn from(p: proto::FileId) -> Self {
        FileKey::new(p.target_id, p.file_id)
    }
}

impl From<proto::AuthRequest> for AuthRequest {
    fn from(p: proto::AuthRequest) -> Self {
        AuthRequest::new(p.sub, p.email)
    }
}

/// Split a `NoteId` message into the note id and its (possibly empty) owner.
pub fn note_ref(p: proto::NoteId) -> (NoteId, UserId) {
    (NoteId::from(p.note_id), UserId::from(p.user_id))
}

/// Split a `PaymentId` message into the user id and the payment id.
pub fn payment_ref(p: proto::PaymentId) -> (UserId, PaymentId) {
    (UserId::from(p.user_id), PaymentId::from(p.payment_id))
}

// =============================================================================
// Errors ↔ Status
// =============================================================================

impl From<RusveError> for Status {
    fn from(err: RusveError) -> Self {
        match err {
            RusveError::NotFound(msg) => Status::not_found(msg),
            RusveError::AlreadyExists(msg) => Status::already_exists(msg),
            RusveError::InvalidArgument(msg) => Status::invalid_argument(msg),
            RusveError::FailedPrecondition(msg) => Status::failed_precondition(msg),
            RusveError::Unauthenticated => Status::unauthenticated("unauthenticated"),
            RusveError::PermissionDenied(msg) => Status::permission_denied(msg),
            RusveError::Transport(msg) => Status::unavailable(msg),
            other @ (RusveError::Storage(_) | RusveError::Configuration(_)) => {
                Status::internal(other.to_string())
            }
        }
    }
}

/// Map a status received by a client back onto the error taxonomy.
pub fn error_from_status(status: Status) -> RusveError {
    let msg = status.message().to_string();
    match status.code() {
        Code::NotFound => RusveError::NotFound(msg),
        Code::AlreadyExists => RusveError::AlreadyExists(msg),
        Code::InvalidArgument => RusveError::InvalidArgument(msg),
        Code::FailedPrecondition => RusveError::FailedPrecondition(msg),
        Code::Unauthenticated => RusveError::Unauthenticated,
        Code::PermissionDenied => RusveError::PermissionDenied(msg),
        Code::Internal => RusveError::Storage(msg),
        code => RusveError::Transport(format!("{code}: {msg}")),
    }
}
