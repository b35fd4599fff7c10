//! Wire messages of the `rusve.v1` package.
//!
//! Mirrors `proto/rusve.proto` field for field. The service stubs are
//! generated at build time and included at the bottom of this module.

/// Void acknowledgment.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Empty {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UserId {
    #[prost(string, tag = "1")]
    pub user_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UserIds {
    #[prost(string, repeated, tag = "1")]
    pub user_ids: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PaymentId {
    #[prost(string, tag = "1")]
    pub user_id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub payment_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AuthRequest {
    #[prost(string, tag = "1")]
    pub sub: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub email: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct User {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    /// RFC 3339.
    #[prost(string, tag = "2")]
    pub created: ::prost::alloc::string::String,
    /// RFC 3339.
    #[prost(string, tag = "3")]
    pub updated: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub email: ::prost::alloc::string::String,
    #[prost(enumeration = "UserRole", tag = "5")]
    pub role: i32,
    #[prost(string, tag = "6")]
    pub sub: ::prost::alloc::string::String,
    #[prost(string, tag = "7")]
    pub name: ::prost::alloc::string::String,
    /// Empty when the user has no avatar.
    #[prost(string, tag = "8")]
    pub avatar_id: ::prost::alloc::string::String,
    #[prost(string, tag = "9")]
    pub payment_id: ::prost::alloc::string::String,
    /// RFC 3339. Empty while the account is live.
    #[prost(string, tag = "10")]
    pub deleted: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TargetId {
    #[prost(string, tag = "1")]
    pub target_id: ::prost::alloc::string::String,
    #[prost(enumeration = "FileType", tag = "2")]
    pub r#type: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FileId {
    #[prost(string, tag = "1")]
    pub file_id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub target_id: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct File {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub created: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub updated: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub target_id: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub name: ::prost::alloc::string::String,
    #[prost(enumeration = "FileType", tag = "6")]
    pub r#type: i32,
    #[prost(bytes = "vec", tag = "7")]
    pub buffer: ::prost::alloc::vec::Vec<u8>,
    #[prost(string, tag = "8")]
    pub url: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Note {
    #[prost(string, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub created: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub updated: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub user_id: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub title: ::prost::alloc::string::String,
    #[prost(string, tag = "6")]
    pub content: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NoteId {
    #[prost(string, tag = "1")]
    pub note_id: ::prost::alloc::string::String,
    /// Owner of the note. May be empty.
    #[prost(string, tag = "2")]
    pub user_id: ::prost::alloc::string::String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum FileType {
    Document = 0,
    Avatar = 1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum UserRole {
    RoleUser = 0,
    RoleAdmin = 1,
}

include!(concat!(env!("OUT_DIR"), "/rusve.v1.UsersService.rs"));
include!(concat!(env!("OUT_DIR"), "/rusve.v1.UtilsService.rs"));
include!(concat!(env!("OUT_DIR"), "/rusve.v1.NotesService.rs"));
