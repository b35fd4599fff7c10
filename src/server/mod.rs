//! gRPC server and shared proto types.
//!
//! This module provides:
//! - Wire messages and generated service stubs (`proto`) used by both server and client
//! - Type conversions between native and proto types (`convert`)
//! - The method table (`routes`)
//! - The tonic service implementations (`service`, server-only)
//! - Configuration types (`config`, server-only)

#[cfg(feature = "server")]
pub mod config;
pub mod convert;
pub mod proto;
pub mod routes;
#[cfg(feature = "server")]
pub mod service;

#[cfg(feature = "server")]
pub use service::{NotesGrpcService, Routers, UsersGrpcService, UtilsGrpcService};
