//! Service facades over the entity stores.
//!
//! Each facade owns the validation and ownership rules of one resource
//! family and records call metrics. The transport layer in
//! [`server`](crate::server) is a thin shim over these types, so everything
//! here can be exercised in-process without a network.
//!
//! - [`UserDirectory`]: accounts, identity resolution and payment ids
//! - [`FileRepository`]: files under typed targets, shared by two surfaces
//! - [`NoteBook`]: per-user notes

mod builder;
mod files;
mod notes;
mod users;

pub use builder::{Rusve, RusveBuilder, Services};
pub use files::{FileRepository, FileSurface};
pub use notes::NoteBook;
pub use users::UserDirectory;

use std::time::Instant;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::{Result, telemetry};

/// How `Auth` treats a subject it has never seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthPolicy {
    /// Create a fresh account for an unknown subject. When `false`, `Auth`
    /// fails with `NotFound` instead.
    pub provision: bool,
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self { provision: true }
    }
}

/// What deleting an owner does to the records it still owns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnershipPolicy {
    /// Delete the children first, then the owner.
    Cascade,
    /// Fail with `FailedPrecondition` while children remain.
    #[default]
    Refuse,
}

/// Record the outcome of one facade call.
pub(crate) fn record_call<T>(
    service: &'static str,
    method: &'static str,
    start: Instant,
    outcome: &Result<T>,
) {
    let status = match outcome {
        Ok(_) => "ok",
        Err(e) if e.is_client_error() => {
            debug!(service, method, error = %e, "call rejected");
            e.code()
        }
        Err(e) => {
            warn!(service, method, error = %e, "call failed");
            e.code()
        }
    };
    metrics::counter!(telemetry::CALLS_TOTAL,
        "service" => service,
        "method" => method,
        "status" => status,
    )
    .increment(1);
    metrics::histogram!(telemetry::CALL_DURATION_SECONDS,
        "service" => service,
        "method" => method,
    )
    .record(start.elapsed().as_secs_f64());
}
