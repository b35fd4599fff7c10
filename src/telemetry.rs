//! Telemetry metric name constants.
//!
//! Centralised metric names for rusve operations. Consumers install their
//! own `metrics` recorder (e.g. prometheus, statsd); without a recorder
//! installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `rusve_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `service`: wire service name (e.g. "UsersService", "UtilsService")
//! - `method`: wire method name (e.g. "GetFiles", "CreateNote")
//! - `status`: outcome: "ok" or a [`RusveError::code`](crate::RusveError::code)

/// Total calls handled by the service facades.
///
/// Labels: `service`, `method`, `status`.
pub const CALLS_TOTAL: &str = "rusve_calls_total";

/// Call duration in seconds. For streaming calls this covers opening the
/// stream, not draining it.
///
/// Labels: `service`, `method`.
pub const CALL_DURATION_SECONDS: &str = "rusve_call_duration_seconds";

/// Total records emitted on server-streaming responses.
///
/// Labels: `service`, `method`.
pub const STREAM_ITEMS_TOTAL: &str = "rusve_stream_items_total";
