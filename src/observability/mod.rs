//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Navigator operations produce:
//!     → tracing events (navigation, match result, loader outcome)
//!     → metrics.rs (counters and the loading gauge)
//!
//! Consumers:
//!     → logging.rs installs a tracing-subscriber for hosts that want one
//!     → Any `metrics` recorder the host installs
//! ```
//!
//! # Design Decisions
//! - The library emits events; the host owns subscribers and recorders
//! - Loader failures without an error hook are reported as error events
//! - Metrics are cheap facade calls and can be switched off by config

pub mod logging;
pub mod metrics;
