//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! blockchain subsystem produces:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (RPC and signing counters via the metrics facade)
//! ```
//!
//! # Design Decisions
//! - Key material never appears in log fields
//! - No exporter is installed here; embedders pick their own recorder

pub mod logging;
pub mod metrics;
