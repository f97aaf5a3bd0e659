//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, gauges via the metrics facade)
//!
//! Consumers:
//!     → stderr (pretty or JSON lines)
//!     → whatever metrics recorder the embedding application installs
//! ```
//!
//! # Design Decisions
//! - Private keys and signatures are never logged
//! - Metrics are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
