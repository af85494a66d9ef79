//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured, session/slot/path fields)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → whatever subscriber/recorder the host installs
//! ```
//!
//! # Design Decisions
//! - The library emits through the `tracing` and `metrics` facades only;
//!   it never installs a subscriber or recorder itself
//! - Metric updates go through record_* helpers so call sites stay uniform

pub mod metrics;
