//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Bridge operations produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (operation counters, loaded-record gauge)
//!
//! Consumers:
//!     → stderr log output (filtered by RUST_LOG or config)
//!     → Prometheus scrape endpoint (optional)
//! ```

pub mod logging;
pub mod metrics;
