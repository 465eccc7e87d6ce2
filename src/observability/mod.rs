//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! ChainClient operations produce:
//!     → tracing events and spans (logging.rs installs the subscriber)
//!     → metrics counters (metrics.rs)
//! ```

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
