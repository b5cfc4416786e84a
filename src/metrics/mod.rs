//! Training Metrics Module
//!
//! Per-brain phase timing, row accumulation and CSV export.
//!
//! # Components
//!
//! - [`MetricsSession`]: Timers and rows for one trained brain
//! - [`MetricsRow`]: One completed policy-update cycle
//! - [`MetricsRegistry`]: One session per brain, flushed together
//! - [`LogSink`]: Destination for per-update summary lines

pub mod export;
pub mod registry;
pub mod row;
pub mod session;
pub mod sink;

pub use export::{write_csv, write_rows};
pub use registry::MetricsRegistry;
pub use row::{MetricsRow, CSV_HEADER};
pub use session::{MetricsSession, MetricsSessionBuilder};
pub use sink::{LogCrateSink, LogSink, MemorySink};
