//! Trainer Metrics - Phase Timing for Training Loops
//!
//! Records how long experience collection and policy updates take in a
//! reinforcement-learning training loop, logs a summary after every update
//! and exports one CSV row per update.
//!
//! # Architecture
//!
//! - [`timing`]: Clocks and the per-phase stopwatch
//! - [`metrics`]: Sessions, rows, sinks, CSV export and the per-brain registry
//! - [`config`]: YAML configuration for output location and brains
//! - [`error`]: Error type shared by all modules
//!
//! # Example
//!
//! ```rust,no_run
//! use trainer_metrics::MetricsSession;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut session = MetricsSession::new("summaries/ppo_Walker.csv", "Walker");
//!
//!     for _ in 0..10 {
//!         session.begin_collection();
//!         // ... collect experiences ...
//!         session.end_collection()?;
//!
//!         session.begin_update(2048, 0.75);
//!         // ... update the policy ...
//!         session.end_update()?;
//!     }
//!
//!     session.flush()?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod metrics;
pub mod timing;

// Re-export commonly used types
pub use config::{load_config, MetricsConfig};
pub use error::{MetricsError, Result};
pub use metrics::{MetricsRegistry, MetricsRow, MetricsSession, CSV_HEADER};
pub use timing::{Clock, ManualClock, SystemClock};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "trainer-metrics";
