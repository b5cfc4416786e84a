//! Metrics Session
//!
//! Records how long experience collection and policy updates take for one
//! brain, logs a summary per update and keeps one row per update for CSV
//! export.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use log::{debug, warn};

use super::export::write_csv;
use super::row::{format_seconds, MetricsRow};
use super::sink::{LogCrateSink, LogSink};
use crate::error::{MetricsError, Result};
use crate::timing::{Clock, PhaseTimer, SystemClock};

/// Phase timers and accumulated rows for one trained brain.
///
/// # Example
///
/// ```rust,no_run
/// use trainer_metrics::MetricsSession;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut session = MetricsSession::new("summaries/ppo_Walker.csv", "Walker");
///
///     session.begin_collection();
///     // ... step the environment ...
///     session.end_collection()?;
///
///     session.begin_update(2048, 1.5);
///     // ... train the policy ...
///     session.end_update()?;
///
///     session.flush()?;
///     Ok(())
/// }
/// ```
pub struct MetricsSession {
    path: PathBuf,
    label: String,
    clock: Box<dyn Clock>,
    sink: Box<dyn LogSink>,
    creation_time: Instant,
    started_at: DateTime<Local>,
    collection: PhaseTimer,
    update: PhaseTimer,
    last_experience_count: u64,
    last_mean_return: f64,
    last_collection_duration: Option<Duration>,
    last_update_duration: Option<Duration>,
    rows: Vec<MetricsRow>,
}

impl MetricsSession {
    /// Creates a session on the system clock that logs through `log`.
    pub fn new(path: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self::builder(path, label).build()
    }

    /// Starts building a session with a custom clock or sink.
    pub fn builder(path: impl Into<PathBuf>, label: impl Into<String>) -> MetricsSessionBuilder {
        MetricsSessionBuilder {
            path: path.into(),
            label: label.into(),
            clock: None,
            sink: None,
        }
    }

    /// Marks the start of experience collection.
    ///
    /// Has no effect while a collection is already in progress.
    pub fn begin_collection(&mut self) {
        let now = self.clock.now();
        if !self.collection.start_if_idle(now) {
            debug!("Experience collection for {} already in progress", self.label);
        }
    }

    /// Marks the end of experience collection.
    ///
    /// Returns the collection time in seconds.
    ///
    /// # Errors
    ///
    /// `MetricsError::CollectionNotStarted` when no collection is in progress.
    pub fn end_collection(&mut self) -> Result<f64> {
        let now = self.clock.now();
        let elapsed = self
            .collection
            .stop(now)
            .ok_or_else(|| MetricsError::CollectionNotStarted(self.label.clone()))?;

        self.last_collection_duration = Some(elapsed);
        Ok(elapsed.as_secs_f64())
    }

    /// Marks the start of a policy update.
    ///
    /// Records the buffer size and mean return reported for this update.
    /// Restarts the update timer if one was already running.
    pub fn begin_update(&mut self, experience_count: u64, mean_return: f64) {
        self.last_experience_count = experience_count;
        self.last_mean_return = mean_return;
        self.update.restart(self.clock.now());
    }

    /// Marks the end of a policy update.
    ///
    /// Logs a summary through the sink and appends one row. An update that
    /// ran before any experience collection finished records a collection
    /// time of zero in the row, logs a warning and reports the collection
    /// time as `n/a` in the summary line.
    ///
    /// # Errors
    ///
    /// `MetricsError::UpdateNotStarted` when `begin_update` was not called
    /// since the last completed update. No row is appended in that case.
    pub fn end_update(&mut self) -> Result<&MetricsRow> {
        let now = self.clock.now();
        let update_duration = self
            .update
            .stop(now)
            .ok_or_else(|| MetricsError::UpdateNotStarted(self.label.clone()))?;
        let elapsed_since_start = now.saturating_duration_since(self.creation_time);

        self.last_update_duration = Some(update_duration);

        let collection_text = match self.last_collection_duration {
            Some(duration) => format!("{} s", format_seconds(duration.as_secs_f64())),
            None => {
                warn!(
                    "Policy update for {} finished before any experience collection; \
                     recording collection time as 0",
                    self.label
                );
                "n/a".to_string()
            }
        };

        let row = MetricsRow::new(
            self.label.clone(),
            update_duration,
            elapsed_since_start,
            self.last_collection_duration.unwrap_or_default(),
            self.last_experience_count,
            self.last_mean_return,
        );

        self.sink.debug(&format!(
            "Policy update metrics for {}: update {} s, since start {} s, \
             experience collection {}, buffer length {}, mean return {}",
            row.label,
            format_seconds(row.update_duration),
            format_seconds(row.elapsed_since_start),
            collection_text,
            row.experience_count,
            format_seconds(row.mean_return),
        ));

        self.rows.push(row);
        Ok(&self.rows[self.rows.len() - 1])
    }

    /// Writes the header and every row to the session's path.
    ///
    /// Existing content is replaced; calling this repeatedly rewrites the
    /// full history each time.
    pub fn flush(&self) -> Result<()> {
        write_csv(&self.path, &self.rows)
    }

    /// Name of the brain being trained.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Destination of [`flush`](Self::flush).
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rows recorded so far, oldest first.
    pub fn rows(&self) -> &[MetricsRow] {
        &self.rows
    }

    /// Local wall-clock time the session was created.
    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    /// Time since the session was created.
    pub fn elapsed(&self) -> Duration {
        self.clock.now().saturating_duration_since(self.creation_time)
    }

    pub fn is_collecting(&self) -> bool {
        self.collection.is_running()
    }

    pub fn is_updating(&self) -> bool {
        self.update.is_running()
    }

    /// Duration of the last completed collection in seconds.
    pub fn last_collection_duration(&self) -> Option<f64> {
        self.last_collection_duration.map(|d| d.as_secs_f64())
    }

    /// Duration of the last completed update in seconds.
    pub fn last_update_duration(&self) -> Option<f64> {
        self.last_update_duration.map(|d| d.as_secs_f64())
    }

    pub fn last_experience_count(&self) -> u64 {
        self.last_experience_count
    }

    pub fn last_mean_return(&self) -> f64 {
        self.last_mean_return
    }
}

impl fmt::Debug for MetricsSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricsSession")
            .field("label", &self.label)
            .field("path", &self.path)
            .field("started_at", &self.started_at)
            .field("collection", &self.collection)
            .field("update", &self.update)
            .field("rows", &self.rows.len())
            .finish_non_exhaustive()
    }
}

/// Builder for [`MetricsSession`].
pub struct MetricsSessionBuilder {
    path: PathBuf,
    label: String,
    clock: Option<Box<dyn Clock>>,
    sink: Option<Box<dyn LogSink>>,
}

impl MetricsSessionBuilder {
    /// Reads time from `clock` instead of the system clock.
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Sends per-update lines to `sink` instead of the `log` facade.
    pub fn sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Creates the session; its creation time is read from the clock now.
    pub fn build(self) -> MetricsSession {
        let clock = self.clock.unwrap_or_else(|| Box::new(SystemClock));
        let sink = self.sink.unwrap_or_else(|| Box::new(LogCrateSink));
        let creation_time = clock.now();
        let started_at = Local::now();

        debug!(
            "Metrics session for {} started at {} (output: {})",
            self.label,
            started_at.format("%Y-%m-%d %H:%M:%S"),
            self.path.display()
        );

        MetricsSession {
            path: self.path,
            label: self.label,
            clock,
            sink,
            creation_time,
            started_at,
            collection: PhaseTimer::new(),
            update: PhaseTimer::new(),
            last_experience_count: 0,
            last_mean_return: 0.0,
            last_collection_duration: None,
            last_update_duration: None,
            rows: Vec::new(),
        }
    }
}
