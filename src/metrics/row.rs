//! Metrics Rows
//!
//! Typed record for one policy-update cycle and its text rendering.

use std::time::Duration;

/// Column names written as the first line of every metrics file.
pub const CSV_HEADER: [&str; 6] = [
    "Brain name",
    "Time to update policy",
    "Time since start of training",
    "Time for last experience collection",
    "Number of experiences used for training",
    "Mean return",
];

/// One completed policy-update cycle.
///
/// Durations are stored in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsRow {
    /// Brain the row belongs to
    pub label: String,
    /// Time spent in the policy update
    pub update_duration: f64,
    /// Time since the session was created
    pub elapsed_since_start: f64,
    /// Duration of the most recent experience collection
    pub collection_duration: f64,
    /// Experiences in the buffer when the update began
    pub experience_count: u64,
    /// Mean return since the previous update
    pub mean_return: f64,
}

impl MetricsRow {
    /// Builds a row from measured durations.
    pub fn new(
        label: impl Into<String>,
        update_duration: Duration,
        elapsed_since_start: Duration,
        collection_duration: Duration,
        experience_count: u64,
        mean_return: f64,
    ) -> Self {
        Self {
            label: label.into(),
            update_duration: update_duration.as_secs_f64(),
            elapsed_since_start: elapsed_since_start.as_secs_f64(),
            collection_duration: collection_duration.as_secs_f64(),
            experience_count,
            mean_return,
        }
    }

    /// Renders the row in header order with floats fixed to three decimals.
    pub fn to_record(&self) -> [String; 6] {
        [
            self.label.clone(),
            format_seconds(self.update_duration),
            format_seconds(self.elapsed_since_start),
            format_seconds(self.collection_duration),
            self.experience_count.to_string(),
            format_seconds(self.mean_return),
        ]
    }
}

/// Formats a float with exactly three digits after the decimal point.
///
/// Not-a-number is written as `nan`; infinities keep `inf`/`-inf`.
pub fn format_seconds(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    format!("{:.3}", value)
}
