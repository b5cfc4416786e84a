//! Log Sinks
//!
//! Where per-update summary lines go. Sessions take a sink at construction
//! instead of reaching for the global logger directly.

use std::sync::{Arc, Mutex};

use log::debug;

/// Receives one diagnostic line per completed policy update.
pub trait LogSink: Send {
    /// Emits a line at debug severity.
    fn debug(&self, message: &str);
}

/// Forwards lines to the `log` facade under the `trainer_metrics` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogCrateSink;

impl LogSink for LogCrateSink {
    fn debug(&self, message: &str) {
        debug!(target: "trainer_metrics", "{}", message);
    }
}

/// Keeps emitted lines in memory.
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every line captured so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LogSink for MemorySink {
    fn debug(&self, message: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(message.to_string());
    }
}
