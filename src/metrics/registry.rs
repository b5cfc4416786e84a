//! Metrics Registry
//!
//! Holds one session per brain for a training run and writes them all
//! at the end.

use std::fs;
use std::path::PathBuf;

use log::info;

use super::session::MetricsSession;
use crate::config::MetricsConfig;
use crate::error::{MetricsError, Result};

/// Sessions for every brain in a run, kept in registration order.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    sessions: Vec<MetricsSession>,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates one session per configured brain.
    pub fn from_config(config: &MetricsConfig) -> Result<Self> {
        config.validate()?;

        let mut registry = Self::new();
        for brain in &config.brains {
            registry.register(brain.clone(), config.csv_path(brain))?;
        }
        Ok(registry)
    }

    /// Adds a session built on the system clock and the `log` sink.
    pub fn register(
        &mut self,
        label: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Result<&mut MetricsSession> {
        self.insert(MetricsSession::new(path, label))
    }

    /// Adds a session that was built elsewhere.
    ///
    /// # Errors
    ///
    /// `MetricsError::DuplicateBrain` when a session with the same label exists.
    pub fn insert(&mut self, session: MetricsSession) -> Result<&mut MetricsSession> {
        if self.contains(session.label()) {
            return Err(MetricsError::DuplicateBrain(session.label().to_string()));
        }

        self.sessions.push(session);
        let index = self.sessions.len() - 1;
        Ok(&mut self.sessions[index])
    }

    pub fn contains(&self, label: &str) -> bool {
        self.sessions.iter().any(|s| s.label() == label)
    }

    pub fn session(&self, label: &str) -> Option<&MetricsSession> {
        self.sessions.iter().find(|s| s.label() == label)
    }

    /// Looks up a session for mutation.
    ///
    /// # Errors
    ///
    /// `MetricsError::UnknownBrain` when no session has this label.
    pub fn session_mut(&mut self, label: &str) -> Result<&mut MetricsSession> {
        self.sessions
            .iter_mut()
            .find(|s| s.label() == label)
            .ok_or_else(|| MetricsError::UnknownBrain(label.to_string()))
    }

    /// Brain names in registration order.
    pub fn labels(&self) -> Vec<&str> {
        self.sessions.iter().map(|s| s.label()).collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Number of rows recorded across all sessions.
    pub fn total_rows(&self) -> usize {
        self.sessions.iter().map(|s| s.rows().len()).sum()
    }

    /// Flushes every session, creating missing parent directories.
    ///
    /// Stops at the first failure; sessions after it are not written.
    pub fn flush_all(&self) -> Result<()> {
        for session in &self.sessions {
            if let Some(parent) = session.path().parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).map_err(|source| MetricsError::Io {
                        path: parent.to_path_buf(),
                        source,
                    })?;
                }
            }
            session.flush()?;
        }

        info!(
            "Flushed metrics for {} brains ({} rows)",
            self.sessions.len(),
            self.total_rows()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::sink::MemorySink;
    use crate::timing::ManualClock;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn test_registry_from_config() {
        let config = MetricsConfig {
            output_dir: PathBuf::from("out"),
            run_id: "run".to_string(),
            brains: vec!["Walker".to_string(), "Crawler".to_string()],
        };

        let registry = MetricsRegistry::from_config(&config).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.labels(), vec!["Walker", "Crawler"]);
        assert_eq!(
            registry.session("Crawler").unwrap().path(),
            PathBuf::from("out").join("run_Crawler.csv")
        );
    }

    #[test]
    fn test_register_duplicate_fails() {
        let mut registry = MetricsRegistry::new();
        registry.register("Walker", "a.csv").unwrap();

        let err = registry.register("Walker", "b.csv").unwrap_err();
        assert!(matches!(err, MetricsError::DuplicateBrain(ref l) if l == "Walker"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unknown_brain_lookup() {
        let mut registry = MetricsRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.session("Walker").is_none());
        assert!(matches!(
            registry.session_mut("Walker"),
            Err(MetricsError::UnknownBrain(_))
        ));
    }

    #[test]
    fn test_flush_all_creates_directories() {
        let dir = tempdir().unwrap();
        let config = MetricsConfig {
            output_dir: dir.path().join("nested").join("summaries"),
            run_id: "run".to_string(),
            brains: vec!["Walker".to_string(), "Crawler".to_string()],
        };
        let clock = ManualClock::new();
        let mut registry = MetricsRegistry::new();
        for brain in &config.brains {
            let session = MetricsSession::builder(config.csv_path(brain), brain.clone())
                .clock(clock.clone())
                .sink(MemorySink::new())
                .build();
            registry.insert(session).unwrap();
        }

        let walker = registry.session_mut("Walker").unwrap();
        walker.begin_update(32, 1.0);
        clock.advance(Duration::from_secs(1));
        walker.end_update().unwrap();
        assert_eq!(registry.total_rows(), 1);

        registry.flush_all().unwrap();

        let walker_csv = fs::read_to_string(config.csv_path("Walker")).unwrap();
        let crawler_csv = fs::read_to_string(config.csv_path("Crawler")).unwrap();
        assert_eq!(walker_csv.lines().count(), 2);
        assert_eq!(crawler_csv.lines().count(), 1);
        assert!(walker_csv.lines().nth(1).unwrap().starts_with("Walker,1.000,1.000,"));
    }
}
