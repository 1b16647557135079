//! Named Logger Registry
//!
//! Maps logger names to shared entries. The process-wide instance lives in
//! a `OnceLock` and is reached through [`LoggerRegistry::global`]; it is
//! created on first use and torn down with [`LoggerRegistry::clear`] (or per
//! name with [`LoggerRegistry::remove`]). Independent registries can be
//! built with [`LoggerRegistry::new`].

use fxhash::FxHashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use crate::format::format_line;
use crate::level::Level;
use crate::sink::Sink;

static GLOBAL: OnceLock<LoggerRegistry> = OnceLock::new();

/// Registry of logger entries keyed by name
#[derive(Default)]
pub struct LoggerRegistry {
    entries: Mutex<FxHashMap<String, Arc<LoggerEntry>>>,
}

impl LoggerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry
    pub fn global() -> &'static LoggerRegistry {
        GLOBAL.get_or_init(LoggerRegistry::new)
    }

    /// Resolve the entry for `name`, creating it (INFO, no sinks) if absent
    pub fn entry(&self, name: &str) -> Arc<LoggerEntry> {
        let mut entries = lock(&self.entries);
        Arc::clone(
            entries
                .entry(name.to_string())
                .or_insert_with(|| Arc::new(LoggerEntry::new(name))),
        )
    }

    /// Look up an existing entry
    pub fn get(&self, name: &str) -> Option<Arc<LoggerEntry>> {
        lock(&self.entries).get(name).cloned()
    }

    /// Detach all sinks of `name` and drop it from the registry.
    ///
    /// Handles still held elsewhere keep working but no longer write anywhere.
    pub fn remove(&self, name: &str) -> bool {
        match lock(&self.entries).remove(name) {
            Some(entry) => {
                entry.detach_all();
                true
            }
            None => false,
        }
    }

    /// Detach every entry's sinks and empty the registry
    pub fn clear(&self) {
        let drained: Vec<_> = lock(&self.entries).drain().map(|(_, e)| e).collect();
        for entry in drained {
            entry.detach_all();
        }
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = lock(&self.entries).keys().cloned().collect();
        names.sort();
        names
    }
}

struct EntryState {
    level: Level,
    sinks: Vec<Box<dyn Sink>>,
}

/// Shared state behind every logger handle with the same name
pub struct LoggerEntry {
    name: String,
    state: Mutex<EntryState>,
}

impl LoggerEntry {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            state: Mutex::new(EntryState {
                level: Level::default(),
                sinks: Vec::new(),
            }),
        }
    }

    /// Logger name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current threshold
    pub fn level(&self) -> Level {
        lock(&self.state).level
    }

    /// Number of attached sinks
    pub fn sink_count(&self) -> usize {
        lock(&self.state).sinks.len()
    }

    /// Descriptions of attached sinks, in attachment order
    pub fn sink_descriptions(&self) -> Vec<String> {
        lock(&self.state).sinks.iter().map(|s| s.describe()).collect()
    }

    /// Replace the threshold and the whole sink list in one step
    pub fn reconfigure(&self, level: Level, sinks: Vec<Box<dyn Sink>>) {
        let mut state = lock(&self.state);
        state.level = level;
        state.sinks = sinks;
    }

    fn detach_all(&self) {
        lock(&self.state).sinks.clear();
    }

    /// Whether a record at `level` passes the threshold
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.level()
    }

    /// Format `message` once and write it to every accepting sink.
    ///
    /// The entry lock is held for the whole emission, so lines from
    /// concurrent callers never interleave and rotation happens between
    /// complete records.
    pub fn emit(&self, level: Level, message: &str) {
        let mut state = lock(&self.state);
        if level < state.level || state.sinks.is_empty() {
            return;
        }

        let line = format_line(&chrono::Local::now(), &self.name, level, message);
        for sink in state.sinks.iter_mut().filter(|s| s.accepts(level)) {
            if let Err(e) = sink.write_line(&line) {
                tracing::warn!(
                    logger = %self.name,
                    sink = %sink.describe(),
                    error = %e,
                    "failed to write log line"
                );
            }
        }
    }
}

impl std::fmt::Debug for LoggerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerEntry")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("sinks", &self.sink_descriptions())
            .finish()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct Collect {
        level: Level,
        lines: Arc<Mutex<Vec<String>>>,
    }

    impl Sink for Collect {
        fn level(&self) -> Level {
            self.level
        }
        fn write_line(&mut self, line: &str) -> io::Result<()> {
            self.lines.lock().unwrap().push(line.to_string());
            Ok(())
        }
        fn describe(&self) -> String {
            "collect".to_string()
        }
    }

    fn collector(level: Level) -> (Box<dyn Sink>, Arc<Mutex<Vec<String>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let sink = Collect {
            level,
            lines: Arc::clone(&lines),
        };
        (Box::new(sink), lines)
    }

    #[test]
    fn test_same_name_shares_entry() {
        let registry = LoggerRegistry::new();
        let a = registry.entry("svc");
        let b = registry.entry("svc");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.names(), vec!["svc".to_string()]);
    }

    #[test]
    fn test_reconfigure_replaces_sinks() {
        let registry = LoggerRegistry::new();
        let entry = registry.entry("svc");
        let (first, first_lines) = collector(Level::Debug);
        let (second, second_lines) = collector(Level::Debug);

        entry.reconfigure(Level::Debug, vec![first]);
        entry.emit(Level::Info, "one");
        entry.reconfigure(Level::Debug, vec![second]);
        entry.emit(Level::Info, "two");

        assert_eq!(entry.sink_count(), 1);
        assert_eq!(first_lines.lock().unwrap().len(), 1);
        let second_lines = second_lines.lock().unwrap();
        assert_eq!(second_lines.len(), 1);
        assert!(second_lines[0].ends_with(" - svc - INFO - two\n"));
    }

    #[test]
    fn test_threshold_and_sink_filters() {
        let registry = LoggerRegistry::new();
        let entry = registry.entry("svc");
        let (loud, loud_lines) = collector(Level::Debug);
        let (quiet, quiet_lines) = collector(Level::Error);

        entry.reconfigure(Level::Info, vec![loud, quiet]);
        entry.emit(Level::Debug, "dropped");
        entry.emit(Level::Warning, "warn");
        entry.emit(Level::Critical, "boom");

        assert_eq!(loud_lines.lock().unwrap().len(), 2);
        assert_eq!(quiet_lines.lock().unwrap().len(), 1);
        assert!(!entry.enabled(Level::Debug));
    }

    #[test]
    fn test_remove_and_clear_detach_sinks() {
        let registry = LoggerRegistry::new();
        let kept = registry.entry("a");
        let (sink, lines) = collector(Level::Debug);
        kept.reconfigure(Level::Debug, vec![sink]);
        registry.entry("b");

        assert!(registry.remove("a"));
        assert!(!registry.remove("a"));
        kept.emit(Level::Info, "after removal");
        assert!(lines.lock().unwrap().is_empty());

        registry.clear();
        assert!(registry.names().is_empty());
        assert!(registry.get("b").is_none());
    }
}
