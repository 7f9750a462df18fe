//! Persistent sequence counters.
//!
//! Each counter lives in its own tracker file as plain decimal text. Reads are
//! lenient (missing or corrupt content means a fresh start at 0); writes are strict
//! and surface filesystem failures to the caller.
//!
//! Nothing coordinates concurrent processes: two runs against the same tracker
//! files race and the last writer wins.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::cell::Cell;
use std::fs;

/// A single monotonically advancing counter.
pub trait CounterStore {
    /// Last persisted value, or 0 when nothing usable is stored.
    fn load(&self) -> u64;

    /// Replace the stored value.
    fn save(&self, value: u64) -> Result<()>;
}

/// Read a counter from `tracker_path`.
///
/// Never fails: a missing file, an unreadable file or content that does not parse as a
/// non-negative integer all yield 0. The whole trimmed content must be digits, so
/// `12abc` counts as corrupt rather than as 12.
pub fn load_counter(tracker_path: &Utf8Path) -> u64 {
    if !tracker_path.exists() {
        tracing::debug!("Tracker {} not found, starting at 0", tracker_path);
        return 0;
    }

    let content = match fs::read_to_string(tracker_path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("Failed to read tracker {}: {}, starting at 0", tracker_path, e);
            return 0;
        }
    };

    match content.trim().parse::<u64>() {
        Ok(value) => {
            tracing::debug!("Loaded counter {} from {}", value, tracker_path);
            value
        }
        Err(_) => {
            tracing::warn!(
                "Tracker {} holds unparseable content {:?}, starting at 0",
                tracker_path,
                content.trim()
            );
            0
        }
    }
}

/// Write `value` to `tracker_path`, creating the parent directory first.
pub fn save_counter(tracker_path: &Utf8Path, value: u64) -> Result<()> {
    if let Some(parent) = tracker_path.parent() {
        if !parent.as_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create tracker directory: {}", parent))?;
        }
    }

    fs::write(tracker_path, value.to_string())
        .with_context(|| format!("Failed to write tracker: {}", tracker_path))?;

    tracing::debug!("Saved counter {} to {}", value, tracker_path);
    Ok(())
}

/// Counter backed by a tracker file on disk.
#[derive(Debug, Clone)]
pub struct FileCounterStore {
    tracker_path: Utf8PathBuf,
}

impl FileCounterStore {
    pub fn new<P: AsRef<Utf8Path>>(tracker_path: P) -> Self {
        Self {
            tracker_path: tracker_path.as_ref().to_path_buf(),
        }
    }

    pub fn tracker_path(&self) -> &Utf8Path {
        &self.tracker_path
    }
}

impl CounterStore for FileCounterStore {
    fn load(&self) -> u64 {
        load_counter(&self.tracker_path)
    }

    fn save(&self, value: u64) -> Result<()> {
        save_counter(&self.tracker_path, value)
    }
}

/// In-memory counter for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryCounterStore {
    value: Cell<u64>,
    saves: Cell<usize>,
}

impl MemoryCounterStore {
    pub fn new(value: u64) -> Self {
        Self {
            value: Cell::new(value),
            saves: Cell::new(0),
        }
    }

    /// Number of times `save` has been called
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl CounterStore for MemoryCounterStore {
    fn load(&self) -> u64 {
        self.value.get()
    }

    fn save(&self, value: u64) -> Result<()> {
        self.value.set(value);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
