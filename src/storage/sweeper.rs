//! Background Expiration Sweeper
//!
//! The lazy check in the repository only fires when somebody reads a paste.
//! A paste nobody ever loads again would sit on disk forever, so a single
//! background task periodically walks the shard directories and deletes
//! expired files.
//!
//! ## Rotating window
//!
//! Scanning all 256 shards on every wakeup would be wasteful, so each pass
//! covers a window of 16 consecutive shard indices and a rotating offset
//! carries the position to the next pass:
//!
//! ```text
//! pass 1:  [00 .. 0f]
//! pass 2:  [10 .. 1f]
//!   ...
//! pass 16: [f0 .. ff]   -> offset wraps back to 00
//! ```
//!
//! With the default 30-minute interval a full rotation takes 8 hours, which
//! bounds how long an unread expired paste can keep occupying disk.
//!
//! ## Tolerance
//!
//! The sweeper shares the filesystem with live readers and writers and takes
//! no locks. Files that vanish mid-pass were removed by a concurrent lazy
//! expiration - that is success, not an error. Entries with unparsable names
//! or unknown TTL labels are foreign files, skipped silently and never
//! deleted. Only the failure to list an *existing* shard directory is worth
//! an operator's attention; the sweep loop logs those.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::paste::Ttl;
use crate::storage::layout::{self, StorageLayout, SHARD_COUNT};

/// Shard directories visited per sweep pass.
///
/// A full rotation over all [`SHARD_COUNT`] shards takes
/// `SHARD_COUNT / SHARDS_PER_PASS = 16` passes.
pub const SHARDS_PER_PASS: usize = 16;

/// Configuration for the background sweep loop.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Wall-clock delay between passes (default: 30 minutes)
    pub interval: Duration,

    /// Shard directories per pass (default: [`SHARDS_PER_PASS`])
    pub shards_per_pass: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30 * 60),
            shards_per_pass: SHARDS_PER_PASS,
        }
    }
}

/// Outcome of a single sweep pass.
#[derive(Debug, Default)]
pub struct SweepStats {
    /// Shard directories that existed and were scanned
    pub shards_scanned: usize,
    /// Expired files removed by this pass
    pub files_removed: u64,
    /// Shard directories that exist but could not be listed
    pub list_failures: Vec<(PathBuf, io::Error)>,
}

/// Incremental scanner over the shard space.
///
/// The rotating offset lives here as an explicit field, owned exclusively
/// by the single sweep task - it is never shared. A process restart simply
/// resumes from shard zero, which is harmless because sweeping is
/// idempotent.
#[derive(Debug)]
pub struct Sweeper {
    layout: StorageLayout,
    shards_per_pass: usize,
    offset: usize,
}

impl Sweeper {
    /// Creates a sweeper with the default window size.
    pub fn new(layout: StorageLayout) -> Self {
        Self::with_window(layout, SHARDS_PER_PASS)
    }

    /// Creates a sweeper visiting `shards_per_pass` shards per pass.
    pub fn with_window(layout: StorageLayout, shards_per_pass: usize) -> Self {
        Self {
            layout,
            shards_per_pass,
            offset: 0,
        }
    }

    /// The shard index the next pass starts at.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Scans the next window of shard directories, deleting expired files,
    /// then advances the rotating offset.
    ///
    /// Expiry is computed exactly as the repository's load path computes it:
    /// file mtime plus the TTL parsed from the filename. Anything that does
    /// not parse as a paste record is left untouched.
    pub fn sweep_pass(&mut self) -> SweepStats {
        let now = SystemTime::now();
        let mut stats = SweepStats::default();

        for index in self.offset..self.offset + self.shards_per_pass {
            let dir = self.layout.shard_dir_by_index(index);
            let entries = match fs::read_dir(&dir) {
                Ok(entries) => entries,
                // Shards appear lazily on first write; absent is normal.
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => {
                    stats.list_failures.push((dir, e));
                    continue;
                }
            };
            stats.shards_scanned += 1;

            for entry in entries.flatten() {
                let name = entry.file_name();
                let ttl = match name.to_str().and_then(layout::parse_filename) {
                    Some((_, label)) => match Ttl::from_label(label) {
                        Some(ttl) => ttl,
                        None => continue, // foreign label, not ours to delete
                    },
                    None => continue, // not a paste record
                };

                let meta = match entry.metadata() {
                    Ok(meta) => meta,
                    Err(_) => continue, // raced with a delete
                };
                if !meta.is_file() {
                    continue;
                }
                let created_at = match meta.modified() {
                    Ok(modified) => modified,
                    Err(_) => continue,
                };

                if now > ttl.expires_at(created_at) {
                    // A concurrent lazy expiration may have won the race;
                    // either way the file is gone.
                    if fs::remove_file(entry.path()).is_ok() {
                        stats.files_removed += 1;
                    }
                }
            }
        }

        self.offset = (self.offset + self.shards_per_pass) % SHARD_COUNT;
        stats
    }
}

/// A handle to the running background sweeper.
///
/// When this handle is dropped, the sweep task stops.
#[derive(Debug)]
pub struct SweeperHandle {
    /// Sender to signal shutdown
    shutdown_tx: watch::Sender<bool>,
}

impl SweeperHandle {
    /// Starts the sweeper as a background Tokio task.
    ///
    /// Exactly one pass runs at a time - the loop is sequential, so passes
    /// never overlap even if one runs long.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use fadebin::storage::{StorageLayout, SweepConfig, SweeperHandle};
    ///
    /// let layout = StorageLayout::new("pastes");
    /// let sweeper = SweeperHandle::start(layout, SweepConfig::default());
    ///
    /// // Sweeper runs in the background...
    ///
    /// // Dropping the handle stops it
    /// drop(sweeper);
    /// ```
    pub fn start(layout: StorageLayout, config: SweepConfig) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let sweeper = Sweeper::with_window(layout, config.shards_per_pass);
        tokio::spawn(sweeper_loop(sweeper, config.interval, shutdown_rx));

        info!("Background expiration sweeper started");

        Self { shutdown_tx }
    }

    /// Stops the sweeper.
    ///
    /// This is called automatically when the handle is dropped.
    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(true);
        info!("Background expiration sweeper stopped");
    }
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// The main sweep loop.
async fn sweeper_loop(
    mut sweeper: Sweeper,
    interval: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    loop {
        // Wait for the interval or shutdown signal
        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            result = shutdown_rx.changed() => {
                if result.is_err() || *shutdown_rx.borrow() {
                    debug!("Expiration sweeper received shutdown signal");
                    return;
                }
            }
        }

        let offset = sweeper.offset();
        let stats = sweeper.sweep_pass();

        // The repository layer never logs; surfacing operational problems
        // is this loop's job.
        for (dir, error) in &stats.list_failures {
            warn!(dir = %dir.display(), error = %error, "Failed to list shard directory");
        }

        if stats.files_removed > 0 {
            debug!(
                offset,
                scanned = stats.shards_scanned,
                removed = stats.files_removed,
                "Expired pastes cleaned up"
            );
        }
    }
}

/// Starts the sweeper with default configuration.
///
/// This is a convenience function for simple use cases.
pub fn start_sweeper(layout: StorageLayout) -> SweeperHandle {
    SweeperHandle::start(layout, SweepConfig::default())
}
