//! Sharded On-Disk Layout
//!
//! This module owns the mapping between a paste identifier and a filesystem
//! path, and nothing else. The layout is deliberately simple:
//!
//! ```text
//! <root>/
//!   a1/
//!     a1b2c3d4e5f60718_1h.txt      <- <id>_<ttl-label>.txt
//!   ff/
//!     ffe0114c22aa90d3_7d.txt
//! ```
//!
//! The first two hex characters of the identifier select one of 256 shard
//! directories (`00` through `ff`), bounding how many entries any single
//! directory scan has to touch.
//!
//! ## Filename as metadata
//!
//! The TTL label appears only in the filename, never in the file content.
//! The filename is load-bearing: renaming a paste file loses its TTL
//! permanently.
//!
//! ## Lookup by scan
//!
//! A reader holds only the identifier, not the TTL, so the read path cannot
//! compute the exact filename. Resolution scans the shard directory for a
//! `<id>_*.txt` match instead of maintaining a separate index - each shard
//! holds a small bounded fraction of all pastes, and there is no durable
//! index to keep consistent.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::paste::{id, Ttl};

/// Number of shard directories under the storage root.
pub const SHARD_COUNT: usize = 256;

/// Filename extension for paste records.
pub const PASTE_EXT: &str = ".txt";

/// Maps identifiers to paths under a configurable storage root.
///
/// `StorageLayout` performs no I/O except directory creation and the shard
/// scan in [`resolve`](StorageLayout::resolve); reading and writing records
/// is the repository's job.
#[derive(Debug, Clone)]
pub struct StorageLayout {
    root: PathBuf,
}

impl StorageLayout {
    /// Creates a layout rooted at the given directory.
    ///
    /// The root itself is not created here; shard directories appear lazily
    /// on the first save that needs them.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The storage root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The shard directory holding the given identifier.
    pub fn shard_dir(&self, paste_id: &str) -> PathBuf {
        self.root.join(id::shard_prefix(paste_id))
    }

    /// The shard directory for a numeric shard index (`0..SHARD_COUNT`).
    ///
    /// Indices wrap, so the sweeper can pass a running offset without
    /// reducing it modulo [`SHARD_COUNT`] first.
    pub fn shard_dir_by_index(&self, index: usize) -> PathBuf {
        self.root.join(format!("{:02x}", index % SHARD_COUNT))
    }

    /// The full path a paste with this identifier and TTL is written to.
    pub fn paste_path(&self, paste_id: &str, ttl: Ttl) -> PathBuf {
        self.shard_dir(paste_id)
            .join(format!("{}_{}{}", paste_id, ttl.label(), PASTE_EXT))
    }

    /// Creates the shard directory for an identifier. Idempotent.
    pub fn ensure_shard_dir(&self, paste_id: &str) -> io::Result<PathBuf> {
        let dir = self.shard_dir(paste_id);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Resolves an identifier to its stored file by scanning the shard
    /// directory for a `<id>_*.txt` entry.
    ///
    /// Returns `Ok(None)` when no file matches or the shard directory does
    /// not exist yet. If several files match (an invariant violation, since
    /// pastes are write-once), the first one in directory order wins.
    pub fn resolve(&self, paste_id: &str) -> io::Result<Option<PathBuf>> {
        let dir = self.shard_dir(paste_id);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };

        let prefix = format!("{}_", paste_id);
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            if let Some(name) = name.to_str() {
                if name.starts_with(&prefix) && name.ends_with(PASTE_EXT) {
                    return Ok(Some(entry.path()));
                }
            }
        }

        Ok(None)
    }
}

/// Splits a paste filename into its identifier and TTL label.
///
/// Accepts exactly `<id>_<label>.txt` with a single underscore; anything
/// else (missing extension, extra underscores, empty segments) is not a
/// paste record and yields `None`. The label is *not* checked against the
/// TTL registry here - the load path treats an unknown label as corruption
/// while the sweeper skips it, so that decision stays with the caller.
pub fn parse_filename(name: &str) -> Option<(&str, &str)> {
    let stem = name.strip_suffix(PASTE_EXT)?;
    let (paste_id, label) = stem.split_once('_')?;
    if paste_id.is_empty() || label.is_empty() || label.contains('_') {
        return None;
    }
    Some((paste_id, label))
}
