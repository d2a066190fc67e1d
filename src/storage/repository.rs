//! Paste Repository
//!
//! This module implements the save and load operations against the sharded
//! on-disk layout, including the lazy expiration check that runs on every
//! read.
//!
//! ## Write path
//!
//! ```text
//! save(title, body, "1h")
//!       │
//!       ▼
//! TTL registry lookup ──── unknown label ──> InvalidTtl
//!       │
//!       ▼
//! generate fresh id, create shard dir
//!       │
//!       ▼
//! write "<title>\n<body>" (create/truncate, mode 0600)
//!       │
//!       ▼
//! sync to disk, return id
//! ```
//!
//! ## Read path
//!
//! ```text
//! load(id)
//!       │
//!       ▼
//! scan shard dir for <id>_*.txt ──── no match ──> NotFound
//!       │
//!       ▼
//! mtime + TTL from filename ──── unknown label ──> Corrupt
//!       │
//!       ▼
//! expired? ── yes ──> delete file, Expired
//!       │
//!       ▼
//! split at first newline ──── no newline ──> Corrupt
//!       │
//!       ▼
//! Paste { id, title, body, ttl }
//! ```
//!
//! Expiration is enforced here independently of the background sweeper: even
//! if the sweeper has not reached a shard yet, no caller can observe expired
//! content.
//!
//! ## What the repository does not do
//!
//! - No retries: a write or flush failure surfaces verbatim.
//! - No identifier format validation: callers gate externally supplied ids
//!   with [`crate::paste::id::is_valid`] before calling [`PasteStore::load`].
//! - No logging: the repository signals conditions through [`StoreError`];
//!   deciding what is log-worthy is the caller's job.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::SystemTime;

use bytes::Bytes;
use thiserror::Error;

use crate::paste::{id, Paste, Ttl};
use crate::storage::layout::{self, StorageLayout};

/// Errors produced by the paste repository.
///
/// `NotFound` and `Expired` are expected, frequent outcomes - both present
/// as a plain miss to end users. `Corrupt` and `Io` indicate an environment
/// problem (disk, permissions, manual tampering) worth logging upstream.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The supplied TTL label is not in the registry.
    #[error("invalid ttl label: {0:?}")]
    InvalidTtl(String),

    /// No stored record matches the identifier.
    #[error("paste not found")]
    NotFound,

    /// The record existed but its TTL has elapsed. The backing file has
    /// been removed as a side effect.
    #[error("paste expired")]
    Expired,

    /// A matching file exists but its name or content cannot be parsed
    /// into a valid paste.
    #[error("corrupt paste record: {0}")]
    Corrupt(String),

    /// Underlying filesystem failure, surfaced verbatim.
    #[error("storage error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for repository operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persists and retrieves pastes through the sharded layout.
///
/// The store holds no in-memory state and no locks: every operation reads
/// or writes the filesystem directly, and concurrent saves never contend
/// because each writes a fresh, uniquely named file.
///
/// # Example
///
/// ```no_run
/// use fadebin::storage::PasteStore;
///
/// # fn main() -> fadebin::storage::StoreResult<()> {
/// let store = PasteStore::new("pastes");
///
/// let id = store.save("test", b"hello from the terminal", "1h")?;
/// let paste = store.load(&id)?;
/// assert_eq!(paste.title, "test");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PasteStore {
    layout: StorageLayout,
}

impl PasteStore {
    /// Creates a store over the given storage root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            layout: StorageLayout::new(root),
        }
    }

    /// The layout this store reads and writes through.
    pub fn layout(&self) -> &StorageLayout {
        &self.layout
    }

    /// Stores a new paste and returns its fresh identifier.
    ///
    /// The record is flushed durably before this returns: a crash
    /// immediately after a successful save does not lose the paste.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidTtl`] when the label is not in the registry
    /// - [`StoreError::Io`] on any write or flush failure (no retries)
    pub fn save(&self, title: &str, body: &[u8], ttl_label: &str) -> StoreResult<String> {
        let ttl = Ttl::from_label(ttl_label)
            .ok_or_else(|| StoreError::InvalidTtl(ttl_label.to_string()))?;

        let paste_id = id::generate();
        self.layout.ensure_shard_dir(&paste_id)?;
        let path = self.layout.paste_path(&paste_id, ttl);

        let mut options = OpenOptions::new();
        options.create(true).write(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&path)?;
        file.write_all(title.as_bytes())?;
        file.write_all(b"\n")?;
        file.write_all(body)?;
        file.sync_all()?;

        Ok(paste_id)
    }

    /// Loads a paste by identifier, enforcing expiration.
    ///
    /// The identifier is assumed syntactically valid; callers gate external
    /// input with [`crate::paste::id::is_valid`] first.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] when no record matches (including a record
    ///   deleted out from under us by a concurrent sweep)
    /// - [`StoreError::Expired`] when the TTL has elapsed; the file is
    ///   removed before returning
    /// - [`StoreError::Corrupt`] when the filename carries an unknown TTL
    ///   label or the content has no title separator
    pub fn load(&self, paste_id: &str) -> StoreResult<Paste> {
        let path = match self.layout.resolve(paste_id)? {
            Some(path) => path,
            None => return Err(StoreError::NotFound),
        };

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let (_, label) = layout::parse_filename(name)
            .ok_or_else(|| StoreError::Corrupt(format!("unparsable filename {:?}", name)))?;
        let ttl = Ttl::from_label(label)
            .ok_or_else(|| StoreError::Corrupt(format!("unknown ttl label {:?}", label)))?;

        // The file's mtime is the authoritative creation time; nothing in
        // the record duplicates it.
        let created_at = match fs::metadata(&path) {
            Ok(meta) => meta.modified()?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(StoreError::NotFound),
            Err(e) => return Err(e.into()),
        };

        if SystemTime::now() > ttl.expires_at(created_at) {
            // Best-effort cleanup; a concurrent sweep may already have won.
            let _ = fs::remove_file(&path);
            return Err(StoreError::Expired);
        }

        let content = match fs::read(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(StoreError::NotFound),
            Err(e) => return Err(e.into()),
        };

        let split = content
            .iter()
            .position(|&b| b == b'\n')
            .ok_or_else(|| StoreError::Corrupt("record missing title separator".to_string()))?;
        let title = std::str::from_utf8(&content[..split])
            .map_err(|_| StoreError::Corrupt("title is not valid utf-8".to_string()))?
            .to_string();
        let body = Bytes::copy_from_slice(&content[split + 1..]);

        Ok(Paste {
            id: paste_id.to_string(),
            title,
            body,
            ttl,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::Duration;
    use tempfile::TempDir;

    fn store() -> (TempDir, PasteStore) {
        let dir = TempDir::new().unwrap();
        let store = PasteStore::new(dir.path());
        (dir, store)
    }

    /// Rewinds a stored file's mtime by `age`, making the paste look older.
    fn backdate(store: &PasteStore, paste_id: &str, age: Duration) {
        let path = store.layout().resolve(paste_id).unwrap().unwrap();
        let file = File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() - age).unwrap();
    }

    #[test]
    fn test_save_load_round_trip() {
        let (_dir, store) = store();

        let paste_id = store
            .save("test", b"hello from the terminal", "1h")
            .unwrap();
        assert!(id::is_valid(&paste_id));

        let paste = store.load(&paste_id).unwrap();
        assert_eq!(paste.id, paste_id);
        assert_eq!(paste.title, "test");
        assert_eq!(paste.body, Bytes::from_static(b"hello from the terminal"));
        assert_eq!(paste.ttl, Ttl::OneHour);
    }

    #[test]
    fn test_save_writes_expected_path_and_encoding() {
        let (dir, store) = store();

        let paste_id = store.save("test", b"hello", "1h").unwrap();
        let path = dir
            .path()
            .join(&paste_id[..2])
            .join(format!("{}_1h.txt", paste_id));
        assert_eq!(fs::read(&path).unwrap(), b"test\nhello");
    }

    #[test]
    fn test_save_rejects_unknown_ttl() {
        let (_dir, store) = store();

        let err = store.save("t", b"b", "2h").unwrap_err();
        assert!(matches!(err, StoreError::InvalidTtl(label) if label == "2h"));
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let (_dir, store) = store();
        assert!(matches!(
            store.load("a1b2c3d4e5f60718"),
            Err(StoreError::NotFound)
        ));
    }

    #[test]
    fn test_load_expired_removes_file() {
        let (_dir, store) = store();

        let paste_id = store.save("t", b"b", "1h").unwrap();
        backdate(&store, &paste_id, Duration::from_secs(2 * 3600));

        assert!(matches!(store.load(&paste_id), Err(StoreError::Expired)));
        // The lazy path deleted the file, so the next load is a plain miss.
        assert!(matches!(store.load(&paste_id), Err(StoreError::NotFound)));
        assert_eq!(store.layout().resolve(&paste_id).unwrap(), None);
    }

    #[test]
    fn test_load_before_deadline_succeeds() {
        let (_dir, store) = store();

        let paste_id = store.save("t", b"still here", "3h").unwrap();
        backdate(&store, &paste_id, Duration::from_secs(2 * 3600));

        let paste = store.load(&paste_id).unwrap();
        assert_eq!(paste.body, Bytes::from_static(b"still here"));
    }

    #[test]
    fn test_load_unknown_label_is_corrupt() {
        let (dir, store) = store();

        // A syntactically fine record whose label never was in the registry.
        let shard = dir.path().join("de");
        fs::create_dir_all(&shard).unwrap();
        fs::write(shard.join("deadbeefdeadbeef_2h.txt"), "t\nb").unwrap();

        assert!(matches!(
            store.load("deadbeefdeadbeef"),
            Err(StoreError::Corrupt(_))
        ));
    }

    #[test]
    fn test_load_without_separator_is_corrupt() {
        let (dir, store) = store();

        let shard = dir.path().join("de");
        fs::create_dir_all(&shard).unwrap();
        fs::write(shard.join("deadbeefdeadbeef_1h.txt"), "no newline here").unwrap();

        assert!(matches!(
            store.load("deadbeefdeadbeef"),
            Err(StoreError::Corrupt(_))
        ));
    }

    #[test]
    fn test_body_newlines_preserved() {
        let (_dir, store) = store();

        let body = b"line one\nline two\n\nline four";
        let paste_id = store.save("multi", body, "24h").unwrap();

        let paste = store.load(&paste_id).unwrap();
        assert_eq!(paste.body, Bytes::from_static(body));
    }

    #[test]
    fn test_empty_body_round_trips() {
        let (_dir, store) = store();

        let paste_id = store.save("only a title", b"", "7d").unwrap();
        let paste = store.load(&paste_id).unwrap();
        assert_eq!(paste.title, "only a title");
        assert!(paste.body.is_empty());
    }

    #[test]
    fn test_saves_never_collide_on_path() {
        let (_dir, store) = store();

        let a = store.save("a", b"1", "1h").unwrap();
        let b = store.save("b", b"2", "1h").unwrap();
        assert_ne!(a, b);
        assert_eq!(store.load(&a).unwrap().body, Bytes::from_static(b"1"));
        assert_eq!(store.load(&b).unwrap().body, Bytes::from_static(b"2"));
    }
}
