//! # fadebin - A File-Backed Pastebin Engine With Automatic Expiration
//!
//! fadebin stores short-lived text snippets ("pastes") on the local
//! filesystem, each under a random 16-character hex identifier, and purges
//! them automatically once their time-to-live elapses.
//!
//! ## Features
//!
//! - **Zero infrastructure**: plain files under a sharded directory tree,
//!   no database, no index
//! - **Unguessable identifiers**: 64 bits from the OS CSPRNG double as the
//!   lookup key and access credential
//! - **TTL from a fixed registry**: seven labels from `1h` to `7d`
//! - **Lazy + active expiry**: expired pastes die on read, and a background
//!   sweeper reclaims the ones nobody reads
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                           fadebin                              │
//! │                                                                │
//! │  ┌─────────────┐        ┌─────────────┐                        │
//! │  │   Caller    │───────>│ PasteStore  │                        │
//! │  │ (CLI, HTTP) │  save  │   load      │                        │
//! │  └─────────────┘  load  └──────┬──────┘                        │
//! │                                │                               │
//! │                                ▼                               │
//! │  ┌──────────────────────────────────────────────────────────┐  │
//! │  │                     StorageLayout                        │  │
//! │  │  pastes/00/  pastes/01/  ...  pastes/fe/  pastes/ff/     │  │
//! │  │         <id>_<ttl-label>.txt  =  "<title>\n<body>"       │  │
//! │  └──────────────────────────────────────────────────────────┘  │
//! │                                ▲                               │
//! │                                │                               │
//! │            ┌───────────────────┴───────────────────┐           │
//! │            │               Sweeper                 │           │
//! │            │  rotating 16-shard window, one pass   │           │
//! │            │  per interval (background Tokio task) │           │
//! │            └───────────────────────────────────────┘           │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use fadebin::storage::{start_sweeper, PasteStore, StoreError};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = PasteStore::new("pastes");
//!
//!     // Reclaim unread expired pastes in the background
//!     let _sweeper = start_sweeper(store.layout().clone());
//!
//!     let id = store.save("test", b"hello from the terminal", "1h")?;
//!
//!     match store.load(&id) {
//!         Ok(paste) => println!("{}\n{:?}", paste.title, paste.body),
//!         Err(StoreError::NotFound | StoreError::Expired) => println!("gone"),
//!         Err(e) => return Err(e.into()),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Overview
//!
//! - [`paste`]: The paste entity, identifier generation, and the TTL registry
//! - [`storage`]: Sharded layout, save/load repository, background sweeper
//!
//! ## Design Highlights
//!
//! ### The filesystem is the database
//!
//! A paste is one file; its identifier picks one of 256 shard directories
//! via its first two hex characters, which bounds every lookup to a scan of
//! a small directory. The TTL label is carried in the filename and the
//! creation time is the file's mtime - nothing is stored twice.
//!
//! ### Lazy + Active Expiry
//!
//! Pastes with elapsed TTLs are removed in two ways:
//! 1. **Lazy**: every load checks the deadline and deletes expired files
//!    on the spot, so stale content is never served
//! 2. **Active**: a background task sweeps a rotating window of shard
//!    directories and deletes what nobody reads
//!
//! ### Write-once, no coordination
//!
//! Every save writes a fresh, uniquely named file, so concurrent saves never
//! contend and no locks exist anywhere. A load racing a sweeper deletion
//! simply reports a miss.

pub mod paste;
pub mod storage;

// Re-export commonly used types for convenience
pub use paste::{Paste, Ttl};
pub use storage::{
    start_sweeper, PasteStore, StorageLayout, StoreError, StoreResult, SweepConfig, Sweeper,
    SweeperHandle,
};

/// The default storage root, relative to the working directory.
pub const DEFAULT_STORAGE_ROOT: &str = "pastes";

/// Version of fadebin
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
