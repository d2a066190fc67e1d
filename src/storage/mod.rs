//! Storage Module
//!
//! Everything that touches the filesystem lives here: the sharded layout,
//! the paste repository with its lazy expiration check, and the background
//! expiration sweeper.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      PasteStore                          │
//! │   save ──> fresh id ──> <root>/<id[..2]>/<id>_<ttl>.txt  │
//! │   load ──> shard scan ──> lazy expiry check ──> Paste    │
//! └────────────────────────────┬─────────────────────────────┘
//!                              │
//!                       StorageLayout
//!                   (256 shard directories)
//!                              ▲
//!                              │
//!               ┌──────────────┴──────────────┐
//!               │         Sweeper             │
//!               │  (rotating 16-shard window, │
//!               │   background Tokio task)    │
//!               └─────────────────────────────┘
//! ```
//!
//! ## Expiration happens twice
//!
//! - **Lazy**: every load checks the deadline and deletes on the spot, so
//!   expired content is never observable regardless of sweep timing.
//! - **Active**: the sweeper reclaims disk for pastes nobody reads.
//!
//! Both paths compute the deadline the same way: file mtime plus the TTL
//! parsed from the filename.
//!
//! ## Example
//!
//! ```no_run
//! use fadebin::storage::{start_sweeper, PasteStore};
//!
//! #[tokio::main]
//! async fn main() -> fadebin::storage::StoreResult<()> {
//!     let store = PasteStore::new("pastes");
//!     let _sweeper = start_sweeper(store.layout().clone());
//!
//!     let id = store.save("test", b"hello from the terminal", "1h")?;
//!     let paste = store.load(&id)?;
//!     assert_eq!(paste.title, "test");
//!     Ok(())
//! }
//! ```

pub mod layout;
pub mod repository;
pub mod sweeper;

// Re-export commonly used types
pub use layout::{parse_filename, StorageLayout, PASTE_EXT, SHARD_COUNT};
pub use repository::{PasteStore, StoreError, StoreResult};
pub use sweeper::{start_sweeper, SweepConfig, SweepStats, Sweeper, SweeperHandle, SHARDS_PER_PASS};
