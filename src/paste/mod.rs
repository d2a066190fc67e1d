//! Paste Domain Module
//!
//! This module defines the paste entity and the two small value domains it
//! depends on: random identifiers and the fixed TTL registry.
//!
//! ## Overview
//!
//! - `types`: The [`Paste`] entity itself
//! - `id`: Random 16-character hex identifiers and boundary validation
//! - `ttl`: The fixed set of supported TTL labels and their durations
//!
//! ## Example
//!
//! ```
//! use fadebin::paste::{id, Ttl};
//!
//! // Fresh identifiers are always 16 lowercase hex characters
//! let paste_id = id::generate();
//! assert!(id::is_valid(&paste_id));
//!
//! // TTL labels resolve through the registry; anything else is invalid
//! assert_eq!(Ttl::from_label("1h"), Some(Ttl::OneHour));
//! assert_eq!(Ttl::from_label("2h"), None);
//! ```

pub mod id;
pub mod ttl;
pub mod types;

// Re-export commonly used types for convenience
pub use ttl::Ttl;
pub use types::Paste;
