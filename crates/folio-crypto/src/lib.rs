//! Content hashing for Folio.
//!
//! Digests are domain-separated BLAKE3 hashes. Wrapping an established
//! hash keeps storage keys wide and stable across runs, which a native
//! in-memory hash does not guarantee.

pub mod hasher;

pub use hasher::{ContentHasher, HasherError};
