//! Foundation types for Folio.
//!
//! Every other Folio crate depends on `folio-types`. The central type is
//! [`Digest`], the content-derived key under which a stored value lives on
//! disk.

pub mod digest;
pub mod error;

pub use digest::Digest;
pub use error::TypeError;
