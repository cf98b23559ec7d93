//! Source catalog implementations
//!
//! [`JsonCatalog`] reads a library export written by the reference manager.
//! Other catalogs only need to implement [`crate::adapters::SourceCatalog`].

pub mod json;

pub use json::JsonCatalog;
