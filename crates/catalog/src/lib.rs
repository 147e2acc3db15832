//! Catalog boundary records.
//!
//! The product catalog is an external collaborator; only its record shape
//! matters here. `ProductRef` is the read-only snapshot a package or line
//! item embeds when it references a catalog entry.

pub mod product;

pub use product::ProductRef;
