//! Repository and service layer over the document core.
//!
//! Documents live behind an explicit store interface with
//! create/update/delete operations returning immutable snapshots; callers
//! never hold a live reference into shared state. The [`BackOffice`]
//! service orchestrates the pure domain crates (pricing, documents,
//! packages, orders) on top of those stores.

pub mod memory;
pub mod service;

pub use memory::{InMemoryStore, SnapshotStore};
pub use service::BackOffice;
