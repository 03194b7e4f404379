//! Job status storage.
//!
//! This crate provides:
//! - The [`JobStore`] trait used by the API and the assembler
//! - An in-memory implementation backed by a `tokio` `RwLock`

pub mod error;
pub mod memory;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryJobStore;
pub use store::JobStore;
