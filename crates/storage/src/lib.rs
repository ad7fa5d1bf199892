//! Storage abstraction and implementations for OKR Pulse.
//!
//! This crate provides a trait-based interface to the objectives and tasks
//! the progress engine evaluates, with a JSON-directory backend and an
//! in-memory backend.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;
pub mod memory;

pub use trait_::{Storage, StorageError, Result};
pub use json_storage::JsonStorage;
pub use memory::MemoryStorage;
