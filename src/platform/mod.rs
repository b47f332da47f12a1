//! Platform abstraction layer
//!
//! Handles browser/native differences for persistent key-value storage:
//! LocalStorage on web, an in-memory map everywhere else (tests, headless
//! runs).

pub mod storage;

pub use storage::KeyValueStore;
