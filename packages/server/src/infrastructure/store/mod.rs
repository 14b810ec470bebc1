//! Message store implementations.
//!
//! - `inmemory`: process-local store, history is lost on restart

pub mod inmemory;

pub use inmemory::InMemoryMessageStore;
