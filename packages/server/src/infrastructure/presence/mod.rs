//! Presence repository implementations.

pub mod inmemory;

pub use inmemory::InMemoryPresenceRepository;
