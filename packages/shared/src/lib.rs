//! Utilities shared across the Kaiwa packages.

pub mod logger;
pub mod time;
