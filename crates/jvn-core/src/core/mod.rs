//! Internal implementation modules for `jvn-core`.
//!
//! Callers go through the re-exports in the crate root.

pub mod api;
pub mod commit;
pub mod conda;
pub mod config;
pub mod manifest;
pub mod net;
pub mod runtime;
pub mod tooling;

#[cfg(test)]
pub(crate) mod testing;
