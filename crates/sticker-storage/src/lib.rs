//! Issued-code registry backends.
//!
//! [`MySqlRegistry`] is the durable backend used by the batch job.
//! [`InMemoryStore`] mirrors its namespace/collection model in memory for
//! tests; it is never substituted for an unavailable durable store.

pub mod memory;
pub mod mysql;

pub use memory::{InMemoryRegistry, InMemoryStore};
pub use mysql::{MySqlRegistry, RegistrySettings};
pub use sticker_core::{IssuedCode, Registry, RegistryError};
