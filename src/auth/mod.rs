//! Authentication module for the MOEX API.
//!
//! This module provides:
//! - Secret store backends for persisting the bearer token
//! - Chunked token storage for stores with a value length limit

mod store;
mod token;

#[cfg(feature = "keyring")]
pub use store::KeyringStore;
pub use store::{MemoryStore, SecretStore};
pub use token::{ChunkedTokenStore, DEFAULT_CHUNK_SIZE, DEFAULT_SERVICE, DEFAULT_USERNAME};
