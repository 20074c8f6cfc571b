//! Bearer token persistence split across indexed keys.
//!
//! ALGOPACK tokens are longer than platform credential stores accept in one
//! value, so the token is stored in parts under `<username>0`, `<username>1`, ...
//! and reassembled in index order.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error};

use crate::auth::store::SecretStore;
use crate::error::StoreError;

/// Default service name for the stored token.
pub const DEFAULT_SERVICE: &str = "MOEXPy";

/// Default username prefix for the stored token parts.
pub const DEFAULT_USERNAME: &str = "token";

/// Default maximum length of one stored part, in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Stores a long token as a sequence of fixed-size parts.
///
/// Store failures are logged and never returned: `load` yields `None` and
/// `save`/`clear` do nothing further.
#[derive(Clone)]
pub struct ChunkedTokenStore {
    store: Arc<dyn SecretStore>,
}

impl ChunkedTokenStore {
    /// Wrap a secret store backend.
    pub fn new(store: Arc<dyn SecretStore>) -> Self {
        Self { store }
    }

    /// Reassemble the token from its parts.
    pub fn load(&self, service: &str, username: &str) -> Option<SecretString> {
        match self.try_load(service, username) {
            Ok(Some(token)) => {
                debug!("Token loaded from the credential store");
                Some(token)
            }
            Ok(None) => {
                error!(
                    service,
                    username,
                    "Token not found in the credential store. Pass the token when building the client"
                );
                None
            }
            Err(e) => {
                error!(service, username, error = %e, "Failed to load token from the credential store");
                None
            }
        }
    }

    /// Replace the stored token, splitting it into parts of `chunk_size` characters.
    pub fn save(&self, service: &str, username: &str, token: &SecretString, chunk_size: usize) {
        match self.try_save(service, username, token, chunk_size) {
            Ok(parts) => debug!(service, username, parts, "Token saved to the credential store"),
            Err(e) => {
                error!(service, username, error = %e, "Failed to save token to the credential store")
            }
        }
    }

    /// Delete every stored part of the token.
    pub fn clear(&self, service: &str, username: &str) {
        if let Err(e) = self.try_clear(service, username) {
            error!(service, username, error = %e, "Failed to clear token from the credential store");
        }
    }

    fn try_load(&self, service: &str, username: &str) -> Result<Option<SecretString>, StoreError> {
        let mut token = String::new();
        let mut index = 0;
        while let Some(part) = self.store.get(service, &part_key(username, index))? {
            token.push_str(&part);
            index += 1;
        }
        if index == 0 {
            return Ok(None);
        }
        Ok(Some(SecretString::from(token)))
    }

    fn try_save(
        &self,
        service: &str,
        username: &str,
        token: &SecretString,
        chunk_size: usize,
    ) -> Result<usize, StoreError> {
        self.try_clear(service, username)?;
        let parts = split_token(token.expose_secret(), chunk_size);
        for (index, part) in parts.iter().enumerate() {
            self.store.set(service, &part_key(username, index), part)?;
        }
        Ok(parts.len())
    }

    fn try_clear(&self, service: &str, username: &str) -> Result<usize, StoreError> {
        let mut index = 0;
        loop {
            let key = part_key(username, index);
            if self.store.get(service, &key)?.is_none() {
                return Ok(index);
            }
            self.store.delete(service, &key)?;
            index += 1;
        }
    }
}

impl std::fmt::Debug for ChunkedTokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkedTokenStore").finish_non_exhaustive()
    }
}

fn part_key(username: &str, index: usize) -> String {
    format!("{username}{index}")
}

/// Split on character boundaries so multi-byte input never produces invalid parts.
fn split_token(token: &str, chunk_size: usize) -> Vec<String> {
    let chars: Vec<char> = token.chars().collect();
    chars
        .chunks(chunk_size.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}
