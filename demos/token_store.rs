//! Example: Storing a long token in parts.
//!
//! Run with: cargo run --example token_store
//!
//! Uses an in-memory store limited to 500 characters per value. With the
//! `keyring` feature, `KeyringStore` can be used in its place.

use std::sync::Arc;

use moex_api_client::MoexClient;
use moex_api_client::auth::{ChunkedTokenStore, DEFAULT_SERVICE, DEFAULT_USERNAME, MemoryStore, SecretStore};
use secrecy::ExposeSecret;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let store = Arc::new(MemoryStore::with_max_value_len(500));
    let token = "x".repeat(1300);

    // Supplying a token saves it.
    let client = MoexClient::builder()
        .secret_store(store.clone())
        .token(token.clone())
        .build();
    println!("Client has token: {}", client.has_token());
    println!("Stored parts: {}", store.len());
    for index in 0..store.len() {
        let key = format!("{DEFAULT_USERNAME}{index}");
        let part = store.get(DEFAULT_SERVICE, &key)?.unwrap_or_default();
        println!("  {key}: {} characters", part.len());
    }

    // Omitting it loads it back.
    let client = MoexClient::builder().secret_store(store.clone()).build();
    println!("Reloaded client has token: {}", client.has_token());

    let chunked = ChunkedTokenStore::new(store.clone());
    let loaded = chunked.load(DEFAULT_SERVICE, DEFAULT_USERNAME).ok_or("token missing")?;
    println!("Round trip intact: {}", loaded.expose_secret() == token);

    chunked.clear(DEFAULT_SERVICE, DEFAULT_USERNAME);
    println!("Parts after clear: {}", store.len());

    Ok(())
}
