// src/cache/mod.rs

//! Response cache keyed by query fingerprints.
//!
//! Entries never expire: a cached response is served for the remainder of
//! the process. An unreachable backend degrades to permanent miss so the
//! crawl behaves identically either way, just slower.

pub mod memcached;

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::error::Result;

pub use memcached::MemcacheClient;

/// Deterministic hash of a key-value parameter set. Pairs are sorted before
/// hashing, so permutations of the same set produce the same fingerprint.
pub fn fingerprint(params: &[(String, String)]) -> String {
    let mut pairs: Vec<&(String, String)> = params.iter().collect();
    pairs.sort();

    let mut hasher = Sha256::new();
    for (key, value) in pairs {
        hasher.update(key.as_bytes());
        hasher.update([0u8]);
        hasher.update(value.as_bytes());
        hasher.update([0u8]);
    }
    hex::encode(hasher.finalize())
}

/// A simple key → text store.
#[async_trait]
pub trait CacheBackend: Send {
    async fn fetch(&mut self, key: &str) -> Result<Option<String>>;
    async fn store(&mut self, key: &str, value: &str) -> Result<()>;
}

/// The crawl's response cache. Backend errors are logged and treated as
/// misses; they never fail a request.
pub struct ResponseCache {
    backend: Option<Box<dyn CacheBackend>>,
}

impl ResponseCache {
    /// Probe the configured backend address; fall back to cache-less
    /// operation when nothing is listening.
    pub async fn connect(addr: &str) -> Self {
        match MemcacheClient::connect(addr).await {
            Ok(client) => {
                log::info!("using response cache at {addr}");
                Self {
                    backend: Some(Box::new(client)),
                }
            }
            Err(e) => {
                log::info!("no response cache at {addr} ({e}), crawling uncached");
                Self::disabled()
            }
        }
    }

    /// A cache that always misses.
    pub fn disabled() -> Self {
        Self { backend: None }
    }

    /// A cache over an explicit backend.
    pub fn with_backend(backend: Box<dyn CacheBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    pub async fn get(&mut self, key: &str) -> Option<String> {
        let backend = self.backend.as_mut()?;
        match backend.fetch(key).await {
            Ok(hit) => hit,
            Err(e) => {
                log::warn!("cache fetch failed for {key}: {e}");
                None
            }
        }
    }

    pub async fn put(&mut self, key: &str, body: &str) {
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        if let Err(e) = backend.store(key, body).await {
            log::warn!("cache store failed for {key}: {e}");
        }
    }
}
