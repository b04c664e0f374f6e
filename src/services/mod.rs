// src/services/mod.rs

//! Service layer for the crawler application.
//!
//! This module contains the crawl machinery:
//! - Rate-limited session transport (`CrawlSession`)
//! - Form / submission-target tracking (`forms`)
//! - Jurisdiction discovery (`discovery`)
//! - Result-row extraction (`extract`)
//! - Per-dimension pagination (`PageWalker`)
//! - Cross-dimension deduplication (`Deduplicator`)

mod dedupe;
pub mod discovery;
pub mod extract;
pub mod forms;
mod session;
mod walker;

pub use dedupe::Deduplicator;
pub use session::{CrawlSession, RequestPacer};
pub use walker::{PageWalker, WalkOutcome};
