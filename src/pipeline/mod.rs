// src/pipeline/mod.rs

//! Pipeline entry points for crawler operations.

pub mod crawl;

pub use crawl::{CrawlOutcome, run_crawl};
