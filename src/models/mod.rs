// src/models/mod.rs

//! Domain models for the crawler application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod dimension;
mod query;
mod record;

// Re-export all public types
pub use config::{Config, CrawlerConfig, SearchConfig};
pub use dimension::{Dimension, DimensionKind};
pub use query::PageQuery;
pub use record::{FIELD_NAMES, ResultRecord};
