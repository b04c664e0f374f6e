// src/storage/mod.rs

//! Output sinks for crawled result records.

pub mod csv;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::ResultRecord;

// Re-export for convenience
pub use csv::CsvSink;

/// Metadata about a completed write.
#[derive(Debug, Clone)]
pub struct WriteSummary {
    /// Number of records written
    pub record_count: usize,

    /// Where they landed
    pub location: String,
}

/// Trait for record output backends.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Write the final deduplicated record sequence.
    async fn write_records(&self, records: &[ResultRecord]) -> Result<WriteSummary>;
}
