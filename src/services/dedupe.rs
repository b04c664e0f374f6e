// src/services/dedupe.rs

//! Cross-dimension record deduplication.
//!
//! Jurisdiction filters overlap, so the same finisher can surface in more
//! than one dimension's result set. Equality is over every schema field.

use std::collections::HashSet;

use crate::models::ResultRecord;

/// Suppresses blank records and exact repeats, preserving first-seen
/// order. Runs as the final stage over the whole crawl.
#[derive(Default)]
pub struct Deduplicator {
    seen: HashSet<ResultRecord>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the record has not been seen before and is worth keeping.
    pub fn accept(&mut self, record: &ResultRecord) -> bool {
        if record.is_blank() {
            return false;
        }
        self.seen.insert(record.clone())
    }
}
