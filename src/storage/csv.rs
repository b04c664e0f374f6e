// src/storage/csv.rs

//! CSV file sink.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{FIELD_NAMES, ResultRecord};
use crate::storage::{RecordSink, WriteSummary};

/// Writes records as comma-separated values with a schema header row.
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl RecordSink for CsvSink {
    async fn write_records(&self, records: &[ResultRecord]) -> Result<WriteSummary> {
        let mut out = String::new();
        write_row(&mut out, FIELD_NAMES.iter().copied());
        for record in records {
            write_row(&mut out, record.to_row().iter().map(String::as_str));
        }

        tokio::fs::write(&self.path, out.as_bytes()).await?;

        Ok(WriteSummary {
            record_count: records.len(),
            location: self.path.display().to_string(),
        })
    }
}

fn write_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>) {
    let mut first = true;
    for cell in cells {
        if !first {
            out.push(',');
        }
        first = false;

        if needs_quotes(cell) {
            out.push('"');
            out.push_str(&cell.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(cell);
        }
    }
    out.push_str("\r\n");
}

fn needs_quotes(cell: &str) -> bool {
    cell.contains(',') || cell.contains('"') || cell.contains('\n') || cell.contains('\r')
}
