//! Minimal PAF handling for whole-genome alignment output.
//!
//! Only the twelve mandatory PAF columns are modeled. Optional SAM-style
//! tags after column twelve are ignored, and lines that do not carry twelve
//! well-formed fields are dropped.

use std::path::Path;

use serde::Serialize;

use crate::Result;

/// Column order of the CSV export, matching [`PafRecord`] field order.
pub const EXPORT_HEADER: [&str; 12] = [
    "query_id",
    "query_len",
    "query_start",
    "query_end",
    "strand",
    "ref_id",
    "ref_len",
    "ref_start",
    "ref_end",
    "match_len",
    "block_len",
    "mapq",
];

/// One mapping from the mandatory PAF columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PafRecord {
    pub query_id: String,
    pub query_len: u64,
    pub query_start: u64,
    pub query_end: u64,
    pub strand: char,
    pub ref_id: String,
    pub ref_len: u64,
    pub ref_start: u64,
    pub ref_end: u64,
    pub match_len: u64,
    pub block_len: u64,
    pub mapq: u32,
}

impl PafRecord {
    /// Parse one PAF line. Returns `None` for lines with fewer than twelve
    /// fields or with non-numeric text where a number is required.
    pub fn parse(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 12 {
            return None;
        }
        Some(Self {
            query_id: fields[0].to_string(),
            query_len: fields[1].parse().ok()?,
            query_start: fields[2].parse().ok()?,
            query_end: fields[3].parse().ok()?,
            strand: fields[4].parse().ok()?,
            ref_id: fields[5].to_string(),
            ref_len: fields[6].parse().ok()?,
            ref_start: fields[7].parse().ok()?,
            ref_end: fields[8].parse().ok()?,
            match_len: fields[9].parse().ok()?,
            block_len: fields[10].parse().ok()?,
            mapq: fields[11].parse().ok()?,
        })
    }
}

/// Project raw PAF text into records, dropping malformed lines.
pub fn project(paf_text: &str) -> Vec<PafRecord> {
    paf_text.lines().filter_map(PafRecord::parse).collect()
}

/// Write records to a CSV file with a single header row.
///
/// The header is written even when there are no records, so an empty
/// alignment still produces a well-formed export.
pub fn write_export(path: &Path, records: &[PafRecord]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(EXPORT_HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
