//! Corpus snapshot loading
//!
//! The corpus is embedded and indexed by an external ingestion pipeline; this
//! crate consumes its output: a JSON-lines snapshot of pre-embedded papers
//! loaded once at engine startup.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::index::VectorIndex;
use crate::types::{Paper, PaperMetadata};

/// One pre-embedded paper in a snapshot file
#[derive(Debug, Deserialize)]
pub struct SnapshotRecord {
    /// Paper identifier
    pub id: String,
    /// Pre-computed embedding; must match the index dimensionality
    pub embedding: Vec<f32>,
    /// Raw text body
    pub document_text: String,
    /// Bibliographic metadata
    #[serde(default)]
    pub metadata: PaperMetadata,
}

/// Load a JSON-lines snapshot into the index. Blank lines are skipped;
/// malformed lines and dimension mismatches abort the load with the offending
/// line number. Returns the number of papers loaded.
pub fn load_snapshot(index: &VectorIndex, path: &Path) -> Result<usize> {
    let file = File::open(path)
        .map_err(|e| Error::index(format!("cannot open snapshot {}: {}", path.display(), e)))?;
    let reader = BufReader::new(file);

    let mut loaded = 0usize;
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: SnapshotRecord = serde_json::from_str(&line)
            .map_err(|e| Error::index(format!("snapshot line {}: {}", line_no + 1, e)))?;
        let paper = Paper::new(record.id, record.document_text, record.metadata);
        index.upsert(paper, record.embedding).map_err(|e| {
            Error::index(format!("snapshot line {}: {}", line_no + 1, e))
        })?;
        loaded += 1;
    }

    Ok(loaded)
}
