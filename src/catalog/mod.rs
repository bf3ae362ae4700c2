//! The code-chunk catalog written by the `catalog` command.

pub mod stats;

pub use stats::CatalogStats;

use crate::core::{SymbolRecord, MAX_SNIPPET_LINES};
use crate::dataset::SourceType;
use crate::io::{ensure_dir, write_json_pretty};
use crate::scanner::ScanOutcome;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const CATALOG_SOURCE: &str = "syntax-tree scan (public class/function with docstring)";
pub const CATALOG_FILE: &str = "catalog.json";
pub const STATS_FILE: &str = "catalog_stats.json";

/// At most this many skipped files are listed in the catalog.
pub const MAX_LISTED_ERRORS: usize = 200;

/// A record as listed in the catalog: id and content wrapped around its fields.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogChunk<'a> {
    pub chunk_id: String,
    pub source_type: SourceType,
    #[serde(flatten)]
    pub record: &'a SymbolRecord,
    pub content: String,
}

impl<'a> From<&'a SymbolRecord> for CatalogChunk<'a> {
    fn from(record: &'a SymbolRecord) -> Self {
        Self {
            chunk_id: record.chunk_id(),
            source_type: SourceType::Code,
            record,
            content: record.assembled_content(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Catalog<'a> {
    pub repo: String,
    pub repo_path: String,
    pub source: &'static str,
    pub max_snippet_lines: usize,
    pub chunks: Vec<CatalogChunk<'a>>,
    pub parse_errors: Vec<(String, String)>,
}

impl<'a> Catalog<'a> {
    pub fn new(repo: impl Into<String>, repo_path: &Path, outcome: &'a ScanOutcome) -> Self {
        Self {
            repo: repo.into(),
            repo_path: repo_path.display().to_string(),
            source: CATALOG_SOURCE,
            max_snippet_lines: MAX_SNIPPET_LINES,
            chunks: outcome.records.iter().map(CatalogChunk::from).collect(),
            parse_errors: outcome
                .errors
                .iter()
                .take(MAX_LISTED_ERRORS)
                .map(|e| e.as_pair())
                .collect(),
        }
    }

    pub fn with_max_snippet_lines(mut self, max_snippet_lines: usize) -> Self {
        self.max_snippet_lines = max_snippet_lines;
        self
    }
}

/// Paths of the two files a catalog run produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFiles {
    pub catalog: PathBuf,
    pub stats: PathBuf,
}

/// Write `catalog.json` and `catalog_stats.json` into `out_dir`.
pub fn write_catalog(out_dir: &Path, catalog: &Catalog<'_>, stats: &CatalogStats) -> Result<CatalogFiles> {
    ensure_dir(out_dir)?;
    let files = CatalogFiles {
        catalog: out_dir.join(CATALOG_FILE),
        stats: out_dir.join(STATS_FILE),
    };
    write_json_pretty(&files.catalog, catalog)
        .with_context(|| format!("Failed to write {}", files.catalog.display()))?;
    write_json_pretty(&files.stats, stats)
        .with_context(|| format!("Failed to write {}", files.stats.display()))?;
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BusinessStage, FileError, SymbolKind};
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use tempfile::TempDir;

    fn outcome(n_errors: usize) -> ScanOutcome {
        ScanOutcome {
            records: vec![SymbolRecord {
                path: "pkg/foo.py".to_string(),
                symbol_kind: SymbolKind::Class,
                name: "Foo".to_string(),
                start_line: 10,
                end_line: 15,
                doc_summary: "Foo things.".to_string(),
                snippet: "class Foo:\n    pass".to_string(),
                business_stage: BusinessStage::Other,
            }],
            errors: (0..n_errors)
                .map(|i| FileError::read_failed(format!("bad_{:03}.py", i)))
                .collect(),
            files_scanned: n_errors + 1,
        }
    }

    #[test]
    fn test_chunk_flattens_record_fields() {
        let outcome = outcome(0);
        let catalog = Catalog::new("demo", Path::new("/repo"), &outcome);
        let value = serde_json::to_value(&catalog).unwrap();
        let chunk = &value["chunks"][0];

        assert_eq!(chunk["chunk_id"], "pkg/foo.py::Foo@10");
        assert_eq!(chunk["source_type"], "code");
        assert_eq!(chunk["symbol_kind"], "class");
        assert_eq!(chunk["start_line"], 10);
        assert_eq!(chunk["business_stage"], "other");
        assert_eq!(chunk["content"], outcome.records[0].assembled_content());
        assert_eq!(value["source"], CATALOG_SOURCE);
        assert_eq!(value["max_snippet_lines"], 80);
    }

    #[test]
    fn test_parse_errors_are_capped_pairs() {
        let outcome = outcome(250);
        let catalog = Catalog::new("demo", Path::new("/repo"), &outcome);
        assert_eq!(catalog.parse_errors.len(), MAX_LISTED_ERRORS);

        let value = serde_json::to_value(&catalog).unwrap();
        assert_eq!(value["parse_errors"][0], serde_json::json!(["bad_000.py", "read_failed"]));
    }

    #[test]
    fn test_write_catalog_creates_both_files() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("data/intermediate");
        let outcome = outcome(1);
        let catalog = Catalog::new("demo", Path::new("/repo"), &outcome);
        let stats = CatalogStats::from_records(&outcome.records);

        let files = write_catalog(&out, &catalog, &stats).unwrap();
        let text = std::fs::read_to_string(&files.catalog).unwrap();
        assert!(text.contains("\n  \"repo\": \"demo\""));

        let stats: Value = serde_json::from_str(&std::fs::read_to_string(&files.stats).unwrap()).unwrap();
        assert_eq!(stats["total_chunks"], 1);
    }
}
