//! Core data model shared by the scanner, the catalog and the dataset pipeline.

pub mod errors;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use errors::{Error, ParseError, Result, SchemaError, SchemaViolation};

/// Upper bound on the number of source lines kept in a snippet.
pub const MAX_SNIPPET_LINES: usize = 80;

/// Minimum length (in characters, after stripping) of a usable docstring.
pub const MIN_DOC_CHARS: usize = 10;

/// Kind of definition a [`SymbolRecord`] was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Class,
    Function,
}

impl SymbolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Class => "class",
            SymbolKind::Function => "function",
        }
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse domain category assigned to a file from its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessStage {
    Exposure,
    Hazard,
    Gul,
    Fm,
    Aggregation,
    Other,
}

impl BusinessStage {
    /// Every stage, in classification priority order (`Other` last).
    pub const ALL: [BusinessStage; 6] = [
        BusinessStage::Exposure,
        BusinessStage::Hazard,
        BusinessStage::Gul,
        BusinessStage::Fm,
        BusinessStage::Aggregation,
        BusinessStage::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessStage::Exposure => "exposure",
            BusinessStage::Hazard => "hazard",
            BusinessStage::Gul => "gul",
            BusinessStage::Fm => "fm",
            BusinessStage::Aggregation => "aggregation",
            BusinessStage::Other => "other",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|stage| stage.as_str() == label)
    }
}

impl fmt::Display for BusinessStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One documented, non-private class or function definition.
///
/// Records are only produced by the extractor, which guarantees that
/// `doc_summary` is stripped and at least [`MIN_DOC_CHARS`] long, that the
/// snippet holds at most [`MAX_SNIPPET_LINES`] lines and that
/// `end_line >= start_line`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolRecord {
    /// Slash-separated path relative to the scan root.
    pub path: String,
    pub symbol_kind: SymbolKind,
    pub name: String,
    /// 1-based, inclusive.
    pub start_line: usize,
    /// 1-based, inclusive.
    pub end_line: usize,
    pub doc_summary: String,
    pub snippet: String,
    pub business_stage: BusinessStage,
}

impl SymbolRecord {
    /// Human-readable identifier, e.g. `pkg/utils/profiles.py::load@44`.
    pub fn chunk_id(&self) -> String {
        format!("{}::{}@{}", self.path, self.name, self.start_line)
    }

    /// Header, snippet and docstring excerpt as shown to dataset consumers.
    pub fn assembled_content(&self) -> String {
        let block = format!(
            "# File: {path}\n# {kind}: {name} (lines {start}-{end})\n\n{snippet}\n\n\"\"\"Docstring (excerpt)\"\"\"\n{doc}\n",
            path = self.path,
            kind = self.symbol_kind,
            name = self.name,
            start = self.start_line,
            end = self.end_line,
            snippet = self.snippet,
            doc = self.doc_summary,
        );
        block.trim().to_string()
    }

    /// First line of the docstring, trimmed.
    pub fn doc_first_line(&self) -> &str {
        self.doc_summary.lines().next().unwrap_or_default().trim()
    }
}

/// A file the scanner had to skip, with the reason it was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileError {
    pub path: String,
    pub reason: String,
}

impl FileError {
    pub fn read_failed(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: "read_failed".to_string(),
        }
    }

    pub fn parse_failed(path: impl Into<String>, error: &ParseError) -> Self {
        Self {
            path: path.into(),
            reason: format!("parse_failed: {}", error),
        }
    }

    /// The `[path, message]` pair written to the catalog.
    pub fn as_pair(&self) -> (String, String) {
        (self.path.clone(), self.reason.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record() -> SymbolRecord {
        SymbolRecord {
            path: "oasis/exposure/loader.py".to_string(),
            symbol_kind: SymbolKind::Class,
            name: "Loader".to_string(),
            start_line: 3,
            end_line: 5,
            doc_summary: "Loads exposure files.\nSecond line.".to_string(),
            snippet: "class Loader:\n    \"\"\"Loads exposure files.\"\"\"\n    pass".to_string(),
            business_stage: BusinessStage::Exposure,
        }
    }

    #[test]
    fn test_chunk_id_is_path_name_and_line() {
        assert_eq!(record().chunk_id(), "oasis/exposure/loader.py::Loader@3");
    }

    #[test]
    fn test_assembled_content_layout() {
        let expected = "# File: oasis/exposure/loader.py\n\
                        # class: Loader (lines 3-5)\n\
                        \n\
                        class Loader:\n    \"\"\"Loads exposure files.\"\"\"\n    pass\n\
                        \n\
                        \"\"\"Docstring (excerpt)\"\"\"\n\
                        Loads exposure files.\nSecond line.";
        assert_eq!(record().assembled_content(), expected);
    }

    #[test]
    fn test_doc_first_line() {
        assert_eq!(record().doc_first_line(), "Loads exposure files.");
    }

    #[test]
    fn test_stage_labels_round_trip_through_parse() {
        for stage in BusinessStage::ALL {
            assert_eq!(BusinessStage::parse(stage.as_str()), Some(stage));
        }
        assert_eq!(BusinessStage::parse("claims"), None);
    }

    #[test]
    fn test_enums_serialize_lowercase() {
        let json = serde_json::to_string(&(SymbolKind::Function, BusinessStage::Gul)).unwrap();
        assert_eq!(json, r#"["function","gul"]"#);
    }
}
