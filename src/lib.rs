// Export modules for library usage
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod dataset;
pub mod extraction;
pub mod io;
pub mod progress;
pub mod scanner;

// Re-export commonly used types
pub use crate::core::{
    BusinessStage, Error, FileError, ParseError, Result, SchemaError, SchemaViolation, SymbolKind,
    SymbolRecord,
};

pub use crate::extraction::{KeywordStageClassifier, StageClassifier, SymbolExtractor};

pub use crate::scanner::{scan_repository, RepositoryScanner, ScanOutcome};

pub use crate::catalog::{Catalog, CatalogStats};

pub use crate::dataset::{
    build_dataset, split_dataset, validate_jsonl, validate_value, DatasetSplit, GenerationPlan,
    GenerationSettings, SampleGenerator, TrainingSample, ValidationReport,
};

pub use crate::config::DocsynthConfig;
