//! CLI command implementations for docsynth operations.
//!
//! Available commands:
//! - **catalog**: Scan a repository and write its chunk catalog and statistics
//! - **generate**: Scan a repository and write train/dev/test sample files
//! - **validate**: Check a JSONL sample file against the sample schema
//! - **init**: Initialize a new docsynth configuration file

pub mod catalog;
pub mod generate;
pub mod init;
pub mod validate;

pub use catalog::{run_catalog, CatalogCommand};
pub use generate::{run_generate, GenerateCommand, GenerateOverrides};
pub use init::{init_config, init_config_in};
pub use validate::{print_report, validate_file};

use crate::config::DocsynthConfig;
use crate::progress::{ProgressManager, TEMPLATE_FILE_SCAN};
use crate::scanner::{RepositoryScanner, ScanOutcome};
use anyhow::Result;
use std::path::Path;

/// Scan `root` with the configured discovery and extraction settings.
pub(crate) fn scan_root(
    root: &Path,
    config: &DocsynthConfig,
    progress: &ProgressManager,
) -> Result<ScanOutcome> {
    let scanner = RepositoryScanner::new(root.to_path_buf())
        .with_walker(config.build_walker(root))
        .with_extractor(config.build_extractor())
        .with_progress(progress.create_bar(0, TEMPLATE_FILE_SCAN));
    let outcome = scanner.scan()?;
    if !outcome.errors.is_empty() {
        log::info!(
            "{} of {} files could not be read or parsed",
            outcome.errors.len(),
            outcome.files_scanned
        );
    }
    Ok(outcome)
}
