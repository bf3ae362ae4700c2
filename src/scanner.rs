//! Repository scanning: discovery, decoding and extraction over a whole tree.

use crate::core::{Error, FileError, Result, SymbolRecord};
use crate::extraction::SymbolExtractor;
use crate::io::walker::{relative_slash_path, FileWalker};
use crate::io::read_source;
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};

/// Everything one scan produced. Per-file failures are data, not errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Records in discovery order, then extraction order within each file.
    pub records: Vec<SymbolRecord>,
    /// Skipped files in discovery order.
    pub errors: Vec<FileError>,
    pub files_scanned: usize,
}

pub struct RepositoryScanner {
    walker: FileWalker,
    extractor: SymbolExtractor,
    progress: Option<ProgressBar>,
}

impl RepositoryScanner {
    pub fn new(root: PathBuf) -> Self {
        Self {
            walker: FileWalker::new(root),
            extractor: SymbolExtractor::default(),
            progress: None,
        }
    }

    pub fn with_walker(mut self, walker: FileWalker) -> Self {
        self.walker = walker;
        self
    }

    pub fn with_extractor(mut self, extractor: SymbolExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Bar advanced once per discovered file; its length is set by the scan.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn root(&self) -> &Path {
        self.walker.root()
    }

    /// Scan the whole tree. Only a missing root fails.
    pub fn scan(&self) -> Result<ScanOutcome> {
        let root = self.walker.root();
        if !root.is_dir() {
            return Err(Error::missing_input(format!(
                "scan root not found: {}",
                root.display()
            )));
        }

        let files = self.walker.walk();
        log::info!("Scanning {} Python files under {}", files.len(), root.display());
        if let Some(pb) = &self.progress {
            pb.set_length(files.len() as u64);
            pb.set_message("Extracting symbols");
        }

        let mut outcome = ScanOutcome {
            files_scanned: files.len(),
            ..ScanOutcome::default()
        };
        for path in &files {
            match self.scan_file(path) {
                Ok(records) => outcome.records.extend(records),
                Err(error) => {
                    log::warn!("Skipping {}: {}", error.path, error.reason);
                    outcome.errors.push(error);
                }
            }
            if let Some(pb) = &self.progress {
                pb.inc(1);
            }
        }

        if let Some(pb) = &self.progress {
            pb.finish_with_message(format!(
                "Extraction complete: {} symbols, {} skipped files",
                outcome.records.len(),
                outcome.errors.len()
            ));
        }
        log::info!(
            "Extracted {} symbols from {} files ({} skipped)",
            outcome.records.len(),
            outcome.files_scanned,
            outcome.errors.len()
        );
        Ok(outcome)
    }

    fn scan_file(&self, path: &Path) -> std::result::Result<Vec<SymbolRecord>, FileError> {
        let rel_path = relative_slash_path(self.walker.root(), path);
        let content = read_source(path).map_err(|e| {
            log::debug!("Read of {} failed: {}", path.display(), e);
            FileError::read_failed(rel_path.as_str())
        })?;
        self.extractor
            .extract(&rel_path, &content)
            .map_err(|e| FileError::parse_failed(rel_path.as_str(), &e))
    }
}

/// Scan `root` with default discovery and extraction settings.
pub fn scan_repository(root: &Path) -> Result<ScanOutcome> {
    RepositoryScanner::new(root.to_path_buf()).scan()
}
