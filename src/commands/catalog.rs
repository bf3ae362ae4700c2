use crate::catalog::{write_catalog, Catalog, CatalogFiles, CatalogStats};
use crate::config::DocsynthConfig;
use crate::progress::ProgressManager;
use anyhow::{Context, Result};
use colored::*;
use std::path::PathBuf;

pub struct CatalogCommand {
    pub root: PathBuf,
    pub output: Option<PathBuf>,
    pub config: DocsynthConfig,
    pub progress: ProgressManager,
}

pub fn run_catalog(command: CatalogCommand) -> Result<CatalogFiles> {
    let outcome = super::scan_root(&command.root, &command.config, &command.progress)?;
    let repo_path = command
        .root
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", command.root.display()))?;

    let catalog = Catalog::new(command.config.repo_name(&command.root), &repo_path, &outcome)
        .with_max_snippet_lines(command.config.scan_settings().max_snippet_lines);
    let stats = CatalogStats::from_records(&outcome.records);
    let out_dir = command
        .output
        .unwrap_or_else(|| command.config.output_settings().catalog_dir);
    let files = write_catalog(&out_dir, &catalog, &stats)?;

    command.progress.clear()?;
    println!(
        "{} {} chunks ({} files skipped) -> {}",
        "Catalog:".green().bold(),
        stats.total_chunks,
        outcome.errors.len(),
        files.catalog.display()
    );
    println!("{} {}", "Stats:".green().bold(), files.stats.display());
    Ok(files)
}
