use crate::config::DocsynthConfig;
use crate::dataset::{build_dataset, DatasetSplit, GenerationSettings, Language, TrainingSample};
use crate::io::{ensure_dir, write_jsonl};
use crate::progress::ProgressManager;
use anyhow::Result;
use colored::*;
use std::path::PathBuf;

/// Command-line values that take precedence over `[generation]`.
#[derive(Debug, Clone, Default)]
pub struct GenerateOverrides {
    pub seed: Option<u64>,
    pub n_qa: Option<usize>,
    pub n_design: Option<usize>,
    pub language: Option<Language>,
    pub repo_name: Option<String>,
}

pub struct GenerateCommand {
    pub root: PathBuf,
    pub output: Option<PathBuf>,
    pub overrides: GenerateOverrides,
    pub config: DocsynthConfig,
    pub progress: ProgressManager,
}

pub fn run_generate(command: GenerateCommand) -> Result<DatasetSplit<TrainingSample>> {
    let outcome = super::scan_root(&command.root, &command.config, &command.progress)?;

    let generation = command.config.generation_settings();
    let overrides = command.overrides;
    let mut plan = generation.plan();
    plan.seed = overrides.seed.unwrap_or(plan.seed);
    plan.n_qa = overrides.n_qa.unwrap_or(plan.n_qa);
    plan.n_design = overrides.n_design.unwrap_or(plan.n_design);
    let settings = GenerationSettings::new(
        overrides
            .repo_name
            .unwrap_or_else(|| command.config.repo_name(&command.root)),
        overrides.language.unwrap_or(generation.language),
    );
    log::info!(
        "Generating with seed {} (n_qa={}, n_design={}, language={})",
        plan.seed,
        plan.n_qa,
        plan.n_design,
        settings.language.as_str()
    );

    let spinner = command.progress.create_spinner("Generating samples");
    let split = build_dataset(&outcome.records, settings, plan);
    spinner.finish_and_clear();
    let split = split?;

    let out_dir = command
        .output
        .unwrap_or_else(|| command.config.output_settings().dataset_dir);
    ensure_dir(&out_dir)?;
    for (name, samples) in split.parts() {
        let path = out_dir.join(format!("{}.jsonl", name));
        write_jsonl(&path, samples)?;
        log::debug!("Wrote {} samples to {}", samples.len(), path.display());
    }

    command.progress.clear()?;
    println!(
        "{} {} samples (train={}, dev={}, test={}) -> {}",
        "Dataset:".green().bold(),
        split.len(),
        split.train.len(),
        split.dev.len(),
        split.test.len(),
        out_dir.display()
    );
    Ok(split)
}
