// Core configuration types
mod core;
mod loader;

pub use self::core::{
    default_catalog_dir, default_dataset_dir, default_extensions, default_max_snippet_lines,
    default_n_design, default_n_qa, default_seed, default_skip_dir_keywords,
    default_skip_file_keywords, DocsynthConfig, GenerationConfig, OutputConfig, ScanConfig,
    StagesConfig,
};

// Re-export loader functions
pub use loader::{
    directory_ancestors, load_config, load_config_from, load_config_from_path, parse_config,
    resolve_config, CONFIG_FILE_NAME,
};

use crate::extraction::{KeywordStageClassifier, SymbolExtractor};
use crate::io::walker::FileWalker;
use std::path::{Path, PathBuf};

impl DocsynthConfig {
    /// Get scan settings (with defaults if not configured)
    pub fn scan_settings(&self) -> ScanConfig {
        self.scan.clone().unwrap_or_default()
    }

    pub fn generation_settings(&self) -> GenerationConfig {
        self.generation.clone().unwrap_or_default()
    }

    pub fn output_settings(&self) -> OutputConfig {
        self.output.clone().unwrap_or_default()
    }

    /// Default keyword classifier with any configured groups replaced.
    pub fn build_classifier(&self) -> KeywordStageClassifier {
        let Some(stages) = &self.stages else {
            return KeywordStageClassifier::default();
        };
        stages
            .overrides()
            .into_iter()
            .fold(KeywordStageClassifier::default(), |classifier, (stage, words)| {
                classifier.with_keywords(stage, words.to_vec())
            })
    }

    pub fn build_extractor(&self) -> SymbolExtractor {
        SymbolExtractor::new()
            .with_classifier(Box::new(self.build_classifier()))
            .with_max_snippet_lines(self.scan_settings().max_snippet_lines)
    }

    pub fn build_walker(&self, root: &Path) -> FileWalker {
        let scan = self.scan_settings();
        FileWalker::new(root.to_path_buf())
            .with_extensions(scan.extensions)
            .with_skip_dir_keywords(scan.skip_dir_keywords)
            .with_skip_file_keywords(scan.skip_file_keywords)
    }

    /// Configured repository name, else the root directory's own name.
    pub fn repo_name(&self, root: &Path) -> String {
        self.generation
            .as_ref()
            .and_then(|g| g.repo_name.clone())
            .unwrap_or_else(|| directory_name(root))
    }
}

fn directory_name(root: &Path) -> String {
    let resolved: PathBuf = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    resolved
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "repository".to_string())
}
