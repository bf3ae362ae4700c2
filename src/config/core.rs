use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::core::{BusinessStage, MAX_SNIPPET_LINES};
use crate::dataset::{GenerationPlan, Language};
use crate::io::walker::{DEFAULT_EXTENSIONS, DEFAULT_SKIP_DIR_KEYWORDS, DEFAULT_SKIP_FILE_KEYWORDS};

/// Root configuration structure for docsynth
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DocsynthConfig {
    /// File discovery and extraction settings
    #[serde(default)]
    pub scan: Option<ScanConfig>,

    /// Keyword overrides for the stage classifier
    #[serde(default)]
    pub stages: Option<StagesConfig>,

    /// Sample generation settings
    #[serde(default)]
    pub generation: Option<GenerationConfig>,

    /// Output directories
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanConfig {
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Substrings of the root-relative path that exclude a file
    #[serde(default = "default_skip_dir_keywords")]
    pub skip_dir_keywords: Vec<String>,

    /// Substrings of the base name that exclude a file
    #[serde(default = "default_skip_file_keywords")]
    pub skip_file_keywords: Vec<String>,

    #[serde(default = "default_max_snippet_lines")]
    pub max_snippet_lines: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            skip_dir_keywords: default_skip_dir_keywords(),
            skip_file_keywords: default_skip_file_keywords(),
            max_snippet_lines: default_max_snippet_lines(),
        }
    }
}

/// Replacement keyword lists per stage. Absent stages keep their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct StagesConfig {
    #[serde(default)]
    pub exposure: Option<Vec<String>>,
    #[serde(default)]
    pub hazard: Option<Vec<String>>,
    #[serde(default)]
    pub gul: Option<Vec<String>>,
    #[serde(default)]
    pub fm: Option<Vec<String>>,
    #[serde(default)]
    pub aggregation: Option<Vec<String>>,
}

impl StagesConfig {
    /// The configured overrides, in classification priority order.
    pub fn overrides(&self) -> Vec<(BusinessStage, &[String])> {
        [
            (BusinessStage::Exposure, &self.exposure),
            (BusinessStage::Hazard, &self.hazard),
            (BusinessStage::Gul, &self.gul),
            (BusinessStage::Fm, &self.fm),
            (BusinessStage::Aggregation, &self.aggregation),
        ]
        .into_iter()
        .filter_map(|(stage, words)| words.as_deref().map(|w| (stage, w)))
        .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Repository name stamped on samples; defaults to the scan root's name
    #[serde(default)]
    pub repo_name: Option<String>,

    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default = "default_n_qa")]
    pub n_qa: usize,

    #[serde(default = "default_n_design")]
    pub n_design: usize,

    #[serde(default)]
    pub language: Language,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            repo_name: None,
            seed: default_seed(),
            n_qa: default_n_qa(),
            n_design: default_n_design(),
            language: Language::default(),
        }
    }
}

impl GenerationConfig {
    pub fn plan(&self) -> GenerationPlan {
        GenerationPlan {
            seed: self.seed,
            n_qa: self.n_qa,
            n_design: self.n_design,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    #[serde(default = "default_catalog_dir")]
    pub catalog_dir: PathBuf,

    #[serde(default = "default_dataset_dir")]
    pub dataset_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            catalog_dir: default_catalog_dir(),
            dataset_dir: default_dataset_dir(),
        }
    }
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

pub fn default_extensions() -> Vec<String> {
    owned(DEFAULT_EXTENSIONS)
}

pub fn default_skip_dir_keywords() -> Vec<String> {
    owned(DEFAULT_SKIP_DIR_KEYWORDS)
}

pub fn default_skip_file_keywords() -> Vec<String> {
    owned(DEFAULT_SKIP_FILE_KEYWORDS)
}

pub fn default_max_snippet_lines() -> usize {
    MAX_SNIPPET_LINES
}

pub fn default_seed() -> u64 {
    42
}

pub fn default_n_qa() -> usize {
    200
}

pub fn default_n_design() -> usize {
    50
}

pub fn default_catalog_dir() -> PathBuf {
    PathBuf::from("data/intermediate")
}

pub fn default_dataset_dir() -> PathBuf {
    PathBuf::from("data/final_datasets")
}
