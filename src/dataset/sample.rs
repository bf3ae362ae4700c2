//! Typed training samples.
//!
//! Enumerated fields are Rust enums, so a sample built in code can only go
//! wrong in its free-form parts (step numbering, empty traces). Those are
//! still checked by [`TrainingSample::validate`], which runs the same
//! contract used for persisted files.

use crate::core::{BusinessStage, SchemaError, SchemaViolation, SymbolRecord};
use crate::dataset::schema;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Qa,
    Design,
}

impl TaskType {
    pub const ALL: [TaskType; 2] = [TaskType::Qa, TaskType::Design];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Qa => "qa",
            TaskType::Design => "design",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Doc,
    Code,
    Config,
}

impl SourceType {
    pub const ALL: [SourceType; 3] = [SourceType::Doc, SourceType::Code, SourceType::Config];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Doc => "doc",
            SourceType::Code => "code",
            SourceType::Config => "config",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Natural language of the generated text.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Zh,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Zh, Language::En];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Zh => "zh",
            Language::En => "en",
        }
    }
}

/// One piece of grounding evidence attached to a sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextItem {
    pub source_type: SourceType,
    pub path: String,
    pub content: String,
}

impl ContextItem {
    /// Code context carrying the record's assembled header/snippet/docstring block.
    pub fn from_record(record: &SymbolRecord) -> Self {
        Self {
            source_type: SourceType::Code,
            path: record.path.clone(),
            content: record.assembled_content(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStep {
    pub step: u32,
    pub goal: String,
    pub evidence_ref: Vec<String>,
    pub intermediate_conclusion: String,
}

/// Number `(goal, conclusion)` pairs from 1, all citing the same evidence.
pub fn numbered_trace(evidence: &[String], steps: Vec<(String, String)>) -> Vec<TraceStep> {
    steps
        .into_iter()
        .zip(1u32..)
        .map(|((goal, intermediate_conclusion), step)| TraceStep {
            step,
            goal,
            evidence_ref: evidence.to_vec(),
            intermediate_conclusion,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub repo: String,
    pub business_stage: BusinessStage,
    pub question_id: String,
    pub difficulty: Difficulty,
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSample {
    pub id: String,
    pub task_type: TaskType,
    pub instruction: String,
    pub context: Vec<ContextItem>,
    pub reasoning_trace: Vec<TraceStep>,
    pub output: String,
    pub metadata: Metadata,
}

impl TrainingSample {
    /// Pipeline id, e.g. `qa_auto_0007`.
    pub fn auto_id(task_type: TaskType, index: usize) -> String {
        format!("{}_auto_{:04}", task_type, index)
    }

    /// Check this sample against the sample contract.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let value = serde_json::to_value(self).map_err(|e| {
            SchemaError::new(vec![SchemaViolation::new("", format!("not serializable: {}", e))])
        })?;
        schema::validate_value(&value)
    }

    /// Paths cited anywhere in the reasoning trace.
    pub fn evidence_paths(&self) -> impl Iterator<Item = &str> {
        self.reasoning_trace
            .iter()
            .flat_map(|step| step.evidence_ref.iter().map(String::as_str))
    }
}
