//! Deterministic sample generation from extracted symbols.

use crate::core::{Error, Result, SymbolKind, SymbolRecord};
use crate::dataset::sample::{
    numbered_trace, ContextItem, Difficulty, Language, Metadata, TaskType, TrainingSample,
};
use crate::dataset::templates::{self, SampleText};
use rand::seq::SliceRandom;
use rand::Rng;

pub const QUESTION_ID_FACT: &str = "AUTO_FACT";
pub const QUESTION_ID_DESIGN: &str = "AUTO_DESIGN";

/// Values stamped on every generated sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSettings {
    pub repo: String,
    pub language: Language,
}

impl GenerationSettings {
    pub fn new(repo: impl Into<String>, language: Language) -> Self {
        Self {
            repo: repo.into(),
            language,
        }
    }
}

/// Builds fact-QA and design samples from a fixed set of records.
///
/// All randomness comes from the generator passed to [`generate`](Self::generate);
/// the same records, counts and RNG state always give the same samples.
pub struct SampleGenerator<'a> {
    records: &'a [SymbolRecord],
    settings: GenerationSettings,
}

impl<'a> SampleGenerator<'a> {
    pub fn new(records: &'a [SymbolRecord], settings: GenerationSettings) -> Self {
        Self { records, settings }
    }

    /// `n_qa` fact-QA samples followed by `n_design` design samples.
    ///
    /// Records are shuffled once. QA takes the head of the shuffled order;
    /// design prefers the classes in that order when there are at least
    /// `n_design` of them. Fewer records than requested yields fewer samples.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        n_qa: usize,
        n_design: usize,
    ) -> Result<Vec<TrainingSample>> {
        let mut candidates: Vec<&SymbolRecord> = self.records.iter().collect();
        candidates.shuffle(rng);

        let classes: Vec<&SymbolRecord> = candidates
            .iter()
            .copied()
            .filter(|r| r.symbol_kind == SymbolKind::Class)
            .collect();
        let design_pool = if classes.len() >= n_design {
            &classes
        } else {
            &candidates
        };

        let mut samples = candidates
            .iter()
            .take(n_qa)
            .enumerate()
            .map(|(i, record)| self.fact_qa(record, i + 1))
            .collect::<Result<Vec<_>>>()?;
        let design = design_pool
            .iter()
            .take(n_design)
            .enumerate()
            .map(|(i, record)| self.design(record, i + 1))
            .collect::<Result<Vec<_>>>()?;

        log::info!(
            "Generated {} qa and {} design samples from {} records",
            samples.len(),
            design.len(),
            self.records.len()
        );
        samples.extend(design);
        Ok(samples)
    }

    pub fn fact_qa(&self, record: &SymbolRecord, index: usize) -> Result<TrainingSample> {
        let text = templates::fact_qa(self.settings.language, record, &self.settings.repo);
        self.assemble(record, index, TaskType::Qa, QUESTION_ID_FACT, Difficulty::Easy, text)
    }

    pub fn design(&self, record: &SymbolRecord, index: usize) -> Result<TrainingSample> {
        let text = templates::design(self.settings.language, record);
        self.assemble(record, index, TaskType::Design, QUESTION_ID_DESIGN, Difficulty::Medium, text)
    }

    fn assemble(
        &self,
        record: &SymbolRecord,
        index: usize,
        task_type: TaskType,
        question_id: &str,
        difficulty: Difficulty,
        text: SampleText,
    ) -> Result<TrainingSample> {
        let evidence = vec![record.path.clone()];
        let sample = TrainingSample {
            id: TrainingSample::auto_id(task_type, index),
            task_type,
            instruction: text.instruction,
            context: vec![ContextItem::from_record(record)],
            reasoning_trace: numbered_trace(&evidence, text.steps),
            output: text.output,
            metadata: Metadata {
                repo: self.settings.repo.clone(),
                business_stage: record.business_stage,
                question_id: question_id.to_string(),
                difficulty,
                language: self.settings.language,
            },
        };
        check_sample(&sample)?;
        Ok(sample)
    }
}

fn check_sample(sample: &TrainingSample) -> Result<()> {
    sample.validate().map_err(|source| Error::InvalidSample {
        id: sample.id.clone(),
        source,
    })
}

/// Re-check a complete batch; the first invalid sample aborts.
pub fn validate_batch(samples: &[TrainingSample]) -> Result<()> {
    samples.iter().try_for_each(check_sample)
}
