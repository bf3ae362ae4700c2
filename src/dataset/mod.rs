//! Training-sample generation, validation and splitting.

pub mod generator;
pub mod sample;
pub mod schema;
pub mod split;
pub mod templates;

pub use generator::{validate_batch, GenerationSettings, SampleGenerator};
pub use sample::{
    ContextItem, Difficulty, Language, Metadata, SourceType, TaskType, TraceStep, TrainingSample,
};
pub use schema::{validate_jsonl, validate_jsonl_str, validate_value, LineFailure, ValidationReport};
pub use split::{split_dataset, split_sizes, split_with_seed, DatasetSplit};

use crate::core::{Error, Result, SymbolRecord};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// How many samples of each family to request and which seed drives them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationPlan {
    pub seed: u64,
    pub n_qa: usize,
    pub n_design: usize,
}

impl Default for GenerationPlan {
    fn default() -> Self {
        Self {
            seed: 42,
            n_qa: 200,
            n_design: 50,
        }
    }
}

/// Generate, re-validate and split samples using one seeded RNG.
///
/// The generator consumes the RNG first and the split continues from the
/// state it left behind, so the whole pipeline is a pure function of
/// `(records, settings, plan)`.
pub fn build_dataset(
    records: &[SymbolRecord],
    settings: GenerationSettings,
    plan: GenerationPlan,
) -> Result<DatasetSplit<TrainingSample>> {
    if records.is_empty() {
        return Err(Error::missing_input(
            "no documented classes or functions were extracted",
        ));
    }

    let mut rng = StdRng::seed_from_u64(plan.seed);
    let samples = SampleGenerator::new(records, settings).generate(&mut rng, plan.n_qa, plan.n_design)?;
    validate_batch(&samples)?;
    Ok(split_dataset(samples, &mut rng))
}
