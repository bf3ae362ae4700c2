mod common;

use common::sample_repo;
use docsynth::dataset::{
    build_dataset, split_sizes, validate_value, GenerationPlan, GenerationSettings, Language,
    TaskType, TrainingSample,
};
use docsynth::scan_repository;
use pretty_assertions::assert_eq;
use std::collections::HashSet;

fn run(seed: u64, language: Language) -> Vec<Vec<TrainingSample>> {
    let repo = sample_repo();
    let outcome = scan_repository(&repo.root).unwrap();
    let split = build_dataset(
        &outcome.records,
        GenerationSettings::new("OasisLMF", language),
        GenerationPlan {
            seed,
            n_qa: 10,
            n_design: 4,
        },
    )
    .unwrap();
    vec![split.train, split.dev, split.test]
}

#[test]
fn test_same_inputs_produce_identical_partitions() {
    let first = run(42, Language::Zh);
    let second = run(42, Language::Zh);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_partitions_are_disjoint_and_sized() {
    let parts = run(42, Language::En);
    let sizes: Vec<usize> = parts.iter().map(Vec::len).collect();
    let (train, dev, test) = split_sizes(14);
    assert_eq!(sizes, vec![train, dev, test]);

    let ids: HashSet<&str> = parts.iter().flatten().map(|s| s.id.as_str()).collect();
    assert_eq!(ids.len(), 14);
}

#[test]
fn test_design_samples_prefer_classes() {
    // Six classes are available, so all four design samples use classes.
    let parts = run(7, Language::En);
    let design: Vec<&TrainingSample> = parts
        .iter()
        .flatten()
        .filter(|s| s.task_type == TaskType::Design)
        .collect();
    assert_eq!(design.len(), 4);
    for sample in design {
        assert!(sample.context[0].content.contains("# class: Handler"));
    }
}

#[test]
fn test_every_sample_passes_the_schema() {
    for sample in run(3, Language::Zh).iter().flatten() {
        let value = serde_json::to_value(sample).unwrap();
        assert_eq!(validate_value(&value), Ok(()), "{}", sample.id);
        assert!(sample.evidence_paths().all(|p| p == sample.context[0].path));
    }
}
