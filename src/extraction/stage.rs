//! Path-keyword heuristic mapping a file to a business stage.

use crate::core::BusinessStage;

/// Maps a root-relative file path to a business stage.
pub trait StageClassifier: Send + Sync {
    fn classify(&self, rel_path: &str) -> BusinessStage;
}

/// Keyword groups tested in priority order; the first group with any
/// keyword contained in the lowercased path wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordStageClassifier {
    groups: Vec<(BusinessStage, Vec<String>)>,
}

fn keywords(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

pub fn default_keywords(stage: BusinessStage) -> Vec<String> {
    match stage {
        BusinessStage::Exposure => keywords(&["exposure", "oed", "location", "expos"]),
        BusinessStage::Hazard => keywords(&["hazard", "peril", "event", "occurrence"]),
        BusinessStage::Gul => keywords(&["gul", "loss", "groundup", "damage"]),
        BusinessStage::Fm => keywords(&["fm", "financial", "terms", "reinsurance", "profile"]),
        BusinessStage::Aggregation => {
            keywords(&["aggregation", "aggre", "summary", "report", "reports"])
        }
        BusinessStage::Other => Vec::new(),
    }
}

impl Default for KeywordStageClassifier {
    fn default() -> Self {
        let groups = BusinessStage::ALL
            .into_iter()
            .filter(|stage| *stage != BusinessStage::Other)
            .map(|stage| (stage, default_keywords(stage)))
            .collect();
        Self { groups }
    }
}

impl KeywordStageClassifier {
    /// Replace the keyword list of one stage. Priority order is unchanged.
    pub fn with_keywords(mut self, stage: BusinessStage, words: Vec<String>) -> Self {
        let lowered = words.into_iter().map(|w| w.to_lowercase()).collect();
        if let Some(group) = self.groups.iter_mut().find(|(s, _)| *s == stage) {
            group.1 = lowered;
        }
        self
    }

    pub fn keywords_for(&self, stage: BusinessStage) -> &[String] {
        self.groups
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, words)| words.as_slice())
            .unwrap_or(&[])
    }
}

impl StageClassifier for KeywordStageClassifier {
    fn classify(&self, rel_path: &str) -> BusinessStage {
        let lowered = rel_path.to_lowercase();
        self.groups
            .iter()
            .find(|(_, words)| words.iter().any(|w| lowered.contains(w.as_str())))
            .map(|(stage, _)| *stage)
            .unwrap_or(BusinessStage::Other)
    }
}
