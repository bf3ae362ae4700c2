use crate::core::SymbolRecord;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Aggregate counts over a catalog's records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total_chunks: usize,
    /// Ordered by count descending, then label ascending.
    pub by_business_stage: IndexMap<String, usize>,
    /// Same ordering as `by_business_stage`.
    pub by_symbol_kind: IndexMap<String, usize>,
    /// stage -> kind -> count, keys sorted.
    pub by_stage_and_kind: BTreeMap<String, BTreeMap<String, usize>>,
}

impl CatalogStats {
    pub fn from_records(records: &[SymbolRecord]) -> Self {
        let mut by_stage_and_kind: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
        for record in records {
            *by_stage_and_kind
                .entry(record.business_stage.to_string())
                .or_default()
                .entry(record.symbol_kind.to_string())
                .or_default() += 1;
        }

        Self {
            total_chunks: records.len(),
            by_business_stage: ranked_counts(records.iter().map(|r| r.business_stage.as_str())),
            by_symbol_kind: ranked_counts(records.iter().map(|r| r.symbol_kind.as_str())),
            by_stage_and_kind,
        }
    }
}

/// Count labels, most frequent first; ties broken by label.
fn ranked_counts<'a>(labels: impl Iterator<Item = &'a str>) -> IndexMap<String, usize> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for label in labels {
        *counts.entry(label).or_default() += 1;
    }
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .map(|(label, count)| (label.to_string(), count))
        .collect()
}
