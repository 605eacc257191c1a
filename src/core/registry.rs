use indexmap::IndexMap;
use tracing::debug;

use crate::core::CurveSeries;

/// Insertion-ordered bookkeeping of plotted equations.
///
/// The registry exclusively owns every completed [`CurveSeries`]; consumers
/// only ever see borrowed views. Labels behave as a set: re-adding a label
/// replaces its series wholesale.
#[derive(Debug, Default, Clone)]
pub struct FunctionRegistry {
    entries: IndexMap<String, CurveSeries>,
}

impl FunctionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a series under its label. Returns the replaced series when
    /// the label was already present.
    pub fn add(&mut self, series: CurveSeries) -> Option<CurveSeries> {
        let label = series.label().to_owned();
        let replaced = self.entries.insert(label.clone(), series);
        debug!(label = %label, replaced = replaced.is_some(), "function registered");
        replaced
    }

    /// Removes a label, keeping the insertion order of the remaining
    /// entries. Returns the removed series, or `None` for unknown labels.
    pub fn remove(&mut self, label: &str) -> Option<CurveSeries> {
        self.entries.shift_remove(label)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Labels in insertion order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn get(&self, label: &str) -> Option<&CurveSeries> {
        self.entries.get(label)
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.entries.contains_key(label)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
