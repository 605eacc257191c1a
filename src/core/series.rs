use serde::{Deserialize, Serialize};

use crate::core::SamplePoint;

/// Ordered samples produced for one plotted equation.
///
/// A series is append-only while a sampling pass is running, replaced
/// wholesale on re-plot, and removed wholesale on deletion. Its label is the
/// display string the user typed, which also keys the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveSeries {
    label: String,
    points: Vec<SamplePoint>,
}

impl CurveSeries {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            points: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_points(label: impl Into<String>, points: Vec<SamplePoint>) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn points(&self) -> &[SamplePoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn append(&mut self, points: &[SamplePoint]) {
        self.points.extend_from_slice(points);
    }
}
