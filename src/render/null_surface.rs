use crate::core::{Axis, SamplePoint};
use crate::render::RenderSurface;

/// Recorded surface call, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    CurveAdded { label: String, initial_len: usize },
    PointsAppended { label: String, count: usize },
    CurveRemoved { label: String },
    Invalidated { force_full_redraw: bool },
    AxisBoundsSet { axis: Axis, min: f64, max: f64 },
    AxisReset { axis: Axis },
}

/// No-op surface used by tests and headless engine usage.
///
/// It records every call so suites can assert on notification cadence
/// without dragging in a real backend.
#[derive(Debug, Default)]
pub struct NullSurface {
    pub events: Vec<SurfaceEvent>,
}

impl NullSurface {
    #[must_use]
    pub fn invalidate_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, SurfaceEvent::Invalidated { .. }))
            .count()
    }

    /// Total points appended for a label across all batches.
    #[must_use]
    pub fn appended_total(&self, label: &str) -> usize {
        self.events
            .iter()
            .filter_map(|event| match event {
                SurfaceEvent::PointsAppended { label: l, count } if l == label => Some(count),
                _ => None,
            })
            .sum()
    }

    /// Batch sizes appended for a label, in emission order.
    #[must_use]
    pub fn append_batches(&self, label: &str) -> Vec<usize> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SurfaceEvent::PointsAppended { label: l, count } if l == label => Some(*count),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn remove_count(&self, label: &str) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, SurfaceEvent::CurveRemoved { label: l } if l == label))
            .count()
    }
}

impl RenderSurface for NullSurface {
    fn add_curve(&mut self, label: &str, initial_points: &[SamplePoint]) {
        self.events.push(SurfaceEvent::CurveAdded {
            label: label.to_owned(),
            initial_len: initial_points.len(),
        });
    }

    fn append_points(&mut self, label: &str, points: &[SamplePoint]) {
        self.events.push(SurfaceEvent::PointsAppended {
            label: label.to_owned(),
            count: points.len(),
        });
    }

    fn remove_curve(&mut self, label: &str) {
        self.events
            .push(SurfaceEvent::CurveRemoved {
                label: label.to_owned(),
            });
    }

    fn invalidate(&mut self, force_full_redraw: bool) {
        self.events
            .push(SurfaceEvent::Invalidated { force_full_redraw });
    }

    fn set_axis_bounds(&mut self, axis: Axis, min: f64, max: f64) {
        self.events.push(SurfaceEvent::AxisBoundsSet { axis, min, max });
    }

    fn reset_axis(&mut self, axis: Axis) {
        self.events.push(SurfaceEvent::AxisReset { axis });
    }
}
