//! Render collaborator contract.

mod null_surface;

pub use null_surface::{NullSurface, SurfaceEvent};

use crate::core::{Axis, SamplePoint};

/// Contract implemented by the host's rendering collaborator.
///
/// The engine only ever pushes read-only views of curve data plus coalesced
/// redraw requests; a surface never mutates series state. `invalidate` with
/// `force_full_redraw` set must not be dropped or coalesced away — it
/// carries the guaranteed final repaint of a completed stream.
pub trait RenderSurface {
    fn add_curve(&mut self, label: &str, initial_points: &[SamplePoint]);
    fn append_points(&mut self, label: &str, points: &[SamplePoint]);
    fn remove_curve(&mut self, label: &str);
    fn invalidate(&mut self, force_full_redraw: bool);
    fn set_axis_bounds(&mut self, axis: Axis, min: f64, max: f64);
    fn reset_axis(&mut self, axis: Axis);
}
