use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::api::engine_config::{MAX_RATE_HZ, MIN_RATE_HZ, PlotEngineConfig};
use crate::api::refresh::RefreshThrottle;
use crate::core::{CurveSeries, Domain, SampleIter, SamplePoint};
use crate::eval::{BoundExpression, probe};
use crate::render::RenderSurface;

/// Lifecycle of a real-time plotting stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamPhase {
    Idle,
    Streaming,
    Completed,
    Cancelled,
    Failed,
}

impl StreamPhase {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Failed)
    }
}

/// Snapshot of an in-flight stream's mutable bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamState {
    pub rate_hz: u32,
    pub batch_size: usize,
    /// Next sample index the driver will draw.
    pub cursor: usize,
    pub cancelled: bool,
}

/// Outcome of one cooperative poll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StreamPoll {
    /// The driver was not streaming when polled (never started, or already
    /// in a terminal phase).
    Inactive(StreamPhase),
    /// The pacing delay is still in effect; nothing was done.
    Waiting { resume_at_ms: f64 },
    /// A batch was appended; the next batch is due at `resume_at_ms`.
    Progressed { appended: usize, resume_at_ms: f64 },
    /// The stream reached a terminal phase during this poll.
    Finished(StreamPhase),
}

/// Cancellation handle for an active stream.
///
/// Cloneable and callable from anywhere; cancellation is cooperative and
/// observed at the driver's next suspension point, so worst-case latency is
/// one pacing interval.
#[derive(Debug, Clone)]
pub struct StreamHandle {
    label: String,
    cancelled: Arc<AtomicBool>,
}

impl StreamHandle {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Real-time plot driver: a poll-driven state machine
/// `Idle → Streaming → {Completed, Cancelled, Failed}`.
///
/// Each successful poll draws up to `batch_size` consecutive samples,
/// appends them to the live series, forwards them to the surface, and
/// suspends until `now + 1000/rate_hz` ms. Redraw notifications run through
/// an independent throttle, so emission rate and refresh rate never couple.
/// The driver is the single writer of its series; the series moves into the
/// registry only on completion.
#[derive(Debug)]
pub struct StreamDriver {
    label: String,
    iter: SampleIter,
    series: CurveSeries,
    phase: StreamPhase,
    rate_hz: u32,
    batch_size: usize,
    throttle: RefreshThrottle,
    resume_at_ms: f64,
    cancelled: Arc<AtomicBool>,
}

impl StreamDriver {
    #[must_use]
    pub fn new(
        label: impl Into<String>,
        expr: BoundExpression,
        domain: Domain,
        config: &PlotEngineConfig,
    ) -> Self {
        let label = label.into();
        Self {
            series: CurveSeries::new(label.clone()),
            iter: SampleIter::new(expr, domain),
            label,
            phase: StreamPhase::Idle,
            rate_hz: config.clamped_rate_hz(),
            batch_size: config.batch_size.max(1),
            throttle: RefreshThrottle::new(config.refresh_interval_ms),
            resume_at_ms: f64::NEG_INFINITY,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Runs the probe gate and announces the curve to the surface.
    ///
    /// `Idle → Streaming` on a finite probe, `Idle → Failed` otherwise; a
    /// failed start leaves the surface untouched.
    pub fn start<S: RenderSurface>(&mut self, surface: &mut S) -> StreamPhase {
        if self.phase != StreamPhase::Idle {
            return self.phase;
        }
        if probe(self.iter.expr()) {
            self.phase = StreamPhase::Streaming;
            surface.add_curve(&self.label, &[]);
            debug!(label = %self.label, rate_hz = self.rate_hz, "stream started");
        } else {
            self.phase = StreamPhase::Failed;
            debug!(label = %self.label, "stream rejected by probe");
        }
        self.phase
    }

    /// Advances the stream by at most one batch.
    ///
    /// Cancellation is honored first, then the pacing deadline; both are
    /// checked on every poll, so a poll is also the suspension point.
    pub fn poll<S: RenderSurface>(&mut self, now_ms: f64, surface: &mut S) -> StreamPoll {
        if self.phase != StreamPhase::Streaming {
            return StreamPoll::Inactive(self.phase);
        }

        if self.cancelled.load(Ordering::Relaxed) {
            self.phase = StreamPhase::Cancelled;
            debug!(
                label = %self.label,
                points = self.series.len(),
                "stream cancelled; partial curve kept"
            );
            return StreamPoll::Finished(self.phase);
        }

        if now_ms < self.resume_at_ms {
            return StreamPoll::Waiting {
                resume_at_ms: self.resume_at_ms,
            };
        }

        let mut batch: SmallVec<[SamplePoint; 16]> = SmallVec::new();
        while batch.len() < self.batch_size {
            match self.iter.next() {
                Some(point) if point.is_finite() => batch.push(point),
                Some(point) => {
                    // a sample escaping the evaluator's finite contract is a
                    // fault, not a filterable point
                    self.phase = StreamPhase::Failed;
                    warn!(
                        label = %self.label,
                        x = point.x,
                        y = point.y,
                        "non-finite sample escaped evaluation; stream failed"
                    );
                    return StreamPoll::Finished(self.phase);
                }
                None => break,
            }
        }

        if batch.is_empty() {
            self.phase = StreamPhase::Completed;
            if self.series.is_empty() {
                warn!(label = %self.label, "stream completed with no finite samples");
            }
            // the guaranteed final repaint bypasses the throttle
            surface.invalidate(true);
            self.throttle.mark_forced(now_ms);
            debug!(
                label = %self.label,
                points = self.series.len(),
                "stream completed"
            );
            return StreamPoll::Finished(self.phase);
        }

        self.series.append(&batch);
        surface.append_points(&self.label, &batch);
        if self.throttle.should_refresh(now_ms) {
            surface.invalidate(false);
        }

        self.resume_at_ms = now_ms + pacing_interval_ms(self.rate_hz);
        trace!(
            label = %self.label,
            appended = batch.len(),
            cursor = self.iter.position(),
            resume_at_ms = self.resume_at_ms,
            "stream batch emitted"
        );
        StreamPoll::Progressed {
            appended: batch.len(),
            resume_at_ms: self.resume_at_ms,
        }
    }

    /// Changes the emission rate. Takes effect when the next suspension
    /// deadline is computed; an in-progress wait is never shortened.
    pub fn set_rate_hz(&mut self, rate_hz: u32) {
        self.rate_hz = rate_hz.clamp(MIN_RATE_HZ, MAX_RATE_HZ);
    }

    #[must_use]
    pub fn handle(&self) -> StreamHandle {
        StreamHandle {
            label: self.label.clone(),
            cancelled: Arc::clone(&self.cancelled),
        }
    }

    #[must_use]
    pub fn phase(&self) -> StreamPhase {
        self.phase
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn series(&self) -> &CurveSeries {
        &self.series
    }

    #[must_use]
    pub fn state(&self) -> StreamState {
        StreamState {
            rate_hz: self.rate_hz,
            batch_size: self.batch_size,
            cursor: self.iter.position(),
            cancelled: self.cancelled.load(Ordering::Relaxed),
        }
    }

    /// Consumes the driver, yielding the series it built.
    #[must_use]
    pub fn into_series(self) -> CurveSeries {
        self.series
    }
}

fn pacing_interval_ms(rate_hz: u32) -> f64 {
    1000.0 / f64::from(rate_hz.clamp(MIN_RATE_HZ, MAX_RATE_HZ))
}

#[cfg(test)]
mod tests {
    use super::pacing_interval_ms;

    #[test]
    fn pacing_interval_clamps_rate() {
        assert_eq!(pacing_interval_ms(0), 1000.0);
        assert_eq!(pacing_interval_ms(1), 1000.0);
        assert_eq!(pacing_interval_ms(1000), 1000.0 / 256.0);
        assert_eq!(pacing_interval_ms(100), 10.0);
    }
}
