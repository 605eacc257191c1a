use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::api::engine_config::PlotEngineConfig;
use crate::api::stream::{StreamDriver, StreamHandle, StreamPhase, StreamPoll};
use crate::core::{Axis, CurveSeries, Domain, FunctionRegistry};
use crate::error::{PlotError, PlotResult};
use crate::eval::{BoundExpression, normalize, probe};
use crate::render::RenderSurface;

#[cfg(not(feature = "parallel-sampling"))]
use crate::core::sample;
#[cfg(feature = "parallel-sampling")]
use crate::core::sample_parallel;

/// Main orchestration facade consumed by host shells.
///
/// `PlotEngine` owns the render surface, the function registry, and every
/// active stream driver, which keeps the single-writer-per-series rule a
/// structural property rather than a convention.
pub struct PlotEngine<S: RenderSurface> {
    surface: S,
    config: PlotEngineConfig,
    registry: FunctionRegistry,
    streams: IndexMap<String, StreamDriver>,
}

impl<S: RenderSurface> PlotEngine<S> {
    pub fn new(surface: S, config: PlotEngineConfig) -> PlotResult<Self> {
        config.domain.validate()?;
        Ok(Self {
            surface,
            config,
            registry: FunctionRegistry::new(),
            streams: IndexMap::new(),
        })
    }

    /// Normalizes, probes, samples the whole domain, and registers the
    /// curve. A zero-point curve is benign; whole-expression failures abort
    /// before any registry or surface mutation.
    pub fn plot_batch(&mut self, raw: &str, domain: Domain) -> PlotResult<String> {
        domain.validate()?;
        let (label, expr) = self.prepare(raw)?;
        if !probe(&expr) {
            return Err(PlotError::InvalidExpression(expr.source().to_string()));
        }
        self.cancel_active_stream(&label);

        #[cfg(not(feature = "parallel-sampling"))]
        let points = sample(&expr, domain);
        #[cfg(feature = "parallel-sampling")]
        let points = sample_parallel(&expr, domain);

        debug!(label = %label, points = points.len(), "batch plot");
        if self.registry.contains(&label) {
            self.surface.remove_curve(&label);
        }
        let series = CurveSeries::with_points(label.clone(), points);
        self.surface.add_curve(&label, series.points());
        self.surface.invalidate(true);
        self.registry.add(series);
        Ok(label)
    }

    /// Plots with the configured default domain.
    pub fn plot(&mut self, raw: &str) -> PlotResult<String> {
        self.plot_batch(raw, self.config.domain)
    }

    /// Starts a real-time stream for the equation.
    ///
    /// Any prior stream on the same label is cancelled first, so a series
    /// never has two writers. The returned handle cancels cooperatively;
    /// progress happens in [`PlotEngine::poll_streams`].
    pub fn start_realtime(
        &mut self,
        raw: &str,
        domain: Domain,
        rate_hz: u32,
    ) -> PlotResult<StreamHandle> {
        domain.validate()?;
        let (label, expr) = self.prepare(raw)?;
        self.cancel_active_stream(&label);
        if self.registry.contains(&label) {
            // the completed curve under this label is being re-plotted live
            self.surface.remove_curve(&label);
        }

        let config = self.config.with_rate_hz(rate_hz);
        let canonical = expr.source().to_string();
        let mut driver = StreamDriver::new(label.clone(), expr, domain, &config);
        // the driver's own probe gate decides `Streaming` vs `Failed`
        if driver.start(&mut self.surface) == StreamPhase::Failed {
            return Err(PlotError::InvalidExpression(canonical));
        }
        let handle = driver.handle();
        self.streams.insert(label, driver);
        Ok(handle)
    }

    /// Pumps every active stream once with the host's monotonic clock.
    ///
    /// Completed streams move their series into the registry; cancelled and
    /// failed streams are retired without a registry entry. Returns the
    /// earliest wake deadline among streams still running, if any.
    pub fn poll_streams(&mut self, now_ms: f64) -> Option<f64> {
        let labels: Vec<String> = self.streams.keys().cloned().collect();
        let mut next_wake: Option<f64> = None;
        for label in labels {
            let Some(driver) = self.streams.get_mut(&label) else {
                continue;
            };
            match driver.poll(now_ms, &mut self.surface) {
                StreamPoll::Waiting { resume_at_ms }
                | StreamPoll::Progressed { resume_at_ms, .. } => {
                    next_wake = Some(next_wake.map_or(resume_at_ms, |wake| {
                        if resume_at_ms < wake { resume_at_ms } else { wake }
                    }));
                }
                StreamPoll::Finished(StreamPhase::Completed) => {
                    if let Some(finished) = self.streams.shift_remove(&label) {
                        self.registry.add(finished.into_series());
                    }
                }
                StreamPoll::Finished(StreamPhase::Failed) => {
                    self.streams.shift_remove(&label);
                    let error = PlotError::StreamFailed {
                        label: label.clone(),
                        reason: "evaluation fault escaped the sampling pass".to_owned(),
                    };
                    warn!(error = %error, "stream failed; no registry entry created");
                }
                StreamPoll::Finished(phase) | StreamPoll::Inactive(phase) => {
                    self.streams.shift_remove(&label);
                    debug!(label = %label, phase = ?phase, "stream retired without registration");
                }
            }
        }
        next_wake
    }

    /// Changes the emission rate of an active stream. Takes effect from the
    /// stream's next suspension; the in-progress wait is not shortened.
    pub fn set_stream_rate(&mut self, label: &str, rate_hz: u32) -> PlotResult<()> {
        match self.streams.get_mut(label) {
            Some(driver) => {
                driver.set_rate_hz(rate_hz);
                Ok(())
            }
            None => Err(PlotError::UnknownLabel(label.to_owned())),
        }
    }

    /// Removes a registered function and tears down its rendered curve.
    pub fn remove_function(&mut self, label: &str) -> PlotResult<CurveSeries> {
        self.cancel_active_stream(label);
        let Some(series) = self.registry.remove(label) else {
            return Err(PlotError::UnknownLabel(label.to_owned()));
        };
        self.surface.remove_curve(label);
        self.surface.invalidate(true);
        debug!(label = %label, points = series.len(), "function removed");
        Ok(series)
    }

    /// Removes every function and live stream, tearing down all curves in
    /// one batched redraw.
    pub fn clear_all(&mut self) {
        let mut labels: Vec<String> = self.registry.labels().map(str::to_owned).collect();
        for label in self.streams.keys() {
            if !labels.iter().any(|known| known == label) {
                labels.push(label.clone());
            }
        }
        for driver in self.streams.values() {
            driver.handle().cancel();
        }
        self.streams.clear();
        for label in &labels {
            self.surface.remove_curve(label);
        }
        self.registry.clear();
        self.surface.invalidate(true);
        debug!(removed = labels.len(), "all functions cleared");
    }

    /// Forwards axis bounds to the surface after `min < max` validation on
    /// each axis.
    pub fn set_axis_limits(
        &mut self,
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    ) -> PlotResult<()> {
        validate_axis_bounds(Axis::X, x_min, x_max)?;
        validate_axis_bounds(Axis::Y, y_min, y_max)?;
        self.surface.set_axis_bounds(Axis::X, x_min, x_max);
        self.surface.set_axis_bounds(Axis::Y, y_min, y_max);
        self.surface.invalidate(true);
        Ok(())
    }

    pub fn reset_axes(&mut self) {
        self.surface.reset_axis(Axis::X);
        self.surface.reset_axis(Axis::Y);
        self.surface.invalidate(true);
    }

    #[must_use]
    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    #[must_use]
    pub fn config(&self) -> PlotEngineConfig {
        self.config
    }

    #[must_use]
    pub fn active_stream_count(&self) -> usize {
        self.streams.len()
    }

    #[must_use]
    pub fn stream_phase(&self, label: &str) -> Option<StreamPhase> {
        self.streams.get(label).map(StreamDriver::phase)
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Normalizes and parses, mapping parse failures to a single typed
    /// error; the trimmed raw text becomes the display label.
    fn prepare(&self, raw: &str) -> PlotResult<(String, BoundExpression)> {
        let canonical = normalize(raw)?;
        let expr = BoundExpression::parse(&canonical)
            .map_err(|err| PlotError::InvalidExpression(format!("{canonical}: {err}")))?;
        Ok((raw.trim().to_owned(), expr))
    }

    fn cancel_active_stream(&mut self, label: &str) {
        if let Some(driver) = self.streams.shift_remove(label) {
            driver.handle().cancel();
            self.surface.remove_curve(label);
            debug!(label = %label, "prior stream cancelled before replot");
        }
    }
}

fn validate_axis_bounds(axis: Axis, min: f64, max: f64) -> PlotResult<()> {
    if !min.is_finite() || !max.is_finite() || min >= max {
        return Err(PlotError::InvalidDomain(format!(
            "{axis:?} axis bounds: min {min} must be less than max {max}"
        )));
    }
    Ok(())
}
