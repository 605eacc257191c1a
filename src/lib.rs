//! plotfn: function plotting engine.
//!
//! This crate turns loosely-formatted algebraic text in one free variable
//! into curve samples, plotted either in a single batch pass or streamed
//! incrementally under a paced, cancellable real-time driver. Rendering is
//! delegated to a host-provided [`render::RenderSurface`] so the engine
//! stays free of any GUI toolkit.
//!
//! `log` in the expression grammar denotes the natural logarithm.

pub mod api;
pub mod core;
pub mod error;
pub mod eval;
pub mod render;
pub mod telemetry;

pub use api::{PlotEngine, PlotEngineConfig};
pub use error::{PlotError, PlotResult};
