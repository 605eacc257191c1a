mod engine;
mod engine_config;
mod refresh;
mod stream;

pub use engine::PlotEngine;
pub use engine_config::{
    DEFAULT_BATCH_SIZE, DEFAULT_REFRESH_INTERVAL_MS, MAX_RATE_HZ, MIN_RATE_HZ, PlotEngineConfig,
};
pub use refresh::RefreshThrottle;
pub use stream::{StreamDriver, StreamHandle, StreamPhase, StreamPoll, StreamState};
