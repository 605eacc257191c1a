//! Tracing bootstrap for hosts embedding `plotfn`.
//!
//! Nothing here runs implicitly. A shell that wants the crate's spans and
//! events on stderr calls [`init_default_tracing`] once at startup; anything
//! more elaborate wires its own `tracing` subscriber instead.

/// Installs a compact stderr subscriber when the `telemetry` feature is on.
///
/// The filter honors `RUST_LOG` and falls back to `info`. Returns `false`
/// when the feature is disabled or another global subscriber won the race.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
