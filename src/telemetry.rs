//! Telemetry helpers for hosts embedding `power-mix-chart`.
//!
//! The pipeline only emits `tracing` events (load summaries, dropped rows,
//! selection changes). Installing a subscriber stays the host's decision:
//! call `init_default_tracing` or wire your own.

/// Installs a compact `tracing` subscriber when the `telemetry` feature is enabled.
///
/// The filter comes from `RUST_LOG` and falls back to `info`. Dropped-row
/// diagnostics are emitted at `debug`/`trace`, so use
/// `RUST_LOG=power_mix_chart=trace` to see every silently excluded row.
///
/// Returns `false` when the feature is disabled or a global subscriber is
/// already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
