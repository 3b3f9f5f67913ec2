//! Tracing setup for the dashboard binaries.
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the host. `init_default_tracing` covers the common case.

/// Initializes a compact `tracing` subscriber filtered by `RUST_LOG`,
/// falling back to `info` when the variable is unset or invalid.
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber was already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_fallback("info")
}

/// Same as [`init_default_tracing`] with an explicit fallback directive
/// (for example `"econ_dash=debug"`).
#[must_use]
pub fn init_tracing_with_fallback(fallback_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_directive)),
            )
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directive;
        false
    }
}
