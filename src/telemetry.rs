//! Opt-in tracing setup for hosts and the bundled tools.
//!
//! The crate only emits `tracing` events. Hosts that already run a
//! subscriber should skip this module entirely.

/// Default filter: session-level events at `info`, stale image loads and
/// drag traces hidden.
pub const DEFAULT_FILTER: &str = "microscope_sim=info";

/// Filter used by the tools' `--verbose` flag.
pub const VERBOSE_FILTER: &str = "microscope_sim=trace";

/// Subscriber settings. `RUST_LOG` still wins over `filter` when set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    pub filter: String,
    /// Print the emitting module next to each event.
    pub with_target: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_owned(),
            with_target: true,
        }
    }
}

impl TelemetryConfig {
    #[must_use]
    pub fn verbose() -> Self {
        Self {
            filter: VERBOSE_FILTER.to_owned(),
            ..Self::default()
        }
    }
}

/// Installs a compact `fmt` subscriber when the `telemetry` feature is on.
///
/// Returns `false` when the feature is off or a global subscriber is
/// already installed.
#[must_use]
pub fn init_tracing(config: &TelemetryConfig) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.filter));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(config.with_target)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = config;
        false
    }
}

#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing(&TelemetryConfig::default())
}
