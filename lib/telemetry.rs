//! Opt-in logging setup.
//!
//! Styling only emits `tracing` events (targets under `pubstyle`). A host
//! application either calls one of the functions here or installs its own
//! subscriber.

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_DIRECTIVES: &str = "pubstyle=info";

/// Install a compact subscriber for styling events, filtered by `RUST_LOG`
/// with [`DEFAULT_DIRECTIVES`] as the fallback.
///
/// Returns `false` if the `telemetry` feature is off or a global subscriber
/// is already in place.
#[must_use]
pub fn init_default_tracing() -> bool { init_tracing_with(DEFAULT_DIRECTIVES) }

/// Like [`init_default_tracing`], but with a caller-supplied fallback filter,
/// e.g. `"pubstyle=trace"` to follow every cycle draw.
#[must_use]
pub fn init_tracing_with(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;
        let filter = match EnvFilter::try_from_default_env() {
            Ok(from_env) => from_env,
            Err(_) => EnvFilter::new(fallback),
        };
        tracing_subscriber::fmt()
            .compact()
            .without_time()
            .with_env_filter(filter)
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_refused() {
        let _ = init_tracing_with("pubstyle=trace");
        assert!(!init_default_tracing());
    }
}
