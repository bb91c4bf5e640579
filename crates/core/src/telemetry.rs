use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when `RUST_LOG` is unset. Request spans from `tower_http`
/// are only interesting when something goes wrong upstream.
const DEFAULT_FILTER: &str = "info,tower_http=warn";

/// Initialise the global tracing subscriber.
pub fn init() {
    init_with(DEFAULT_FILTER);
}

/// Initialise tracing with an explicit fallback directive.
///
/// A second call is a no-op, so binaries and tests can both call it.
pub fn init_with(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = fmt().with_env_filter(filter).with_target(true).try_init();
}
