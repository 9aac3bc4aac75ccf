use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "expense_tracker_core=info";

/// Install the global `tracing` subscriber.
///
/// Honours `RUST_LOG`; falls back to `expense_tracker_core=info`.
/// Calling it again is a no-op, as is calling it after another
/// subscriber was installed.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
