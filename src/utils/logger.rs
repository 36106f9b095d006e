use once_cell::sync::OnceCell;
use tracing_log::LogTracer;
use tracing_subscriber::EnvFilter;

static INIT: OnceCell<()> = OnceCell::new();

/// Installs the tracing subscriber and the `log` bridge.
///
/// Opt-in and idempotent: the runtime never touches process-wide logging on
/// its own, callers decide whether to wire it. Filtering follows `RUST_LOG`,
/// defaulting to `info`.
pub fn init_logging() {
    INIT.get_or_init(|| {
        let _ = LogTracer::init();

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init();
    });
}
