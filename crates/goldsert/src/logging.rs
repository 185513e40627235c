use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging for tests (quiet unless `RUST_LOG` says otherwise).
///
/// Output goes through the libtest capture. Calling this more than once, or
/// after another subscriber was installed, is a no-op.
pub fn init_test_logger() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_test_writer())
        .try_init();
}
