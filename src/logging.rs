use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber, writing to stderr so stdout stays
/// free for the run summary.
///
/// `RUST_LOG` takes precedence over `default_level`.
pub fn init(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
