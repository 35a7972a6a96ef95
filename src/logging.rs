use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. Logs go to stderr so they never
/// mix with the extracted ids or the status line on stdout. `RUST_LOG`
/// overrides the default `warn` level.
pub fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if result.is_err() {
        tracing::warn!("tracing subscriber already set; skipping re-initialization");
    }
}
