use tracing_subscriber::EnvFilter;

/// JSON lines on stdout for CloudWatch Logs. Timestamps are left to CloudWatch.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_target(false)
        .with_current_span(false)
        .with_ansi(false)
        .without_time()
        .init();
}
