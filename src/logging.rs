use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "REMINDME_LOG";
const DEFAULT_FILTER: &str = "warn";

/// Builds the filter from `REMINDME_LOG`, falling back to `warn`.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. Output goes to stderr so command output
/// on stdout stays pipeable. Calling it twice is harmless.
pub fn init(json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = if json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
}
