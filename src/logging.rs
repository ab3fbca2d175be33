use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter, e.g. `SKINLEDGER_LOG=debug`.
pub const LOG_ENV: &str = "SKINLEDGER_LOG";

// Logs go to stderr so table output on stdout stays pipeable.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .compact()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
