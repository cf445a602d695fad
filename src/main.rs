mod run;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "BUDGETDESK_LOG";

fn main() -> Result<()> {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    run::as_cli(&args)
}

/// Logs go to stderr so report output on stdout stays clean.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
