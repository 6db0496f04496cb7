use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::stderr_buffer::BufferedStderr;

/// Overrides the log filter, e.g. `EXOHAB_LOG=exohab::store=trace`
pub const ENV_LOG: &str = "EXOHAB_LOG";

/// Filter directive used when `EXOHAB_LOG` is unset
pub fn default_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Install the global subscriber. Output goes to stderr, or into the
/// stderr buffer while the dashboard owns the terminal.
pub fn init_tracing(verbose: bool) -> Result<()> {
    let filter = EnvFilter::try_from_env(ENV_LOG)
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(|| BufferedStderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
