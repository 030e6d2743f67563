use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "LOCKGRAPH_LOG";

/// Install the stderr subscriber. `LOCKGRAPH_LOG` (then `RUST_LOG`) takes
/// precedence over the default level unless `verbose` is set.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // A subscriber may already be installed when embedded or under test.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
