use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber. `RUST_LOG` wins when set.
pub fn init_logging(verbose: bool) {
    let default = if verbose {
        "deliveryscan=debug,reqwest=warn,hyper=warn"
    } else {
        "deliveryscan=info,reqwest=warn,hyper=warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
