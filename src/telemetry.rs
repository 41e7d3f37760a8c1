use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global tracing subscriber. Logs go to stderr so that command
/// output on stdout stays machine-readable.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects `debug` for this
/// crate and the default is `warn`.
pub fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "tally=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A subscriber may already be installed (e.g. by an embedding binary).
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
