//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber. `RUST_LOG` wins when set; otherwise only
/// warnings are shown, or debug output with `--verbose`.
pub fn init(verbose: bool) {
    let fallback = if verbose {
        "timelog_core=debug,timelog_cli=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
