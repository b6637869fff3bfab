use tracing_subscriber::EnvFilter;

use crate::args::LogArgs;

/// Installs the global subscriber. Logs go to stderr so stdout carries only results.
pub fn init_logger(args: &LogArgs) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.filter.as_str()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if args.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
