use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` directives are honoured on top of the crate default, which is
/// `info`, or `debug` when `verbose` is set.
pub fn init_logging(verbose: bool) {
    let directive = if verbose { "apifetch=debug" } else { "apifetch=info" };

    let filter = EnvFilter::from_default_env();
    let filter = match directive.parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
