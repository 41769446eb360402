use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Defaults to crate-level info, raised to debug by `verbose`. RUST_LOG
/// overrides both.
pub fn init_cli_logger(verbose: bool) {
    let default_filter = if verbose {
        "moodle_notify=debug,info"
    } else {
        "moodle_notify=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
