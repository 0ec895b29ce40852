use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes console logging for the binaries.
///
/// Library users are expected to install their own subscriber; this is only
/// called from the CLI entry points.
pub fn init_logging() {
    let console_layer = fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(
            EnvFilter::from_default_env()
                .add_directive("opds2=info".parse().expect("static directive parses")),
        )
        .with(console_layer)
        .init();
}
