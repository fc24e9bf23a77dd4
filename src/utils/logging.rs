use tracing::Level;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Install the global tracing subscriber. `RUST_LOG` overrides the defaults;
/// `debug_logging` raises the crate's own level to debug.
pub fn init_logging(debug_logging: bool) {
    let base_level = if debug_logging {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let env_filter = EnvFilter::from_default_env().add_directive(base_level.into());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer());

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set up tracing subscriber");
}
