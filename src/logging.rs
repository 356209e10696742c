//! Journalisation structurée (tracing)

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialise le journal global sur stderr
///
/// `RUST_LOG` est prioritaire ; sinon `--verbose` passe en debug.
pub fn init(verbose: bool) {
    let default_level = if verbose { "diagelec=debug,info" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .try_init();
}
