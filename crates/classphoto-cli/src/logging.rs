//! Log output for the `classphoto` binary.
//!
//! Every decision and warning of a run is reported through `tracing` and
//! printed to stderr. `RUST_LOG` overrides the level chosen on the command line.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the stderr subscriber. `default_level` applies when `RUST_LOG` is unset.
pub fn init(default_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).compact())
        .try_init()?;
    Ok(())
}
