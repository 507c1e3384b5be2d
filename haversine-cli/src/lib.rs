//! Shared plumbing for the `haversine` and `haversine-gen` binaries.

pub mod error;
pub mod profile;
pub mod validate;

use tracing_subscriber::EnvFilter;

pub use profile::{Profile, Profiler};
pub use error::CliError;
pub use validate::Report;

/// Log to stderr, `warn` and above unless `RUST_LOG` says otherwise.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
