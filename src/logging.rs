//! Tracing setup shared by the binaries.
//!
//! Configure via `RUST_LOG`:
//! - `RUST_LOG=debug` - table sizes and per-stage progress
//! - `RUST_LOG=kllemit::layers=debug` - module-level filtering
//!
//! Output goes to stderr so stdout stays reserved for the artifact.

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}
