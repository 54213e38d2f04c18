#![forbid(unsafe_code)]

mod toy_bed;

pub use toy_bed::{build_toy_bed, ToyBed, ToyBedConfig};

/// Install a `tracing` subscriber honoring `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
