//! Shared setup for the runnable demos under `demos/`

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `RUST_LOG`, defaulting to `info`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A second call (or a host subscriber) is not an error for a demo
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Directory holding the demo decision documents
pub fn decisions_dir() -> std::path::PathBuf {
    std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("demos")
        .join("decisions")
}
