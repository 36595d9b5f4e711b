use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber, honoring `RUST_LOG`. Later calls
/// are no-ops, so embedding hosts can call this unconditionally.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
