use tracing_subscriber::EnvFilter;

/// Initialize structured logging for the `vigil` binary.
///
/// `RUST_LOG` takes precedence when set. Otherwise the requested level
/// applies to the vigil crates and everything else stays at `warn`.
pub fn init(log_level: &str) {
    let default_directives = format!(
        "warn,vigil_cli={log_level},vigil_engine={log_level},\
         vigil_graph={log_level},vigil_state={log_level}"
    );
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}
