//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system with an `info` default
///
/// `RUST_LOG` still overrides the default filter.
pub fn init() {
    init_with_level("info");
}

/// Initialize the logging system with a default filter such as `"debug"`
///
/// Safe to call more than once; later calls are ignored.
pub fn init_with_level(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
