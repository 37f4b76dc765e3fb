//! Logging initialization utilities.

use env_logger::Env;

/// Initialize logging with a default filter level.
///
/// Degraded-mode events (missing favicon store, discarded rows) are logged
/// at `warn`/`debug`, so `warn` is the default threshold.
pub fn init() {
    let env = Env::default().default_filter_or("warn");
    env_logger::Builder::from_env(env).init();
}
