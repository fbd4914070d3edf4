pub mod database;
pub mod server;
pub mod sweeper;

use std::env;

/// Read a numeric environment variable, falling back to `default` when it is
/// unset or unparsable.
pub(crate) fn parse_env<T: std::str::FromStr>(var_name: &str, default: T) -> T {
    env::var(var_name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}
