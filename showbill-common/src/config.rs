//! Configuration loading and database path resolution

use std::net::SocketAddr;
use std::path::PathBuf;

/// Default listen address when neither `--bind` nor `SHOWBILL_BIND` is set
pub const DEFAULT_BIND: &str = "127.0.0.1:5730";

/// Resolve the database file path following the priority order:
/// 1. Command-line argument (highest priority)
/// 2. `SHOWBILL_DATABASE` environment variable
/// 3. `database` key in the TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_database_path(cli_arg: Option<&str>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var("SHOWBILL_DATABASE") {
        return PathBuf::from(path);
    }

    // Priority 3: TOML config file
    if let Some(path) = database_from_config_file() {
        return path;
    }

    // Priority 4: OS-dependent compiled default
    default_database_path()
}

/// Parse a bind address, falling back to the compiled default on bad input.
pub fn resolve_bind_addr(bind: &str) -> SocketAddr {
    bind.parse().unwrap_or_else(|_| {
        tracing::warn!("Invalid bind address {:?}, using {}", bind, DEFAULT_BIND);
        DEFAULT_BIND.parse().expect("default bind address parses")
    })
}

/// Read the `database` key from `<config_dir>/showbill/config.toml`, if the
/// file exists and parses. A missing or malformed file falls through to the
/// compiled default so startup stays zero-config.
fn database_from_config_file() -> Option<PathBuf> {
    let config_path = dirs::config_dir()?.join("showbill").join("config.toml");
    let content = std::fs::read_to_string(&config_path).ok()?;
    let config: toml::Value = toml::from_str(&content).ok()?;
    config
        .get("database")
        .and_then(|v| v.as_str())
        .map(PathBuf::from)
}

/// OS-dependent default database location
fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("showbill").join("showbill.db"))
        .unwrap_or_else(|| PathBuf::from("./showbill.db"))
}
