// shellbackup/src/config/mod.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_FLAGS: &str = "--defaults-file=/dev/null --js -h localhost";
pub const DEFAULT_LOAD_FLAGS: &str = r#"{"threads": 4, "loadUsers": true, "updateGtidSet": "replace", "skipBinlog": true, "progressFile": ""}"#;
pub const DEFAULT_VERSION_QUERY_TIMEOUT_SECS: u64 = 30;

pub const ENV_BACKUP_LOCATION: &str = "MYSQL_SHELL_BACKUP_LOCATION";
pub const ENV_FLAGS: &str = "MYSQL_SHELL_FLAGS";
pub const ENV_LOAD_FLAGS: &str = "MYSQL_SHELL_LOAD_FLAGS";
pub const ENV_SHOULD_DRAIN: &str = "MYSQL_SHELL_SHOULD_DRAIN";
pub const ENV_SPEEDUP_RESTORE: &str = "MYSQL_SHELL_SPEEDUP_RESTORE";
pub const ENV_VERSION_QUERY_TIMEOUT_SECS: &str = "MYSQL_SHELL_VERSION_QUERY_TIMEOUT_SECS";

// Structs for deserializing config.json
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawJsonConfig {
    pub backup_location: Option<String>,
    pub flags: Option<String>,
    /// Either a JSON object or the same object already serialized as a string.
    pub load_flags: Option<serde_json::Value>,
    pub should_drain: Option<bool>,
    pub speedup_restore: Option<bool>,
    pub version_query_timeout_secs: Option<u64>,
}

/// Settings read by every precheck. Built once, never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Directory the shell utility dumps into.
    pub backup_location: String,
    /// Command-line flags passed to `mysqlsh`.
    pub flags: String,
    /// JSON options for `util.loadDump()`.
    pub load_flags: String,
    pub should_drain: bool,
    pub speedup_restore: bool,
    pub version_query_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            backup_location: String::new(),
            flags: DEFAULT_FLAGS.to_string(),
            load_flags: DEFAULT_LOAD_FLAGS.to_string(),
            should_drain: false,
            speedup_restore: false,
            version_query_timeout: Duration::from_secs(DEFAULT_VERSION_QUERY_TIMEOUT_SECS),
        }
    }
}

impl EngineConfig {
    /// Defaults, overlaid with `config_path` when it exists, overlaid with the environment.
    pub fn load(config_path: &Path) -> Result<Self> {
        let mut config = EngineConfig::default();
        if config_path.exists() {
            let raw = RawJsonConfig::load_from_json(config_path)?;
            config.apply_raw(raw).with_context(|| {
                format!("Invalid settings in config file at {}", config_path.display())
            })?;
        } else {
            tracing::debug!(path = %config_path.display(), "config file not found, using defaults");
        }
        config.apply_env(|key| env::var(key).ok())?;
        Ok(config)
    }

    pub fn apply_raw(&mut self, raw: RawJsonConfig) -> Result<()> {
        if let Some(location) = raw.backup_location {
            self.backup_location = location;
        }
        if let Some(flags) = raw.flags {
            self.flags = flags;
        }
        if let Some(load_flags) = raw.load_flags {
            self.load_flags = match load_flags {
                serde_json::Value::String(s) => s,
                serde_json::Value::Object(map) => serde_json::to_string(&map)
                    .context("Failed to serialize load_flags")?,
                other => {
                    return Err(anyhow::anyhow!(
                        "load_flags must be a JSON object or a string, got: {}",
                        other
                    ));
                }
            };
        }
        if let Some(should_drain) = raw.should_drain {
            self.should_drain = should_drain;
        }
        if let Some(speedup) = raw.speedup_restore {
            self.speedup_restore = speedup;
        }
        if let Some(secs) = raw.version_query_timeout_secs {
            self.version_query_timeout = timeout_from_secs("version_query_timeout_secs", secs)?;
        }
        Ok(())
    }

    /// `lookup` abstracts `std::env::var` so overrides can be tested without touching the process environment.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(location) = lookup(ENV_BACKUP_LOCATION) {
            self.backup_location = location;
        }
        if let Some(flags) = lookup(ENV_FLAGS) {
            self.flags = flags;
        }
        if let Some(load_flags) = lookup(ENV_LOAD_FLAGS) {
            self.load_flags = load_flags;
        }
        if let Some(value) = lookup(ENV_SHOULD_DRAIN) {
            self.should_drain = parse_bool(ENV_SHOULD_DRAIN, &value)?;
        }
        if let Some(value) = lookup(ENV_SPEEDUP_RESTORE) {
            self.speedup_restore = parse_bool(ENV_SPEEDUP_RESTORE, &value)?;
        }
        if let Some(value) = lookup(ENV_VERSION_QUERY_TIMEOUT_SECS) {
            let secs: u64 = value.trim().parse().with_context(|| {
                format!("{} must be a whole number of seconds, got {:?}", ENV_VERSION_QUERY_TIMEOUT_SECS, value)
            })?;
            self.version_query_timeout = timeout_from_secs(ENV_VERSION_QUERY_TIMEOUT_SECS, secs)?;
        }
        Ok(())
    }
}

impl RawJsonConfig {
    pub fn load_from_json(config_path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;
        serde_json::from_str(&config_content).with_context(|| {
            format!(
                "Failed to parse JSON from config file at {}",
                config_path.display()
            )
        })
    }
}

/// A zero timeout would fail every version query before it is sent.
fn timeout_from_secs(key: &str, secs: u64) -> Result<Duration> {
    if secs == 0 {
        return Err(anyhow::anyhow!("{} must be at least 1 second", key));
    }
    Ok(Duration::from_secs(secs))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(anyhow::anyhow!("{} must be a boolean, got {:?}", key, value)),
    }
}
