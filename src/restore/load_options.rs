// shellbackup/src/restore/load_options.rs
use serde_json::{Map, Value};

use crate::errors::{EngineError, Result};

/// The only GTID merge mode that leaves the restored tablet replicating correctly.
pub const SUPPORTED_GTID_POLICY: &str = "replace";

pub const KEY_UPDATE_GTID_SET: &str = "updateGtidSet";
pub const KEY_PROGRESS_FILE: &str = "progressFile";
pub const KEY_LOAD_USERS: &str = "loadUsers";

/// Options handed to `util.loadDump()`. Unknown keys are kept as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct RestoreLoadOptions {
    entries: Map<String, Value>,
}

impl RestoreLoadOptions {
    /// Parse failures and non-object documents are precheck failures too.
    pub fn parse(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw).map_err(|e| {
            EngineError::precheck(format!("unable to parse JSON of load flags: {}", e))
        })?;
        match value {
            Value::Object(entries) => Ok(RestoreLoadOptions { entries }),
            other => Err(EngineError::precheck(format!(
                "load flags must be a JSON object, got: {}",
                other
            ))),
        }
    }

    pub fn update_gtid_set(&self) -> Option<&str> {
        self.entries.get(KEY_UPDATE_GTID_SET).and_then(Value::as_str)
    }

    pub fn progress_file(&self) -> Option<&str> {
        self.entries.get(KEY_PROGRESS_FILE).and_then(Value::as_str)
    }

    /// Whether mysqlsh will recreate accounts from the dump.
    pub fn load_users(&self) -> bool {
        self.entries
            .get(KEY_LOAD_USERS)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.entries
    }
}

pub fn validate_restore_load_options(options: &RestoreLoadOptions) -> Result<()> {
    match options.update_gtid_set() {
        Some(SUPPORTED_GTID_POLICY) => Ok(()),
        Some(other) => Err(EngineError::precheck(format!(
            "mysql-shell needs to restore with {} set to {:?}, got {:?}",
            KEY_UPDATE_GTID_SET, SUPPORTED_GTID_POLICY, other
        ))),
        None => Err(EngineError::precheck(format!(
            "mysql-shell needs to restore with {} set to {:?}",
            KEY_UPDATE_GTID_SET, SUPPORTED_GTID_POLICY
        ))),
    }
}
