pub mod validate;

use serde::{Deserialize, Serialize};

pub use validate::validate_backup_config;

/// What a tablet-manager backup RPC asks for.
///
/// The drain policy accepts it but does not look inside.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupRequest {
    pub concurrency: i32,
    pub allow_primary: bool,
    pub incremental_from_pos: String,
    pub upgrade_safe: bool,
    pub backup_engine: Option<String>,
}
