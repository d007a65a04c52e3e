pub mod load_options;

use std::sync::Arc;

use crate::mysqld::MysqlDaemon;

pub use load_options::{RestoreLoadOptions, validate_restore_load_options};

/// Inputs to a restore precheck.
#[derive(Clone, Default)]
pub struct RestoreParams {
    /// Server being restored into. Only consulted when the speed-up toggle is on.
    pub mysqld: Option<Arc<dyn MysqlDaemon>>,
}

impl RestoreParams {
    pub fn with_mysqld(mysqld: Arc<dyn MysqlDaemon>) -> Self {
        RestoreParams { mysqld: Some(mysqld) }
    }
}

/// What the restore driver must do once the precheck passed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestorePlan {
    /// `loadUsers` is on, so existing non-reserved accounts must go before the load.
    pub delete_users_before_load: bool,
    /// Redo logging can be switched off for the duration of the load.
    pub disable_redo_log: bool,
}
