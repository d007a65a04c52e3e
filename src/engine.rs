// shellbackup/src/engine.rs
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::backup::{BackupRequest, validate_backup_config};
use crate::config::EngineConfig;
use crate::errors::{EngineError, Result};
use crate::mysqld::version::REDO_LOG_DISABLE_MIN;
use crate::mysqld::{MysqlDaemon, ServerVersion, supports_redo_log_disable};
use crate::restore::{RestoreLoadOptions, RestoreParams, RestorePlan, validate_restore_load_options};

/// Decides whether a mysqlsh backup or restore may start.
///
/// Holds its configuration by value and never changes it, so one engine can
/// serve any number of concurrent prechecks.
#[derive(Debug, Clone, Default)]
pub struct ShellBackupEngine {
    config: EngineConfig,
}

impl ShellBackupEngine {
    pub fn new(config: EngineConfig) -> Self {
        ShellBackupEngine { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validates the configured location and flags before dumping into `target`.
    pub fn backup_precheck(&self, target: &Path) -> Result<()> {
        debug!(target = %target.display(), "running backup precheck");
        let verdict = validate_backup_config(&self.config.backup_location, &self.config.flags);
        match &verdict {
            Ok(()) => info!(target = %target.display(), "backup precheck passed"),
            Err(e) => warn!(target = %target.display(), error = %e, "backup precheck failed"),
        }
        verdict
    }

    /// Validates the load options and, with the speed-up toggle on, the server version.
    ///
    /// `cancel` only reaches the version query.
    pub async fn restore_precheck(
        &self,
        cancel: &CancellationToken,
        params: &RestoreParams,
    ) -> Result<RestorePlan> {
        let options = RestoreLoadOptions::parse(&self.config.load_flags)?;
        validate_restore_load_options(&options)?;

        let mut plan = RestorePlan {
            delete_users_before_load: options.load_users(),
            disable_redo_log: false,
        };

        if self.config.speedup_restore {
            let mysqld = params.mysqld.as_deref().ok_or_else(|| {
                EngineError::precheck("speed-up restore is enabled but no mysqld is available")
            })?;
            let version = self.server_version(cancel, mysqld).await?;
            if !supports_redo_log_disable(&version) {
                warn!(%version, "server cannot disable the redo log");
                return Err(EngineError::precheck(format!(
                    "MySQL version doesn't support disabling the redo log (must be >={}, current version {})",
                    REDO_LOG_DISABLE_MIN, version
                )));
            }
            plan.disable_redo_log = true;
        }

        info!(?plan, "restore precheck passed");
        Ok(plan)
    }

    /// Echoes the configured drain toggle; the request is not inspected.
    pub fn should_drain_for_backup(&self, _request: Option<&BackupRequest>) -> bool {
        self.config.should_drain
    }

    async fn server_version(
        &self,
        cancel: &CancellationToken,
        mysqld: &dyn MysqlDaemon,
    ) -> Result<ServerVersion> {
        let limit = self.config.version_query_timeout;
        let raw = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(EngineError::Cancelled),
            res = tokio::time::timeout(limit, mysqld.version_string()) => match res {
                Ok(Ok(raw)) => raw,
                Ok(Err(e)) => return Err(EngineError::VersionQuery(e)),
                Err(_) => return Err(EngineError::Timeout(limit)),
            },
        };
        debug!(version = %raw, "server reported version");
        raw.parse()
    }
}
