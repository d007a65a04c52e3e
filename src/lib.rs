//! Prechecks for the MySQL Shell backup engine.
//!
//! Decides whether a `mysqlsh` based backup or restore may start, and whether
//! the tablet has to be drained first. Running the backup itself is somebody
//! else's job.

pub mod backup;
pub mod config;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod mysqld;
pub mod restore;

pub use backup::BackupRequest;
pub use config::EngineConfig;
pub use engine::ShellBackupEngine;
pub use errors::{EngineError, Result};
pub use mysqld::{FakeMysqlDaemon, MysqlDaemon, ServerVersion, SqlxMysqld};
pub use restore::{RestoreParams, RestorePlan};
