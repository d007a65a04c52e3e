// shellbackup/src/mysqld/mod.rs
pub mod fake;
pub mod version;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use url::Url;

pub use fake::FakeMysqlDaemon;
pub use version::{ServerVersion, supports_redo_log_disable};

/// The slice of a running mysqld the prechecks need.
#[async_trait]
pub trait MysqlDaemon: Send + Sync {
    /// Raw version string as reported by the server, e.g. `8.0.32-0ubuntu0.22.04.2`.
    async fn version_string(&self) -> Result<String>;
}

/// Live server reached through a single-connection sqlx pool.
pub struct SqlxMysqld {
    pool: MySqlPool,
    display_url: String,
}

impl SqlxMysqld {
    /// Does not connect; the first query does.
    pub fn connect_lazy(db_url: &str) -> Result<Self> {
        let display_url = redact_password(db_url)?;
        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .connect_lazy(db_url)
            .with_context(|| format!("Invalid MySQL connection URL: {}", display_url))?;
        Ok(SqlxMysqld { pool, display_url })
    }

    pub fn display_url(&self) -> &str {
        &self.display_url
    }
}

#[async_trait]
impl MysqlDaemon for SqlxMysqld {
    async fn version_string(&self) -> Result<String> {
        tracing::debug!(url = %self.display_url, "querying server version");
        sqlx::query_scalar::<_, String>("SELECT @@global.version")
            .fetch_one(&self.pool)
            .await
            .with_context(|| format!("Failed to read @@global.version from {}", self.display_url))
    }
}

/// Replaces the password component of a connection URL so it can be logged.
pub fn redact_password(db_url: &str) -> Result<String> {
    let mut parsed = Url::parse(db_url)
        .with_context(|| "Invalid MySQL connection URL format".to_string())?;
    if parsed.password().is_some() {
        // set_password only fails for cannot-be-a-base URLs, which have no password anyway
        let _ = parsed.set_password(Some("xxxxx"));
    }
    Ok(parsed.to_string())
}
