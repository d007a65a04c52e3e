// shellbackup/src/mysqld/fake.rs
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::MysqlDaemon;

pub const DEFAULT_FAKE_VERSION: &str = "8.0.32";

/// In-process stand-in for a mysqld, used by tests.
pub struct FakeMysqlDaemon {
    version: Mutex<String>,
    failure: Mutex<Option<String>>,
    delay: Mutex<Option<Duration>>,
    version_queries: AtomicUsize,
}

impl Default for FakeMysqlDaemon {
    fn default() -> Self {
        FakeMysqlDaemon::with_version(DEFAULT_FAKE_VERSION)
    }
}

impl FakeMysqlDaemon {
    pub fn with_version(version: &str) -> Self {
        FakeMysqlDaemon {
            version: Mutex::new(version.to_string()),
            failure: Mutex::new(None),
            delay: Mutex::new(None),
            version_queries: AtomicUsize::new(0),
        }
    }

    pub fn set_version(&self, version: &str) {
        *lock(&self.version) = version.to_string();
    }

    /// Makes every following version query fail with `message`.
    pub fn fail_with(&self, message: &str) {
        *lock(&self.failure) = Some(message.to_string());
    }

    /// Makes every following version query sleep before answering.
    pub fn stall_for(&self, delay: Duration) {
        *lock(&self.delay) = Some(delay);
    }

    pub fn version_queries(&self) -> usize {
        self.version_queries.load(Ordering::SeqCst)
    }
}

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl MysqlDaemon for FakeMysqlDaemon {
    async fn version_string(&self) -> Result<String> {
        self.version_queries.fetch_add(1, Ordering::SeqCst);
        let delay = *lock(&self.delay);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = lock(&self.failure).clone() {
            return Err(anyhow::anyhow!(message));
        }
        Ok(lock(&self.version).clone())
    }
}
