use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Every configuration or capability problem found by a precheck.
    #[error("{}", precheck_message(.0))]
    PreCheckFailed(Option<String>),

    #[error("unable to fetch MySQL version: {0}")]
    VersionQuery(#[source] anyhow::Error),

    #[error("unable to parse MySQL version {0:?}")]
    InvalidVersion(String),

    #[error("version query cancelled")]
    Cancelled,

    #[error("version query timed out after {0:?}")]
    Timeout(Duration),
}

fn precheck_message(detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!("MySQLShellPreCheckError: {}", detail),
        None => "MySQLShellPreCheckError".to_string(),
    }
}

impl EngineError {
    pub fn precheck(detail: impl Into<String>) -> Self {
        EngineError::PreCheckFailed(Some(detail.into()))
    }

    /// Category check used by callers instead of matching on messages.
    pub fn is_precheck_failure(&self) -> bool {
        matches!(self, EngineError::PreCheckFailed(_))
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
