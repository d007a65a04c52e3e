// shellbackup/src/mysqld/version.rs
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::errors::EngineError;

static VERSION_TRIPLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\.(\d+)\.(\d+)").expect("version regex is valid"));

/// First release where `ALTER INSTANCE DISABLE INNODB REDO_LOG` exists.
pub const REDO_LOG_DISABLE_MIN: ServerVersion = ServerVersion::new(8, 0, 21);

/// A `major.minor.patch` server version. Field order gives the comparison order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServerVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ServerVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        ServerVersion { major, minor, patch }
    }

    pub fn at_least(&self, other: &ServerVersion) -> bool {
        self >= other
    }
}

impl FromStr for ServerVersion {
    type Err = EngineError;

    /// Accepts `8.0.32`, `8.0.32-log`, `8.0.32-0ubuntu0.22.04.2` and
    /// `mysqld  Ver 8.0.32 for Linux on x86_64`. Suffixes are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidVersion(s.to_string());
        let caps = VERSION_TRIPLE.captures(s).ok_or_else(invalid)?;
        let part = |i: usize| caps[i].parse::<u32>().map_err(|_| invalid());
        Ok(ServerVersion::new(part(1)?, part(2)?, part(3)?))
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

pub fn supports_redo_log_disable(version: &ServerVersion) -> bool {
    version.at_least(&REDO_LOG_DISABLE_MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> ServerVersion {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_plain_and_decorated_versions() {
        assert_eq!(v("8.0.32"), ServerVersion::new(8, 0, 32));
        assert_eq!(v("8.0.32-log"), ServerVersion::new(8, 0, 32));
        assert_eq!(v("8.0.32-0ubuntu0.22.04.2"), ServerVersion::new(8, 0, 32));
        assert_eq!(v("mysqld  Ver 8.4.0 for Linux on x86_64"), ServerVersion::new(8, 4, 0));
        assert_eq!(v("5.7.44").to_string(), "5.7.44");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "eight", "8.0", "8..1", "99999999999.0.1"] {
            let err = bad.parse::<ServerVersion>().unwrap_err();
            assert!(matches!(err, EngineError::InvalidVersion(_)), "{bad}");
        }
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        assert!(v("8.0.21") > v("8.0.20"));
        assert!(v("8.1.0") > v("8.0.99"));
        assert!(v("9.0.0") > v("8.99.99"));
        assert!(v("5.7.44") < v("8.0.0"));
        // numeric, not string, comparison
        assert!(v("8.0.100") > v("8.0.21"));
    }

    #[test]
    fn test_redo_log_threshold() {
        assert!(!supports_redo_log_disable(&v("8.0.20")));
        assert!(supports_redo_log_disable(&v("8.0.21")));
        assert!(supports_redo_log_disable(&v("8.0.32")));
        assert!(supports_redo_log_disable(&v("8.4.0")));
        assert!(!supports_redo_log_disable(&v("5.7.44")));
    }

    #[test]
    fn test_redo_log_gating_is_monotonic() {
        let mut versions = Vec::new();
        for major in [5, 8, 9] {
            for minor in [0, 1, 7] {
                for patch in [0, 20, 21, 22, 100] {
                    versions.push(ServerVersion::new(major, minor, patch));
                }
            }
        }
        versions.sort();
        let first_supported = versions
            .iter()
            .position(supports_redo_log_disable)
            .unwrap();
        assert!(versions[..first_supported].iter().all(|x| !supports_redo_log_disable(x)));
        assert!(versions[first_supported..].iter().all(supports_redo_log_disable));
    }
}
