// shellbackup/src/backup/validate.rs
use crate::errors::{EngineError, Result};

/// Flag that puts mysqlsh into non-interactive JavaScript mode; `util.dumpInstance` needs it.
pub const SCRIPT_MODE_FLAG: &str = "--js";

/// Checks that the configured location and mysqlsh flags allow an unattended dump.
///
/// Stops at the first problem found.
pub fn validate_backup_config(location: &str, flags: &str) -> Result<()> {
    if location.is_empty() {
        return Err(EngineError::precheck(
            "no backup location set via MYSQL_SHELL_BACKUP_LOCATION",
        ));
    }
    if !has_script_mode(flags) {
        return Err(EngineError::precheck(format!(
            "at least the {} flag is required in the mysqlsh flags",
            SCRIPT_MODE_FLAG
        )));
    }
    if !has_connection_target(flags) {
        return Err(EngineError::precheck(
            "the mysqlsh flags must name a server to connect to (-h/--host, --uri or -S/--socket)",
        ));
    }
    Ok(())
}

fn has_script_mode(flags: &str) -> bool {
    flags.split_whitespace().any(|token| token == SCRIPT_MODE_FLAG)
}

/// Options that never take a value, so a token after them is not their argument.
const SWITCHES: &[&str] = &[
    "--js", "--javascript", "--py", "--python", "--sql", "--sqlc", "--sqlx",
    "--no-wizard", "--nw", "--no-password", "--interactive", "--quiet-start",
];

/// Options taking the server as their next token.
const TARGET_OPTIONS: &[&str] = &["-h", "--host", "--uri", "-S", "--socket"];

/// Options taking the server inline, as in `--host=db1`.
const TARGET_PREFIXES: &[&str] = &["--host=", "--uri=", "--socket="];

/// Single-dash words that start with `-h` but are not `-hHOST`.
const NOT_SHORT_HOST: &[&str] = &["-help"];

fn has_connection_target(flags: &str) -> bool {
    let tokens: Vec<&str> = flags.split_whitespace().collect();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i];
        let next = tokens.get(i + 1).copied().filter(|t| !t.starts_with('-'));

        if TARGET_OPTIONS.contains(&token) {
            if next.is_some() {
                return true;
            }
        } else if let Some(value) = TARGET_PREFIXES.iter().find_map(|p| token.strip_prefix(*p)) {
            if !value.is_empty() {
                return true;
            }
        } else if is_short_host(token) || is_bare_uri(token) {
            return true;
        } else if token.starts_with('-') && !token.contains('=') && !SWITCHES.contains(&token) {
            // the next plain token is this option's value, not a URI
            if next.is_some() {
                i += 1;
            }
        }
        i += 1;
    }
    false
}

fn is_short_host(token: &str) -> bool {
    token.len() > 2
        && token.starts_with("-h")
        && !token.starts_with("--")
        && !NOT_SHORT_HOST.contains(&token)
}

/// `user@host[:port]`, optionally with a `mysql://` or `mysqlx://` scheme.
fn is_bare_uri(token: &str) -> bool {
    if token.starts_with('-') {
        return false;
    }
    let rest = token
        .strip_prefix("mysql://")
        .or_else(|| token.strip_prefix("mysqlx://"))
        .unwrap_or(token);
    match rest.split_once('@') {
        Some((user, host)) => !user.is_empty() && !host.is_empty() && !user.contains('/'),
        None => false,
    }
}
