//! libpq password file support
//!
//! When the configuration carries no database password, the connector falls
//! back to the password file the same way `psql` does: `$PGPASSFILE` if set,
//! otherwise `~/.pgpass`.
//!
//! Each non-comment line is `hostname:port:database:username:password`. The
//! first four fields may be `*` to match anything. `\:` and `\\` escape a
//! literal colon or backslash. The first matching line wins.

use crate::config::{secret_string, SecretString};
use std::fs;
use std::path::{Path, PathBuf};

/// Parsed password file
#[derive(Debug, Default)]
pub struct PgPass {
    entries: Vec<PgPassEntry>,
}

#[derive(Debug, PartialEq, Eq)]
struct PgPassEntry {
    host: String,
    port: String,
    database: String,
    user: String,
    password: String,
}

impl PgPass {
    /// Parse password file contents, skipping malformed lines
    pub fn parse(contents: &str) -> Self {
        let entries = contents
            .lines()
            .filter(|line| !line.trim_start().starts_with('#') && !line.trim().is_empty())
            .filter_map(parse_line)
            .collect();
        Self { entries }
    }

    /// Load the password file at `path`
    ///
    /// Returns `None` if the file is missing or unreadable, or on unix if it is
    /// accessible by group or others.
    pub fn load(path: &Path) -> Option<Self> {
        let metadata = fs::metadata(path).ok()?;
        if !metadata.is_file() {
            return None;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if metadata.permissions().mode() & 0o077 != 0 {
                tracing::warn!(
                    path = %path.display(),
                    "Password file has group or world access; ignoring it"
                );
                return None;
            }
        }

        let contents = fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    /// Find the password for a connection
    pub fn lookup(&self, host: &str, port: u16, database: &str, user: &str) -> Option<SecretString> {
        let port = port.to_string();
        self.entries
            .iter()
            .find(|e| {
                matches(&e.host, host)
                    && matches(&e.port, &port)
                    && matches(&e.database, database)
                    && matches(&e.user, user)
            })
            .map(|e| secret_string(e.password.clone()))
    }

    /// Number of usable entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the file had no usable entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Location of the password file: `$PGPASSFILE`, else `~/.pgpass`
pub fn default_pgpass_path() -> Option<PathBuf> {
    match std::env::var_os("PGPASSFILE") {
        Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => dirs::home_dir().map(|home| home.join(".pgpass")),
    }
}

fn matches(pattern: &str, value: &str) -> bool {
    pattern == "*" || pattern == value
}

fn parse_line(line: &str) -> Option<PgPassEntry> {
    let mut fields = Vec::with_capacity(5);
    let mut current = String::new();
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            // The password is the remainder of the line, colons included.
            ':' if fields.len() < 4 => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    if fields.len() != 5 {
        return None;
    }

    let mut fields = fields.into_iter();
    Some(PgPassEntry {
        host: fields.next()?,
        port: fields.next()?,
        database: fields.next()?,
        user: fields.next()?,
        password: fields.next()?,
    })
}
