//! Configuration for the Jira connection and ensure defaults.
//!
//! All settings come from `JIRA_*` environment variables. The struct is built
//! once in `main` and passed down explicitly; nothing reads the environment
//! after that.

use std::env;
use std::fmt;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretBox};
use url::Url;

use crate::error::{Result, SecurityIssueError};
use crate::formatting::WatcherDisplay;

pub const DEFAULT_ISSUE_TYPE: &str = "Bug";
pub const DEFAULT_RESTRICTED_COMMENT_ROLE: &str = "Developers";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable listing default watchers; named in the comment
/// when a watcher cannot be found.
pub const WATCHERS_VAR: &str = "JIRA_WATCHERS";

/// Main configuration structure
pub struct Config {
    /// Jira base URL
    pub host: Url,
    /// Account used for basic auth
    pub user: String,
    token: SecretBox<String>,
    /// Default project key; may instead be supplied per invocation
    pub project: Option<String>,
    pub issue_type: String,
    /// Watchers added to every newly created ticket
    pub watchers: Vec<String>,
    /// Role that restricted comments are visible to
    pub restricted_comment_role: String,
    pub watcher_display: WatcherDisplay,
    /// Bound applied to each remote call
    pub timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host.as_str())
            .field("user", &self.user)
            .field("token", &"[REDACTED]")
            .field("project", &self.project)
            .field("issue_type", &self.issue_type)
            .field("watchers", &self.watchers)
            .field("restricted_comment_role", &self.restricted_comment_role)
            .field("watcher_display", &self.watcher_display)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated the same as unset ones. The project is
    /// optional here because the command line can override it; requests
    /// without one are rejected when they are built.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let required = [
            ("Jira host", "JIRA_HOST"),
            ("Jira user", "JIRA_USER"),
            ("Jira token", "JIRA_TOKEN"),
        ];
        for (desc, name) in required {
            if get(name).is_none() {
                return Err(SecurityIssueError::Config(format!(
                    "No {desc} supplied, please set {name} environment variable"
                )));
            }
        }

        let host_raw = get("JIRA_HOST").unwrap_or_default();
        let host = Url::parse(&host_raw).map_err(|e| {
            SecurityIssueError::Config(format!("invalid JIRA_HOST '{}': {}", host_raw, e))
        })?;

        let watcher_display = match get("JIRA_WATCHER_DISPLAY") {
            Some(value) => value.parse()?,
            None => WatcherDisplay::default(),
        };

        let timeout = match get("JIRA_TIMEOUT_SECS") {
            Some(value) => {
                let secs: u64 = value.trim().parse().map_err(|_| {
                    SecurityIssueError::Config(format!(
                        "invalid JIRA_TIMEOUT_SECS '{}', expected a whole number of seconds",
                        value
                    ))
                })?;
                if secs == 0 {
                    return Err(SecurityIssueError::Config(
                        "JIRA_TIMEOUT_SECS must be greater than zero".to_string(),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            host,
            user: get("JIRA_USER").unwrap_or_default(),
            token: SecretBox::new(Box::new(get("JIRA_TOKEN").unwrap_or_default())),
            project: get("JIRA_PROJECT"),
            issue_type: get("JIRA_ISSUE_TYPE").unwrap_or_else(|| DEFAULT_ISSUE_TYPE.to_string()),
            watchers: get(WATCHERS_VAR)
                .map(|raw| parse_watchers(&raw))
                .unwrap_or_default(),
            restricted_comment_role: get("JIRA_RESTRICTED_COMMENT_ROLE")
                .unwrap_or_else(|| DEFAULT_RESTRICTED_COMMENT_ROLE.to_string()),
            watcher_display,
            timeout,
        })
    }

    /// API token
    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }
}

/// Split a comma separated watcher list, dropping blank entries.
pub fn parse_watchers(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(String::from)
        .collect()
}
