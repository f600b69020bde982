//! Formatting utilities for status comments
//!
//! Turns lists of names into English phrases and wraps raw strings into the
//! display tokens Jira renders in comment markup.

use std::str::FromStr;

use crate::error::{Result, SecurityIssueError};

/// Join items as an English list: `"a"`, `"a and b"`, `"a, b and c"`.
///
/// Fails on an empty list; callers guard against that before composing text.
///
/// # Examples
///
/// ```
/// use jira_security_issue::formatting::join_with_and;
///
/// assert_eq!(join_with_and(&["one"]).unwrap(), "one");
/// assert_eq!(join_with_and(&["one", "two", "three"]).unwrap(), "one, two and three");
/// ```
pub fn join_with_and<S: AsRef<str>>(items: &[S]) -> Result<String> {
    match items {
        [] => Err(SecurityIssueError::InvalidArgument(
            "cannot join an empty list".to_string(),
        )),
        [only] => Ok(only.as_ref().to_string()),
        [rest @ .., last] => {
            let head: Vec<&str> = rest.iter().map(AsRef::as_ref).collect();
            Ok(format!("{} and {}", head.join(", "), last.as_ref()))
        }
    }
}

/// Wrap in double quotes. Embedded quotes are left alone; this is comment
/// markup, not JSON.
pub fn quote(s: &str) -> String {
    format!("\"{s}\"")
}

/// Jira Cloud wiki-markup mention of an account id.
///
/// Server and Data Center mention by username (`[~jdoe]`) instead; the ids
/// returned by the user directory only resolve in the Cloud form.
pub fn mention(account_id: &str) -> String {
    format!("[~accountid:{account_id}]")
}

/// How resolved watchers are written into the status comment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WatcherDisplay {
    /// Plain display name, e.g. `Jane Doe`
    #[default]
    Name,
    /// Mention token, e.g. `[~accountid:5b10ac8d82e05b22cc7d4ef5]`
    Mention,
}

impl WatcherDisplay {
    pub fn render(&self, account_id: &str, display_name: &str) -> String {
        match self {
            WatcherDisplay::Name => display_name.to_string(),
            WatcherDisplay::Mention => mention(account_id),
        }
    }
}

impl std::fmt::Display for WatcherDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WatcherDisplay::Name => write!(f, "name"),
            WatcherDisplay::Mention => write!(f, "mention"),
        }
    }
}

impl FromStr for WatcherDisplay {
    type Err = SecurityIssueError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(WatcherDisplay::Name),
            "mention" => Ok(WatcherDisplay::Mention),
            _ => Err(SecurityIssueError::Config(format!(
                "unknown watcher display '{}', expected '{}' or '{}'",
                s,
                WatcherDisplay::Name,
                WatcherDisplay::Mention
            ))),
        }
    }
}
