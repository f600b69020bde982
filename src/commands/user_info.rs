//! `user-info` command: show what the directory returns for an identity.

use crate::ensure::resolver::MAX_CANDIDATES;
use crate::error::{Result, SecurityIssueError};
use crate::remote::{Config, JiraClient, UserDirectory};

/// Look up a user the way watcher resolution does and print it as JSON
pub async fn cmd_user_info(config: &Config, email: &str) -> Result<()> {
    let project = config.project.as_deref().ok_or_else(|| {
        SecurityIssueError::Config(
            "No project key supplied, please set JIRA_PROJECT environment variable".to_string(),
        )
    })?;

    let client = JiraClient::from_config(config)?;
    let mut candidates = client
        .find_candidates(email, project, MAX_CANDIDATES)
        .await?;

    match candidates.pop() {
        Some(user) => println!("{}", serde_json::to_string_pretty(&user)?),
        None => println!("No user found for '{}' in project {}", email, project),
    }
    Ok(())
}
