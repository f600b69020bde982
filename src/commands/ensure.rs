//! `ensure` command: make sure a ticket exists for a finding.

use crate::ensure::{EnsureOutcome, Ensurer, IssueRequestBuilder, NotifyFailure};
use crate::error::Result;
use crate::remote::{Config, JiraClient};

/// Options for ensuring a ticket
#[derive(Debug, Default)]
pub struct EnsureOptions {
    pub title: String,
    pub body: String,
    pub key_labels: Vec<String>,
    /// Extra watchers, appended after the configured ones
    pub watchers: Vec<String>,
    /// Overrides the configured project
    pub project: Option<String>,
}

/// Ensure the ticket exists and print its ID
pub async fn cmd_ensure(config: &Config, options: EnsureOptions) -> Result<()> {
    let mut builder = IssueRequestBuilder::from_config(config)
        .title(options.title)
        .body(options.body)
        .key_labels(options.key_labels)
        .watchers(options.watchers);
    if let Some(project) = options.project {
        builder = builder.project(project);
    }
    let request = builder.build()?;

    let client = JiraClient::from_config(config)?;
    let outcome = Ensurer::new(&client, &client).ensure(request).await?;

    if let EnsureOutcome::Created { notification, .. } = &outcome {
        for failure in &notification.failures {
            match failure {
                NotifyFailure::Watcher { account_id, error } => {
                    eprintln!("Warning: could not add watcher {account_id}: {error}")
                }
                NotifyFailure::Comment { error } => {
                    eprintln!("Warning: could not post comment: {error}")
                }
            }
        }
    }

    println!("{}", outcome.id());
    Ok(())
}
