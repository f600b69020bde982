//! Remote issue tracker module.
//!
//! Defines the two capabilities the ensure flow depends on, an issue tracker
//! and a user directory, along with the Jira REST implementation of both.

pub mod config;
pub mod error;
pub mod jira;

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use config::Config;
pub use jira::JiraClient;

/// A ticket as identified by the tracker (e.g. `ABC-14`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketHandle {
    pub id: String,
}

impl TicketHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl std::fmt::Display for TicketHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Fields submitted when creating a ticket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssue {
    pub project: String,
    pub issue_type: String,
    pub summary: String,
    pub description: String,
    pub labels: Vec<String>,
}

/// Search for the most recent ticket in a project carrying every label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelQuery {
    pub project: String,
    pub labels: Vec<String>,
}

impl LabelQuery {
    /// Build the query for a fingerprint. Returns `None` when there are no
    /// labels, since nothing can be deduplicated without a fingerprint.
    pub fn for_labels(project: &str, labels: &[String]) -> Option<Self> {
        if labels.is_empty() {
            return None;
        }
        Some(Self {
            project: project.to_string(),
            labels: labels.to_vec(),
        })
    }

    /// Render as JQL, newest first.
    pub fn to_jql(&self) -> String {
        let mut jql = format!("PROJECT = '{}' ", escape_jql(&self.project));
        for label in &self.labels {
            jql.push_str(&format!("AND labels IN ('{}') ", escape_jql(label)));
        }
        jql.push_str("ORDER BY created DESC");
        jql
    }
}

fn escape_jql(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Result of a label search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub total: u64,
    pub first_match: Option<TicketHandle>,
}

impl SearchResult {
    /// The first match, if the tracker reported any hits.
    pub fn existing(self) -> Option<TicketHandle> {
        if self.total > 0 { self.first_match } else { None }
    }
}

/// Role-scoped comment visibility
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visibility {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl Visibility {
    pub fn role(role: impl Into<String>) -> Self {
        Self {
            kind: "role".to_string(),
            value: role.into(),
        }
    }
}

/// A user account returned by the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryUser {
    pub account_id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// Ticket operations used by the ensure flow
pub trait IssueTracker: Send + Sync {
    /// Create a new ticket
    fn create_issue(&self, issue: &NewIssue) -> impl Future<Output = Result<TicketHandle>> + Send;

    /// Search for tickets matching a label fingerprint
    fn search(&self, query: &LabelQuery) -> impl Future<Output = Result<SearchResult>> + Send;

    /// Add an account to the ticket's watchers
    fn add_watcher(
        &self,
        ticket: &TicketHandle,
        account_id: &str,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Post a comment with restricted visibility
    fn add_comment(
        &self,
        ticket: &TicketHandle,
        body: &str,
        visibility: &Visibility,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// User lookup scoped to a project
pub trait UserDirectory: Send + Sync {
    /// Find users matching `query` that are assignable in `project`,
    /// in the directory's own order.
    fn find_candidates(
        &self,
        query: &str,
        project: &str,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<DirectoryUser>>> + Send;
}
