//! Idempotent ticket creation for security findings.
//!
//! [`Ensurer::ensure`] looks for an existing ticket carrying every key label
//! and returns it untouched if one exists. Otherwise it creates the ticket,
//! resolves and attaches watchers, and posts a restricted status comment.
//!
//! The existence check is a plain search, not a transaction: two concurrent
//! runs with the same fingerprint can both create a ticket.

pub mod comment;
pub mod request;
pub mod resolver;

#[cfg(test)]
pub(crate) mod fakes;

use crate::error::{Result, SecurityIssueError};
use crate::remote::{IssueTracker, LabelQuery, NewIssue, TicketHandle, UserDirectory, Visibility};

pub use request::{IssueRequest, IssueRequestBuilder};
pub use resolver::{Resolution, ResolvedUser, WatcherResolution};

/// Result of the existence check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Existing {
    Found(TicketHandle),
    NotFound,
}

/// A side effect on a freshly created ticket that did not go through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyFailure {
    Watcher { account_id: String, error: String },
    Comment { error: String },
}

/// What happened while notifying watchers on a new ticket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub watchers: Vec<ResolvedUser>,
    pub unresolved: Vec<String>,
    pub comment: String,
    pub failures: Vec<NotifyFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnsureOutcome {
    /// A ticket with the same fingerprint already existed; nothing was changed.
    Found(TicketHandle),
    Created {
        ticket: TicketHandle,
        notification: Notification,
    },
}

impl EnsureOutcome {
    pub fn ticket(&self) -> &TicketHandle {
        match self {
            EnsureOutcome::Found(ticket) => ticket,
            EnsureOutcome::Created { ticket, .. } => ticket,
        }
    }

    pub fn id(&self) -> &str {
        &self.ticket().id
    }

    pub fn was_created(&self) -> bool {
        matches!(self, EnsureOutcome::Created { .. })
    }
}

/// Drives the ensure flow against a tracker and a user directory.
///
/// Remote calls run one at a time, in request order.
pub struct Ensurer<'a, T, D> {
    tracker: &'a T,
    directory: &'a D,
}

impl<'a, T: IssueTracker, D: UserDirectory> Ensurer<'a, T, D> {
    pub fn new(tracker: &'a T, directory: &'a D) -> Self {
        Self { tracker, directory }
    }

    /// Make sure a ticket exists for the request and return it.
    ///
    /// Creation failures are fatal and never retried, since Jira offers no
    /// idempotency key. Watcher and comment failures after creation are
    /// logged and reported in the outcome instead.
    pub async fn ensure(&self, request: IssueRequest) -> Result<EnsureOutcome> {
        if let Existing::Found(ticket) = self.find_existing(&request).await? {
            tracing::info!(ticket = %ticket, "issue already exists");
            return Ok(EnsureOutcome::Found(ticket));
        }

        let ticket = self.create(&request).await?;
        tracing::info!(ticket = %ticket, "created issue");

        let notification = self.notify(&ticket, &request).await?;
        Ok(EnsureOutcome::Created {
            ticket,
            notification,
        })
    }

    /// Search for the newest ticket carrying every key label.
    ///
    /// Without key labels there is no fingerprint, so no search is made.
    pub async fn find_existing(&self, request: &IssueRequest) -> Result<Existing> {
        let Some(query) = LabelQuery::for_labels(request.project(), request.key_labels()) else {
            return Ok(Existing::NotFound);
        };

        let result = self.tracker.search(&query).await?;
        Ok(match result.existing() {
            Some(ticket) => Existing::Found(ticket),
            None => Existing::NotFound,
        })
    }

    async fn create(&self, request: &IssueRequest) -> Result<TicketHandle> {
        let issue = NewIssue {
            project: request.project().to_string(),
            issue_type: request.issue_type().to_string(),
            summary: request.title().to_string(),
            description: request.body().to_string(),
            labels: request.key_labels().to_vec(),
        };

        self.tracker
            .create_issue(&issue)
            .await
            .map_err(|e| SecurityIssueError::TrackerCreate(e.to_string()))
    }

    async fn notify(&self, ticket: &TicketHandle, request: &IssueRequest) -> Result<Notification> {
        let resolutions =
            resolver::resolve_all(self.directory, request.watchers(), request.project()).await;
        let (watchers, unresolved) = resolver::partition(resolutions);

        let mut failures = Vec::new();
        for watcher in &watchers {
            if let Err(e) = self.tracker.add_watcher(ticket, &watcher.account_id).await {
                tracing::warn!(
                    "Failed to add watcher {} to {}: {}",
                    watcher.account_id,
                    ticket,
                    e
                );
                failures.push(NotifyFailure::Watcher {
                    account_id: watcher.account_id.clone(),
                    error: e.to_string(),
                });
            }
        }

        let comment = comment::compose(&watchers, &unresolved, request.watcher_display())?;
        let visibility = Visibility::role(request.restricted_comment_role());
        if let Err(e) = self.tracker.add_comment(ticket, &comment, &visibility).await {
            tracing::warn!("Failed to post comment on {}: {}", ticket, e);
            failures.push(NotifyFailure::Comment {
                error: e.to_string(),
            });
        }

        Ok(Notification {
            watchers,
            unresolved,
            comment,
            failures,
        })
    }
}
