//! In-memory tracker and directory that record every call.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{Result, SecurityIssueError};
use crate::remote::{
    DirectoryUser, IssueTracker, LabelQuery, NewIssue, SearchResult, TicketHandle, UserDirectory,
    Visibility,
};

pub fn user(account_id: &str, display_name: &str) -> DirectoryUser {
    DirectoryUser {
        account_id: account_id.to_string(),
        display_name: display_name.to_string(),
        email_address: None,
        active: Some(true),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerCall {
    Create(NewIssue),
    Search(String),
    AddWatcher(String, String),
    AddComment(String, String, Visibility),
}

#[derive(Default)]
pub struct FakeTracker {
    created_key: String,
    existing: Option<SearchResult>,
    fail_create: bool,
    fail_search: bool,
    fail_watchers: bool,
    fail_comment: bool,
    calls: Mutex<Vec<TrackerCall>>,
}

impl FakeTracker {
    pub fn new(created_key: &str) -> Self {
        Self {
            created_key: created_key.to_string(),
            ..Default::default()
        }
    }

    pub fn with_existing(mut self, total: u64, first: Option<&str>) -> Self {
        self.existing = Some(SearchResult {
            total,
            first_match: first.map(TicketHandle::new),
        });
        self
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn failing_search(mut self) -> Self {
        self.fail_search = true;
        self
    }

    pub fn failing_watchers(mut self) -> Self {
        self.fail_watchers = true;
        self
    }

    pub fn failing_comment(mut self) -> Self {
        self.fail_comment = true;
        self
    }

    pub fn calls(&self) -> Vec<TrackerCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<NewIssue> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                TrackerCall::Create(issue) => Some(issue),
                _ => None,
            })
            .collect()
    }

    pub fn watchers_added(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                TrackerCall::AddWatcher(ticket, account) => Some((ticket, account)),
                _ => None,
            })
            .collect()
    }

    pub fn comments(&self) -> Vec<(String, String, Visibility)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                TrackerCall::AddComment(ticket, body, visibility) => {
                    Some((ticket, body, visibility))
                }
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: TrackerCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl IssueTracker for FakeTracker {
    async fn create_issue(&self, issue: &NewIssue) -> Result<TicketHandle> {
        self.record(TrackerCall::Create(issue.clone()));
        if self.fail_create {
            return Err(SecurityIssueError::Api("project does not exist".to_string()));
        }
        Ok(TicketHandle::new(self.created_key.clone()))
    }

    async fn search(&self, query: &LabelQuery) -> Result<SearchResult> {
        self.record(TrackerCall::Search(query.to_jql()));
        if self.fail_search {
            return Err(SecurityIssueError::Api("search unavailable".to_string()));
        }
        Ok(self.existing.clone().unwrap_or_default())
    }

    async fn add_watcher(&self, ticket: &TicketHandle, account_id: &str) -> Result<()> {
        self.record(TrackerCall::AddWatcher(
            ticket.id.clone(),
            account_id.to_string(),
        ));
        if self.fail_watchers {
            return Err(SecurityIssueError::Api("watching disabled".to_string()));
        }
        Ok(())
    }

    async fn add_comment(
        &self,
        ticket: &TicketHandle,
        body: &str,
        visibility: &Visibility,
    ) -> Result<()> {
        self.record(TrackerCall::AddComment(
            ticket.id.clone(),
            body.to_string(),
            visibility.clone(),
        ));
        if self.fail_comment {
            return Err(SecurityIssueError::Api("role does not exist".to_string()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeDirectory {
    users: HashMap<String, Vec<DirectoryUser>>,
    failing: Vec<String>,
    lookups: Mutex<Vec<(String, String, u32)>>,
}

impl FakeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(mut self, query: &str, users: Vec<DirectoryUser>) -> Self {
        self.users.insert(query.to_string(), users);
        self
    }

    pub fn with_failure(mut self, query: &str) -> Self {
        self.failing.push(query.to_string());
        self
    }

    pub fn lookups(&self) -> Vec<(String, String, u32)> {
        self.lookups.lock().unwrap().clone()
    }
}

impl UserDirectory for FakeDirectory {
    async fn find_candidates(
        &self,
        query: &str,
        project: &str,
        limit: u32,
    ) -> Result<Vec<DirectoryUser>> {
        self.lookups
            .lock()
            .unwrap()
            .push((query.to_string(), project.to_string(), limit));
        if self.failing.iter().any(|q| q == query) {
            return Err(SecurityIssueError::Api("directory unavailable".to_string()));
        }
        Ok(self.users.get(query).cloned().unwrap_or_default())
    }
}
