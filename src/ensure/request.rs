use crate::error::{Result, SecurityIssueError};
use crate::formatting::WatcherDisplay;
use crate::remote::Config;
use crate::remote::config::{DEFAULT_ISSUE_TYPE, DEFAULT_RESTRICTED_COMMENT_ROLE};

/// A validated request to ensure a ticket exists.
///
/// Only obtainable through [`IssueRequestBuilder::build`], so holding one
/// means every required field is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRequest {
    project: String,
    issue_type: String,
    title: String,
    body: String,
    key_labels: Vec<String>,
    watchers: Vec<String>,
    restricted_comment_role: String,
    watcher_display: WatcherDisplay,
}

impl IssueRequest {
    pub fn builder() -> IssueRequestBuilder {
        IssueRequestBuilder::new()
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn issue_type(&self) -> &str {
        &self.issue_type
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Labels forming the dedup fingerprint, in the order given
    pub fn key_labels(&self) -> &[String] {
        &self.key_labels
    }

    pub fn watchers(&self) -> &[String] {
        &self.watchers
    }

    pub fn restricted_comment_role(&self) -> &str {
        &self.restricted_comment_role
    }

    pub fn watcher_display(&self) -> WatcherDisplay {
        self.watcher_display
    }
}

pub struct IssueRequestBuilder {
    project: Option<String>,
    issue_type: String,
    title: Option<String>,
    body: Option<String>,
    key_labels: Vec<String>,
    watchers: Vec<String>,
    restricted_comment_role: String,
    watcher_display: WatcherDisplay,
}

impl Default for IssueRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl IssueRequestBuilder {
    pub fn new() -> Self {
        IssueRequestBuilder {
            project: None,
            issue_type: DEFAULT_ISSUE_TYPE.to_string(),
            title: None,
            body: None,
            key_labels: Vec::new(),
            watchers: Vec::new(),
            restricted_comment_role: DEFAULT_RESTRICTED_COMMENT_ROLE.to_string(),
            watcher_display: WatcherDisplay::default(),
        }
    }

    /// Seed project, issue type, default watchers and comment settings from
    /// configuration.
    pub fn from_config(config: &Config) -> Self {
        let mut builder = IssueRequestBuilder::new();
        builder.project = config.project.clone();
        builder
            .issue_type(config.issue_type.clone())
            .watchers(config.watchers.iter().cloned())
            .restricted_comment_role(config.restricted_comment_role.clone())
            .watcher_display(config.watcher_display)
    }

    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn issue_type(mut self, issue_type: impl Into<String>) -> Self {
        self.issue_type = issue_type.into();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn key_label(mut self, label: impl Into<String>) -> Self {
        self.key_labels.push(label.into());
        self
    }

    pub fn key_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.key_labels.extend(labels.into_iter().map(Into::into));
        self
    }

    pub fn watcher(mut self, identity: impl Into<String>) -> Self {
        self.watchers.push(identity.into());
        self
    }

    pub fn watchers<I, S>(mut self, identities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.watchers.extend(identities.into_iter().map(Into::into));
        self
    }

    pub fn restricted_comment_role(mut self, role: impl Into<String>) -> Self {
        self.restricted_comment_role = role.into();
        self
    }

    pub fn watcher_display(mut self, display: WatcherDisplay) -> Self {
        self.watcher_display = display;
        self
    }

    /// Validate and freeze the request.
    ///
    /// Project, issue type and comment role are configuration problems;
    /// title and body are problems with the invocation.
    pub fn build(self) -> Result<IssueRequest> {
        let project = self.project.filter(|p| !p.is_empty()).ok_or_else(|| {
            SecurityIssueError::Config(
                "No project key supplied, please set JIRA_PROJECT environment variable"
                    .to_string(),
            )
        })?;

        if self.issue_type.is_empty() {
            return Err(SecurityIssueError::Config(
                "No issue type supplied, please set JIRA_ISSUE_TYPE environment variable"
                    .to_string(),
            ));
        }

        if self.restricted_comment_role.is_empty() {
            return Err(SecurityIssueError::Config(
                "No comment role supplied, please set JIRA_RESTRICTED_COMMENT_ROLE environment variable"
                    .to_string(),
            ));
        }

        let title = self
            .title
            .filter(|t| !t.is_empty())
            .ok_or_else(|| SecurityIssueError::Validation("No title supplied".to_string()))?;

        let body = self
            .body
            .filter(|b| !b.is_empty())
            .ok_or_else(|| SecurityIssueError::Validation("No body supplied".to_string()))?;

        Ok(IssueRequest {
            project,
            issue_type: self.issue_type,
            title,
            body,
            key_labels: self.key_labels,
            watchers: self.watchers,
            restricted_comment_role: self.restricted_comment_role,
            watcher_display: self.watcher_display,
        })
    }
}
