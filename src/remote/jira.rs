//! Jira REST (v2) implementation of the tracker and directory capabilities.
//!
//! # Security Note - Logging
//!
//! The API token is kept in a `SecretBox` and only exposed while building the
//! basic auth header, which reqwest marks as sensitive. Request URLs and JQL
//! are logged at debug level; bodies and headers never are.

use reqwest::header;
use reqwest::{Client, Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretBox};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, SecurityIssueError};

use super::error::ApiError;
use super::{
    Config, DirectoryUser, IssueTracker, LabelQuery, NewIssue, SearchResult, TicketHandle,
    UserDirectory, Visibility,
};

const API_PREFIX: &str = "rest/api/2/";

// Wire types

#[derive(Debug, Serialize)]
struct CreateIssueRequest<'a> {
    fields: CreateIssueFields<'a>,
}

#[derive(Debug, Serialize)]
struct CreateIssueFields<'a> {
    project: ProjectRef<'a>,
    issuetype: IssueTypeRef<'a>,
    summary: &'a str,
    description: &'a str,
    labels: &'a [String],
}

#[derive(Debug, Serialize)]
struct ProjectRef<'a> {
    key: &'a str,
}

#[derive(Debug, Serialize)]
struct IssueTypeRef<'a> {
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreatedIssue {
    key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    jql: &'a str,
    max_results: u32,
    fields: [&'static str; 1],
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    total: u64,
    #[serde(default)]
    issues: Vec<IssueKey>,
}

#[derive(Debug, Deserialize)]
struct IssueKey {
    key: String,
}

#[derive(Debug, Serialize)]
struct CommentRequest<'a> {
    body: &'a str,
    visibility: &'a Visibility,
}

/// Jira REST client
pub struct JiraClient {
    client: Client,
    base: Url,
    user: String,
    token: SecretBox<String>,
}

impl JiraClient {
    /// Create a client from configuration.
    ///
    /// Every request is bounded by `config.timeout`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .user_agent(concat!("jira-security-issue/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base: normalize_base(config.host.clone()),
            user: config.user.clone(),
            token: SecretBox::new(Box::new(config.token().to_string())),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(API_PREFIX)
            .and_then(|api| api.join(path))
            .map_err(|e| SecurityIssueError::Config(format!("invalid Jira URL for '{path}': {e}")))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!(method = method.as_str(), url = url.as_str(), "jira request");
        self.client
            .request(method, url)
            .basic_auth(&self.user, Some(self.token.expose_secret()))
            .header(header::ACCEPT, "application/json")
    }

    /// Send a request and return the raw response text on success.
    async fn send(&self, request: RequestBuilder) -> std::result::Result<String, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::from_response_body(status, &body));
        }
        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let body = self.send(request).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// `Url::join` drops the last path segment unless it ends with a slash,
/// which would lose context paths like `https://host/jira`.
fn normalize_base(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

impl IssueTracker for JiraClient {
    async fn create_issue(&self, issue: &NewIssue) -> Result<TicketHandle> {
        let payload = CreateIssueRequest {
            fields: CreateIssueFields {
                project: ProjectRef {
                    key: &issue.project,
                },
                issuetype: IssueTypeRef {
                    name: &issue.issue_type,
                },
                summary: &issue.summary,
                description: &issue.description,
                labels: &issue.labels,
            },
        };

        let request = self.request(Method::POST, self.endpoint("issue")?).json(&payload);
        let created: CreatedIssue = self.send_json(request).await?;
        Ok(TicketHandle::new(created.key))
    }

    async fn search(&self, query: &LabelQuery) -> Result<SearchResult> {
        let jql = query.to_jql();
        tracing::debug!(%jql, "searching for existing issue");

        let payload = SearchRequest {
            jql: &jql,
            max_results: 1,
            fields: ["key"],
        };
        let request = self.request(Method::POST, self.endpoint("search")?).json(&payload);
        let response: SearchResponse = self.send_json(request).await?;

        Ok(SearchResult {
            total: response.total,
            first_match: response
                .issues
                .into_iter()
                .next()
                .map(|issue| TicketHandle::new(issue.key)),
        })
    }

    async fn add_watcher(&self, ticket: &TicketHandle, account_id: &str) -> Result<()> {
        let url = self.endpoint(&format!("issue/{}/watchers", ticket.id))?;
        let request = self.request(Method::POST, url).json(account_id);
        self.send(request).await?;
        Ok(())
    }

    async fn add_comment(
        &self,
        ticket: &TicketHandle,
        body: &str,
        visibility: &Visibility,
    ) -> Result<()> {
        let url = self.endpoint(&format!("issue/{}/comment", ticket.id))?;
        let request = self
            .request(Method::POST, url)
            .json(&CommentRequest { body, visibility });
        self.send(request).await?;
        Ok(())
    }
}

impl UserDirectory for JiraClient {
    async fn find_candidates(
        &self,
        query: &str,
        project: &str,
        limit: u32,
    ) -> Result<Vec<DirectoryUser>> {
        let mut url = self.endpoint("user/assignable/search")?;
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("project", project)
            .append_pair("maxResults", &limit.to_string());

        let request = self.request(Method::GET, url);
        self.send_json(request).await
    }
}
