pub mod cli;
pub mod commands;
pub mod ensure;
pub mod error;
pub mod formatting;
pub mod remote;

pub use ensure::{EnsureOutcome, Ensurer, IssueRequest, IssueRequestBuilder};
pub use error::{Result, SecurityIssueError};
pub use remote::{Config, IssueTracker, JiraClient, TicketHandle, UserDirectory};
