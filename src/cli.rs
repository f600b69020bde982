use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "jira-security-issue")]
#[command(about = "Ensure a Jira issue exists for a security finding")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a Jira issue unless one with the same key labels exists
    ///
    /// Prints the issue key. Connection settings, project, issue type,
    /// watchers and comment role are read from JIRA_* environment variables.
    Ensure {
        /// Title of issue
        title: String,

        /// Body of issue
        body: String,

        /// Label used to find an existing issue (repeatable)
        #[arg(long = "key-label", value_name = "LABEL")]
        key_labels: Vec<String>,

        /// Additional watcher, after those in JIRA_WATCHERS (repeatable)
        #[arg(long = "watcher", value_name = "IDENTITY")]
        watchers: Vec<String>,

        /// Project key, overriding JIRA_PROJECT
        #[arg(long)]
        project: Option<String>,
    },

    /// Look up an email address and dump user data
    UserInfo {
        /// Email to look up
        email: String,
    },
}
