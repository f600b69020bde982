use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use jira_security_issue::Config;
use jira_security_issue::cli::{Cli, Commands};
use jira_security_issue::commands::{EnsureOptions, cmd_ensure, cmd_user_info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // stdout carries only the issue key
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Ensure {
            title,
            body,
            key_labels,
            watchers,
            project,
        } => {
            cmd_ensure(
                &config,
                EnsureOptions {
                    title,
                    body,
                    key_labels,
                    watchers,
                    project,
                },
            )
            .await
        }
        Commands::UserInfo { email } => cmd_user_info(&config, &email).await,
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
