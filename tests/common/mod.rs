#![allow(dead_code)]

use std::collections::HashMap;
use std::process::{Command, Output};

const JIRA_VARS: &[&str] = &[
    "JIRA_HOST",
    "JIRA_USER",
    "JIRA_TOKEN",
    "JIRA_PROJECT",
    "JIRA_ISSUE_TYPE",
    "JIRA_WATCHERS",
    "JIRA_RESTRICTED_COMMENT_ROLE",
    "JIRA_WATCHER_DISPLAY",
    "JIRA_TIMEOUT_SECS",
];

/// Runs the binary with a controlled set of JIRA_* variables
pub struct SecurityIssueTest {
    env: HashMap<String, String>,
}

impl SecurityIssueTest {
    /// Fully configured against `host`
    pub fn new(host: &str) -> Self {
        let mut test = Self::unconfigured();
        test.set("JIRA_HOST", host)
            .set("JIRA_USER", "user")
            .set("JIRA_TOKEN", "pass")
            .set("JIRA_PROJECT", "ABC")
            .set("JIRA_ISSUE_TYPE", "Mytype")
            .set("JIRA_TIMEOUT_SECS", "5");
        test
    }

    pub fn unconfigured() -> Self {
        SecurityIssueTest {
            env: HashMap::new(),
        }
    }

    pub fn set(&mut self, name: &str, value: &str) -> &mut Self {
        self.env.insert(name.to_string(), value.to_string());
        self
    }

    pub fn unset(&mut self, name: &str) -> &mut Self {
        self.env.remove(name);
        self
    }

    pub fn run(&self, args: &[&str]) -> Output {
        let mut command = Command::new(env!("CARGO_BIN_EXE_jira-security-issue"));
        for name in JIRA_VARS {
            command.env_remove(name);
        }
        command
            .env_remove("RUST_LOG")
            .envs(&self.env)
            .args(args)
            .output()
            .expect("Failed to execute jira-security-issue")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }
}
