//! Watcher resolution against the user directory.
//!
//! Lookup failures are never fatal: a directory error is logged and the
//! identity is reported as unresolved, exactly like a lookup with no hits.

use serde::Serialize;

use crate::remote::{DirectoryUser, UserDirectory};

/// Candidates requested per identity
pub const MAX_CANDIDATES: u32 = 1;

/// A directory account a watcher identity resolved to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedUser {
    pub account_id: String,
    pub display_name: String,
}

impl From<DirectoryUser> for ResolvedUser {
    fn from(user: DirectoryUser) -> Self {
        Self {
            account_id: user.account_id,
            display_name: user.display_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(ResolvedUser),
    Unresolved,
}

/// Outcome of resolving one requested identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatcherResolution {
    pub identity: String,
    pub outcome: Resolution,
}

/// Resolve a single identity within a project.
///
/// When the directory returns several candidates the last one wins.
pub async fn resolve<D: UserDirectory>(directory: &D, identity: &str, project: &str) -> Resolution {
    match directory
        .find_candidates(identity, project, MAX_CANDIDATES)
        .await
    {
        Ok(mut candidates) => match candidates.pop() {
            Some(user) => Resolution::Resolved(user.into()),
            None => {
                tracing::debug!(identity, project, "no directory match for watcher");
                Resolution::Unresolved
            }
        },
        Err(e) => {
            tracing::warn!("Failed to look up watcher '{}': {}", identity, e);
            Resolution::Unresolved
        }
    }
}

/// Resolve every identity sequentially, preserving input order and duplicates.
pub async fn resolve_all<D: UserDirectory>(
    directory: &D,
    identities: &[String],
    project: &str,
) -> Vec<WatcherResolution> {
    let mut resolutions = Vec::with_capacity(identities.len());
    for identity in identities {
        let outcome = resolve(directory, identity, project).await;
        resolutions.push(WatcherResolution {
            identity: identity.clone(),
            outcome,
        });
    }
    resolutions
}

/// Split resolutions into resolved users and unresolved identities, both in
/// input order.
pub fn partition(resolutions: Vec<WatcherResolution>) -> (Vec<ResolvedUser>, Vec<String>) {
    let mut resolved = Vec::new();
    let mut unresolved = Vec::new();
    for resolution in resolutions {
        match resolution.outcome {
            Resolution::Resolved(user) => resolved.push(user),
            Resolution::Unresolved => unresolved.push(resolution.identity),
        }
    }
    (resolved, unresolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ensure::fakes::{FakeDirectory, user};

    #[tokio::test]
    async fn test_resolves_single_candidate() {
        let directory =
            FakeDirectory::new().with_users("user1@example.com", vec![user("abcd", "efgh")]);

        let outcome = resolve(&directory, "user1@example.com", "ABC").await;

        assert_eq!(
            outcome,
            Resolution::Resolved(ResolvedUser {
                account_id: "abcd".to_string(),
                display_name: "efgh".to_string(),
            })
        );
        assert_eq!(
            directory.lookups(),
            vec![("user1@example.com".to_string(), "ABC".to_string(), 1)]
        );
    }

    #[tokio::test]
    async fn test_last_candidate_wins() {
        let directory = FakeDirectory::new().with_users(
            "team@example.com",
            vec![user("first", "First"), user("last", "Last")],
        );

        let outcome = resolve(&directory, "team@example.com", "ABC").await;

        match outcome {
            Resolution::Resolved(u) => assert_eq!(u.account_id, "last"),
            Resolution::Unresolved => panic!("expected a resolved user"),
        }
    }

    #[tokio::test]
    async fn test_no_candidates_is_unresolved() {
        let directory = FakeDirectory::new();
        let outcome = resolve(&directory, "notfound@example.com", "ABC").await;
        assert_eq!(outcome, Resolution::Unresolved);
    }

    #[tokio::test]
    async fn test_directory_error_is_unresolved() {
        let directory = FakeDirectory::new().with_failure("broken@example.com");
        let outcome = resolve(&directory, "broken@example.com", "ABC").await;
        assert_eq!(outcome, Resolution::Unresolved);
    }

    #[tokio::test]
    async fn test_resolve_all_keeps_order_and_duplicates() {
        let directory = FakeDirectory::new()
            .with_users("a@example.com", vec![user("a", "A")])
            .with_users("b@example.com", vec![user("b", "B")]);
        let identities: Vec<String> = ["a@example.com", "missing@example.com", "b@example.com", "a@example.com"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let resolutions = resolve_all(&directory, &identities, "ABC").await;

        assert_eq!(resolutions.len(), 4);
        assert_eq!(directory.lookups().len(), 4);
        let order: Vec<&str> = resolutions.iter().map(|r| r.identity.as_str()).collect();
        assert_eq!(
            order,
            ["a@example.com", "missing@example.com", "b@example.com", "a@example.com"]
        );

        let (resolved, unresolved) = partition(resolutions);
        let names: Vec<&str> = resolved.iter().map(|u| u.display_name.as_str()).collect();
        assert_eq!(names, ["A", "B", "A"]);
        assert_eq!(unresolved, vec!["missing@example.com".to_string()]);
    }
}
