use crate::error::Result;
use crate::formatting::{WatcherDisplay, join_with_and, quote};
use crate::remote::config::WATCHERS_VAR;

use super::resolver::ResolvedUser;

pub const WATCHERS_TEXT: &str = "This issue is being followed by";
pub const NO_WATCHERS_TEXT: &str = "No watchers on this issue, remember to notify relevant people.";

/// Build the status comment posted on a newly created ticket.
///
/// Resolved watchers are listed first; any identities that could not be
/// found follow after a blank line, quoted, with a pointer to the setting
/// they came from.
pub fn compose(
    resolved: &[ResolvedUser],
    unresolved: &[String],
    display: WatcherDisplay,
) -> Result<String> {
    let mut text = if resolved.is_empty() {
        NO_WATCHERS_TEXT.to_string()
    } else {
        let names: Vec<String> = resolved
            .iter()
            .map(|u| display.render(&u.account_id, &u.display_name))
            .collect();
        format!("{} {}", WATCHERS_TEXT, join_with_and(&names)?)
    };

    if !unresolved.is_empty() {
        let quoted: Vec<String> = unresolved.iter().map(|w| quote(w)).collect();
        text.push_str(&format!(
            "\n\nCould not find user for {}, please check the users listed in {}.",
            join_with_and(&quoted)?,
            WATCHERS_VAR
        ));
    }

    Ok(text)
}
