//! One-time welcome prompt shown on the first activation of an installation.

use serde_json::Value;

use super::{CREATE_PROJECT_COMMAND, OPEN_DOCS_COMMAND};
use crate::core::{read_flag, Memento};
use crate::host::{Host, LogLevel};
use crate::{SwanResult, WELCOME_FLAG_KEY};

/// Welcome notification text.
pub const WELCOME_MESSAGE: &str =
    "Welcome to Swan! Browse the documentation or create your first project to get started.";

/// Choice that opens the documentation.
pub const OPEN_DOCS_CHOICE: &str = "Open Docs";

/// Choice that starts project creation.
pub const CREATE_PROJECT_CHOICE: &str = "Create Project";

/// Outcome of [`show_welcome`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WelcomeOutcome {
    /// The flag was already set; nothing was shown.
    AlreadyShown,
    /// The prompt was shown; holds the selected choice, if any.
    Shown(Option<String>),
    /// The prompt was shown but the command behind the selected choice failed.
    CommandFailed {
        /// The selected choice.
        selection: String,
        /// Message of the command's error.
        error: String,
    },
}

/// Show the welcome prompt unless `global_state` says it was shown before.
///
/// A selected choice runs the matching command. The flag is written
/// whatever the user does. A failing command is reported as
/// [`WelcomeOutcome::CommandFailed`], not as an error; only prompt and
/// state-store failures are returned as `Err`.
pub async fn show_welcome(host: &dyn Host, global_state: &dyn Memento) -> SwanResult<WelcomeOutcome> {
    if read_flag(global_state, WELCOME_FLAG_KEY) {
        return Ok(WelcomeOutcome::AlreadyShown);
    }

    let selection = host
        .show_information(WELCOME_MESSAGE, &[OPEN_DOCS_CHOICE, CREATE_PROJECT_CHOICE])
        .await?;

    let command = match selection.as_deref() {
        Some(OPEN_DOCS_CHOICE) => Some(OPEN_DOCS_COMMAND),
        Some(CREATE_PROJECT_CHOICE) => Some(CREATE_PROJECT_COMMAND),
        _ => None,
    };

    let result = match command {
        Some(id) => host.execute_command(id).await,
        None => Ok(()),
    };

    global_state.update(WELCOME_FLAG_KEY, Value::Bool(true)).await?;
    tracing::debug!(?selection, "welcome shown");

    match (result, selection) {
        (Err(e), Some(selection)) => {
            host.log(LogLevel::Error, &format!("Welcome action '{selection}' failed: {e}"));
            Ok(WelcomeOutcome::CommandFailed { selection, error: e.to_string() })
        }
        (_, selection) => Ok(WelcomeOutcome::Shown(selection)),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::core::InMemoryMemento;
    use crate::extension::Invocable;
    use crate::host::RecordingHost;

    #[tokio::test]
    async fn test_skipped_when_flag_set() {
        let host = RecordingHost::new();
        let state = InMemoryMemento::new();
        state.update(WELCOME_FLAG_KEY, json!(true)).await.unwrap();

        assert_eq!(show_welcome(&host, &state).await.unwrap(), WelcomeOutcome::AlreadyShown);
        assert!(host.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_dismissed_still_sets_flag() {
        let host = RecordingHost::new();
        let state = InMemoryMemento::new();

        assert_eq!(show_welcome(&host, &state).await.unwrap(), WelcomeOutcome::Shown(None));
        assert!(read_flag(&state, WELCOME_FLAG_KEY));

        let notifications = host.notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].choices, vec![OPEN_DOCS_CHOICE, CREATE_PROJECT_CHOICE]);
    }

    #[tokio::test]
    async fn test_open_docs_choice_runs_command() {
        let host = RecordingHost::new();
        host.register_command(OPEN_DOCS_COMMAND, Invocable::OpenLink { url: "https://d".to_string() })
            .unwrap();
        host.queue_choice(Some(OPEN_DOCS_CHOICE));
        let state = InMemoryMemento::new();

        show_welcome(&host, &state).await.unwrap();

        assert_eq!(host.executed(), vec![OPEN_DOCS_COMMAND.to_string()]);
        assert_eq!(host.opened(), vec!["https://d".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_command_still_sets_flag() {
        let host = RecordingHost::new();
        host.queue_choice(Some(CREATE_PROJECT_CHOICE));
        let state = InMemoryMemento::new();

        let outcome = show_welcome(&host, &state).await.unwrap();
        match outcome {
            WelcomeOutcome::CommandFailed { selection, error } => {
                assert_eq!(selection, CREATE_PROJECT_CHOICE);
                assert!(error.contains(CREATE_PROJECT_COMMAND));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(read_flag(&state, WELCOME_FLAG_KEY));
        assert_eq!(host.logs().len(), 1);
    }
}
