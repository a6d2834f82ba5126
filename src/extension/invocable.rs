//! The actions behind each contributed command.

use crate::host::{Host, InputBoxOptions};
use crate::SwanResult;

/// Placeholder replaced by the project name in scaffold command templates.
pub const NAME_PLACEHOLDER: &str = "{name}";

/// A zero-argument action the host can run.
///
/// Built once at activation from [`Config`](crate::Config) and handed to
/// [`Host::register_command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocable {
    /// Show an informational notification.
    Notify {
        /// Notification text.
        message: String,
    },
    /// Open a link with the system handler.
    OpenLink {
        /// Target URI.
        url: String,
    },
    /// Ask for a project name and run the scaffold command in a new terminal.
    Scaffold {
        /// Input box prompt.
        prompt: String,
        /// Input box placeholder.
        placeholder: String,
        /// Name of the terminal to create.
        terminal_name: String,
        /// Command text; `{name}` is replaced by the project name.
        command_template: String,
    },
}

impl Invocable {
    /// Short kind name, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Notify { .. } => "notify",
            Self::OpenLink { .. } => "open-link",
            Self::Scaffold { .. } => "scaffold",
        }
    }

    /// Run the action against `host`.
    ///
    /// Cancelling the scaffold prompt, or submitting an empty name, is a
    /// no-op. Host failures propagate unchanged.
    pub async fn invoke(&self, host: &dyn Host) -> SwanResult<()> {
        match self {
            Self::Notify { message } => {
                host.show_information(message, &[]).await?;
            }
            Self::OpenLink { url } => {
                host.open_external(url)?;
            }
            Self::Scaffold { prompt, placeholder, terminal_name, command_template } => {
                let options = InputBoxOptions {
                    prompt: prompt.clone(),
                    placeholder: Some(placeholder.clone()),
                };

                let Some(name) = host.show_input_box(options).await? else {
                    tracing::debug!("project name prompt cancelled");
                    return Ok(());
                };
                let name = name.trim();
                if name.is_empty() {
                    tracing::debug!("empty project name, nothing to scaffold");
                    return Ok(());
                }

                let mut terminal = host.create_terminal(terminal_name)?;
                terminal.send_text(&scaffold_command(command_template, name), true)?;
                terminal.show();

                host.show_information(&format!("Creating Swan project: {name}"), &[]).await?;
            }
        }

        Ok(())
    }
}

/// Interpolate `name` into a scaffold command template.
pub fn scaffold_command(template: &str, name: &str) -> String {
    template.replace(NAME_PLACEHOLDER, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RecordingHost;

    fn scaffold() -> Invocable {
        Invocable::Scaffold {
            prompt: "Enter project name".to_string(),
            placeholder: "my-swan-app".to_string(),
            terminal_name: "Swan".to_string(),
            command_template: "npx create-swan-app {name}".to_string(),
        }
    }

    #[test]
    fn test_scaffold_command() {
        assert_eq!(scaffold_command("npx create-swan-app {name}", "demo"), "npx create-swan-app demo");
        assert_eq!(scaffold_command("echo {name} {name}", "x"), "echo x x");
    }

    #[test]
    fn test_kind() {
        assert_eq!(Invocable::Notify { message: String::new() }.kind(), "notify");
        assert_eq!(Invocable::OpenLink { url: String::new() }.kind(), "open-link");
        assert_eq!(scaffold().kind(), "scaffold");
    }

    #[tokio::test]
    async fn test_notify() {
        let host = RecordingHost::new();
        let notify = Invocable::Notify { message: "hi".to_string() };

        notify.invoke(&host).await.unwrap();
        notify.invoke(&host).await.unwrap();

        let notifications = host.notifications();
        assert_eq!(notifications.len(), 2);
        assert!(notifications.iter().all(|n| n.message == "hi" && n.choices.is_empty()));
    }

    #[tokio::test]
    async fn test_open_link() {
        let host = RecordingHost::new();
        Invocable::OpenLink { url: "https://example.com".to_string() }.invoke(&host).await.unwrap();

        assert_eq!(host.opened(), vec!["https://example.com".to_string()]);
        assert!(host.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_scaffold_with_name() {
        let host = RecordingHost::new();
        host.queue_input(Some("  my-app "));

        scaffold().invoke(&host).await.unwrap();

        let terminals = host.terminals();
        assert_eq!(terminals.len(), 1);
        assert_eq!(terminals[0].name, "Swan");
        assert_eq!(terminals[0].sent, vec!["npx create-swan-app my-app\n".to_string()]);
        assert!(terminals[0].shown);

        let prompts = host.input_prompts();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].placeholder.as_deref(), Some("my-swan-app"));

        let notifications = host.notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].message, "Creating Swan project: my-app");
    }

    #[tokio::test]
    async fn test_scaffold_cancelled_or_empty() {
        let host = RecordingHost::new();
        host.queue_input(None);
        host.queue_input(Some("   "));

        scaffold().invoke(&host).await.unwrap();
        scaffold().invoke(&host).await.unwrap();

        assert_eq!(host.input_prompts().len(), 2);
        assert!(host.terminals().is_empty());
        assert!(host.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_scaffold_terminal_failure_propagates() {
        let host = RecordingHost::new();
        host.fail_terminals(true);
        host.queue_input(Some("demo"));

        let result = scaffold().invoke(&host).await;
        assert!(matches!(result, Err(crate::SwanError::Terminal(_))));
        assert!(host.notifications().is_empty());
    }
}
