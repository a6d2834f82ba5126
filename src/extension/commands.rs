//! The commands contributed by the extension.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::Invocable;
use crate::Config;

/// Id of the greeting command.
pub const HELLO_WORLD_COMMAND: &str = "swan.helloWorld";

/// Id of the documentation command.
pub const OPEN_DOCS_COMMAND: &str = "swan.openDocs";

/// Id of the project scaffolding command.
pub const CREATE_PROJECT_COMMAND: &str = "swan.createProject";

/// Category prefix shown in the command palette.
pub const COMMAND_CATEGORY: &str = "Swan";

/// Text of the greeting notification.
pub const GREETING: &str = "Hello World from Swan!";

/// What a contributed command does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommandAction {
    /// Show the greeting.
    Greeting,
    /// Open the documentation.
    OpenDocs,
    /// Scaffold a new project.
    CreateProject,
}

/// A command the extension contributes to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Stable command id.
    pub id: String,
    /// Title without the category prefix.
    pub title: String,
    /// Palette category.
    pub category: String,
    /// Behavior.
    pub action: CommandAction,
}

impl CommandSpec {
    /// Create a spec in the Swan category.
    pub fn new(id: &str, title: &str, action: CommandAction) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            category: COMMAND_CATEGORY.to_string(),
            action,
        }
    }

    /// Name shown to the user, e.g. `Swan: Hello World`.
    pub fn display_name(&self) -> String {
        format!("{}: {}", self.category, self.title)
    }

    /// Build the action for this command from `config`.
    pub fn invocable(&self, config: &Config) -> Invocable {
        match self.action {
            CommandAction::Greeting => Invocable::Notify { message: GREETING.to_string() },
            CommandAction::OpenDocs => Invocable::OpenLink { url: config.docs.url.clone() },
            CommandAction::CreateProject => Invocable::Scaffold {
                prompt: config.scaffold.prompt.clone(),
                placeholder: config.scaffold.placeholder.clone(),
                terminal_name: config.scaffold.terminal_name.clone(),
                command_template: config.scaffold.command.clone(),
            },
        }
    }
}

/// All contributed commands, in registration order.
pub static SWAN_COMMANDS: Lazy<Vec<CommandSpec>> = Lazy::new(|| {
    vec![
        CommandSpec::new(HELLO_WORLD_COMMAND, "Hello World", CommandAction::Greeting),
        CommandSpec::new(OPEN_DOCS_COMMAND, "Open Documentation", CommandAction::OpenDocs),
        CommandSpec::new(
            CREATE_PROJECT_COMMAND,
            "Create New Swan Project",
            CommandAction::CreateProject,
        ),
    ]
});

/// Look up a contributed command by id.
pub fn find_command(id: &str) -> Option<&'static CommandSpec> {
    SWAN_COMMANDS.iter().find(|spec| spec.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_defined() {
        let ids: Vec<&str> = SWAN_COMMANDS.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec![HELLO_WORLD_COMMAND, OPEN_DOCS_COMMAND, CREATE_PROJECT_COMMAND]);
    }

    #[test]
    fn test_display_names() {
        let names: Vec<String> = SWAN_COMMANDS.iter().map(CommandSpec::display_name).collect();
        assert_eq!(
            names,
            vec!["Swan: Hello World", "Swan: Open Documentation", "Swan: Create New Swan Project"]
        );
    }

    #[test]
    fn test_invocables_follow_config() {
        let mut config = Config::default();
        config.docs.url = "https://docs.example.com".to_string();
        config.scaffold.command = "swan-init {name}".to_string();

        assert_eq!(
            find_command(HELLO_WORLD_COMMAND).unwrap().invocable(&config),
            Invocable::Notify { message: GREETING.to_string() }
        );
        assert_eq!(
            find_command(OPEN_DOCS_COMMAND).unwrap().invocable(&config),
            Invocable::OpenLink { url: "https://docs.example.com".to_string() }
        );
        match find_command(CREATE_PROJECT_COMMAND).unwrap().invocable(&config) {
            Invocable::Scaffold { command_template, .. } => {
                assert_eq!(command_template, "swan-init {name}");
            }
            other => panic!("unexpected invocable: {other:?}"),
        }
    }

    #[test]
    fn test_find_command_unknown() {
        assert!(find_command("swan.unknown").is_none());
    }
}
