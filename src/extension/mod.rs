//! The Swan editor extension.
//!
//! On activation the extension registers three commands, a right-aligned
//! status-bar item bound to the greeting, and a settings watcher. On the
//! first activation of an installation it shows a welcome prompt.
//!
//! ## Commands
//!
//! | Id                   | Palette name                    |
//! |----------------------|---------------------------------|
//! | `swan.helloWorld`    | Swan: Hello World               |
//! | `swan.openDocs`      | Swan: Open Documentation        |
//! | `swan.createProject` | Swan: Create New Swan Project   |

mod commands;
mod context;
mod invocable;
mod lifecycle;
mod manifest;
mod watcher;
mod welcome;

pub use commands::{
    find_command, CommandAction, CommandSpec, COMMAND_CATEGORY, CREATE_PROJECT_COMMAND, GREETING,
    HELLO_WORLD_COMMAND, OPEN_DOCS_COMMAND, SWAN_COMMANDS,
};
pub use context::ExtensionContext;
pub use invocable::{scaffold_command, Invocable, NAME_PLACEHOLDER};
pub use lifecycle::{
    Extension, ExtensionState, STATUS_BAR_PRIORITY, STATUS_BAR_TEXT, STATUS_BAR_TOOLTIP,
};
pub use manifest::{
    CommandContribution, ConfigurationContribution, Contributions, ExtensionManifest,
    SettingSchema,
};
pub use watcher::LogLevelWatcher;
pub use welcome::{
    show_welcome, WelcomeOutcome, CREATE_PROJECT_CHOICE, OPEN_DOCS_CHOICE, WELCOME_MESSAGE,
};
