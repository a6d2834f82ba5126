//! Host capabilities consumed by the extension.
//!
//! The editor (or any other runtime) that loads the Swan extension
//! implements [`Host`]. The extension never reaches past this trait, so the
//! same adapter runs inside the console host shipped with the `swan`
//! binary, inside [`RecordingHost`] for tests, or inside an editor bridge.
//!
//! # Ownership
//!
//! Every registration returns a [`Disposable`]. The extension hands those to
//! the host-owned [`ExtensionContext`](crate::extension::ExtensionContext),
//! and the host releases them when the extension is unloaded.

mod console;
mod disposable;
mod recording;
mod types;

use async_trait::async_trait;

pub use console::{ConsoleHost, ShellTerminal};
pub use disposable::Disposable;
pub use recording::{Notification, RecordedTerminal, RecordingHost};
pub use types::{
    ConfigurationChangeEvent, InputBoxOptions, LogLevel, StatusBarAlignment, StatusBarItem,
};

use crate::core::ConfigurationSection;
use crate::extension::Invocable;
use crate::SwanResult;

/// Interface the host provides to the extension.
#[async_trait]
pub trait Host: Send + Sync {
    /// Register `invocable` under `id`.
    ///
    /// Fails with [`SwanError::DuplicateCommand`](crate::SwanError::DuplicateCommand)
    /// when the id is taken. Disposing the handle unregisters the command.
    fn register_command(&self, id: &str, invocable: Invocable) -> SwanResult<Disposable>;

    /// Run a registered command.
    async fn execute_command(&self, id: &str) -> SwanResult<()>;

    /// Show an informational notification.
    ///
    /// Resolves to the selected choice, or `None` when the notification is
    /// dismissed or has no choices.
    async fn show_information(&self, message: &str, choices: &[&str]) -> SwanResult<Option<String>>;

    /// Open a URI with the system handler.
    fn open_external(&self, uri: &str) -> SwanResult<()>;

    /// Prompt for free text. `None` means the user cancelled.
    async fn show_input_box(&self, options: InputBoxOptions) -> SwanResult<Option<String>>;

    /// Spawn a new terminal session.
    fn create_terminal(&self, name: &str) -> SwanResult<Box<dyn Terminal>>;

    /// Create a hidden status-bar item.
    fn create_status_bar_item(&self, alignment: StatusBarAlignment, priority: i32) -> StatusBarItem {
        StatusBarItem::new(alignment, priority)
    }

    /// Publish a status-bar item. Disposing the handle removes it.
    fn show_status_bar_item(&self, item: StatusBarItem) -> Disposable;

    /// Read the settings of one namespace.
    fn get_configuration(&self, namespace: &str) -> ConfigurationSection;

    /// Subscribe to settings changes. Disposing the handle unsubscribes.
    fn on_configuration_changed(&self, listener: Box<dyn ConfigurationListener>) -> Disposable;

    /// Emit a diagnostic trace line.
    fn log(&self, level: LogLevel, message: &str);
}

/// A terminal session created by the host.
pub trait Terminal: Send {
    /// Terminal name as shown to the user.
    fn name(&self) -> &str;

    /// Send text to the session; `add_new_line` submits it.
    fn send_text(&mut self, text: &str, add_new_line: bool) -> SwanResult<()>;

    /// Bring the terminal to the front.
    fn show(&mut self);
}

/// Receives settings changes.
pub trait ConfigurationListener: Send + Sync {
    /// Called once per change event with the host that raised it.
    fn on_change(&self, event: &ConfigurationChangeEvent, host: &dyn Host);
}
