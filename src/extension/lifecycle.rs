//! Activation and deactivation of the extension.

use std::sync::Arc;

use super::welcome::{show_welcome, WelcomeOutcome};
use super::{ExtensionContext, LogLevelWatcher, HELLO_WORLD_COMMAND, SWAN_COMMANDS};
use crate::host::{Host, LogLevel, StatusBarAlignment};
use crate::{Config, SwanError, SwanResult, CONFIG_NAMESPACE};

/// Status-bar label.
pub const STATUS_BAR_TEXT: &str = "$(rocket) Swan";

/// Status-bar hover text.
pub const STATUS_BAR_TOOLTIP: &str = "Swan Framework - click for a greeting";

/// Status-bar priority.
pub const STATUS_BAR_PRIORITY: i32 = 100;

/// Lifecycle state of the extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtensionState {
    /// Not loaded, or stopped.
    #[default]
    Inactive,
    /// Commands and status bar are registered.
    Active,
}

/// The Swan extension.
///
/// `Inactive` -> [`start`](Self::start) -> `Active` -> [`stop`](Self::stop)
/// -> `Inactive`. Starting again re-registers everything and re-reads the
/// welcome flag.
#[derive(Debug, Clone, Default)]
pub struct Extension {
    config: Config,
    state: ExtensionState,
}

impl Extension {
    /// Create an inactive extension.
    pub fn new(config: Config) -> Self {
        Self { config, state: ExtensionState::Inactive }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ExtensionState {
        self.state
    }

    /// Whether the extension is active.
    pub fn is_active(&self) -> bool {
        self.state == ExtensionState::Active
    }

    /// Configuration the commands are built from.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Activate the extension.
    ///
    /// Registers the commands, the status-bar item and the settings
    /// watcher, handing every handle to `context`, then runs the first-run
    /// welcome. The extension is `Active` before the welcome prompt opens.
    ///
    /// A failing welcome action comes back as
    /// [`WelcomeOutcome::CommandFailed`]. An `Err` after registration means
    /// the welcome prompt or the state store failed; the extension is still
    /// `Active` then and must be stopped before starting again.
    pub async fn start(
        &mut self,
        host: &dyn Host,
        context: &mut ExtensionContext,
    ) -> SwanResult<WelcomeOutcome> {
        if self.is_active() {
            return Err(SwanError::AlreadyActive);
        }

        for spec in SWAN_COMMANDS.iter() {
            let handle = host.register_command(&spec.id, spec.invocable(&self.config))?;
            context.subscriptions.push(handle);
        }

        let mut item = host.create_status_bar_item(StatusBarAlignment::Right, STATUS_BAR_PRIORITY);
        item.text = STATUS_BAR_TEXT.to_string();
        item.tooltip = Some(STATUS_BAR_TOOLTIP.to_string());
        item.command = Some(HELLO_WORLD_COMMAND.to_string());
        item.show();
        context.subscriptions.push(host.show_status_bar_item(item));

        context
            .subscriptions
            .push(host.on_configuration_changed(Box::new(LogLevelWatcher::new(CONFIG_NAMESPACE))));

        self.state = ExtensionState::Active;
        host.log(LogLevel::Info, "Swan extension is now active");
        tracing::debug!(subscriptions = context.subscriptions.len(), "extension activated");

        let global_state = Arc::clone(context.global_state());
        show_welcome(host, global_state.as_ref()).await
    }

    /// Deactivate the extension.
    ///
    /// Releases nothing itself: the registrations belong to the host
    /// through the context's subscriptions.
    pub fn stop(&mut self, host: &dyn Host) -> SwanResult<()> {
        if !self.is_active() {
            return Err(SwanError::NotActive);
        }

        self.state = ExtensionState::Inactive;
        host.log(LogLevel::Info, "Swan extension is now deactivated");
        Ok(())
    }
}
