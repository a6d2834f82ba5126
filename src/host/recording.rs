//! Headless host that records every interaction.
//!
//! Prompts are answered from scripted queues, so flows that wait on the user
//! (welcome choice, project name) can be driven without a terminal. Used by
//! the test suites and by automation that embeds the extension.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{
    ConfigurationChangeEvent, ConfigurationListener, Disposable, Host, InputBoxOptions, LogLevel,
    StatusBarItem, Terminal,
};
use crate::core::{ConfigurationSection, Settings};
use crate::extension::Invocable;
use crate::{SwanError, SwanResult};

/// A notification the host was asked to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Message text.
    pub message: String,
    /// Offered choices.
    pub choices: Vec<String>,
}

/// Snapshot of a terminal created through the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordedTerminal {
    /// Terminal name.
    pub name: String,
    /// Text sent, with `\n` appended when submitted.
    pub sent: Vec<String>,
    /// Whether `show` was called.
    pub shown: bool,
}

type Listeners = Vec<(u64, Arc<dyn ConfigurationListener>)>;

#[derive(Default)]
struct Records {
    notifications: Vec<Notification>,
    opened: Vec<String>,
    prompts: Vec<InputBoxOptions>,
    executed: Vec<String>,
    logs: Vec<(LogLevel, String)>,
}

/// Host that records calls and answers prompts from queues.
#[derive(Default)]
pub struct RecordingHost {
    commands: Arc<Mutex<HashMap<String, Invocable>>>,
    status_items: Arc<Mutex<Vec<(u64, StatusBarItem)>>>,
    listeners: Arc<Mutex<Listeners>>,
    terminals: Arc<Mutex<Vec<RecordedTerminal>>>,
    records: Mutex<Records>,
    settings: Mutex<Settings>,
    choices: Mutex<VecDeque<Option<String>>>,
    inputs: Mutex<VecDeque<Option<String>>>,
    fail_terminals: Mutex<bool>,
    next_id: AtomicU64,
}

impl std::fmt::Debug for RecordingHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingHost").field("commands", &self.command_ids()).finish()
    }
}

impl RecordingHost {
    /// Create a host with no settings and empty answer queues.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a host with initial settings.
    pub fn with_settings(settings: Settings) -> Self {
        let host = Self::new();
        *host.settings.lock() = settings;
        host
    }

    /// Queue the answer to the next notification that offers choices.
    /// `None` dismisses it.
    pub fn queue_choice(&self, choice: Option<&str>) {
        self.choices.lock().push_back(choice.map(str::to_string));
    }

    /// Queue the answer to the next input box. `None` cancels it.
    pub fn queue_input(&self, input: Option<&str>) {
        self.inputs.lock().push_back(input.map(str::to_string));
    }

    /// Make `create_terminal` fail.
    pub fn fail_terminals(&self, fail: bool) {
        *self.fail_terminals.lock() = fail;
    }

    /// Replace the settings and notify listeners of the changed keys.
    pub fn change_settings(&self, settings: Settings) {
        let changed = {
            let mut current = self.settings.lock();
            let changed = current.diff(&settings);
            *current = settings;
            changed
        };

        if !changed.is_empty() {
            self.fire_configuration_change(&ConfigurationChangeEvent::new(changed));
        }
    }

    /// Deliver `event` to every listener.
    pub fn fire_configuration_change(&self, event: &ConfigurationChangeEvent) {
        let listeners: Vec<_> =
            self.listeners.lock().iter().map(|(_, listener)| Arc::clone(listener)).collect();
        for listener in listeners {
            listener.on_change(event, self);
        }
    }

    /// Registered command ids, sorted.
    pub fn command_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.commands.lock().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of active configuration listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }

    /// Status-bar items currently shown.
    pub fn status_items(&self) -> Vec<StatusBarItem> {
        self.status_items.lock().iter().map(|(_, item)| item.clone()).collect()
    }

    /// Notifications shown so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.records.lock().notifications.clone()
    }

    /// URIs opened so far.
    pub fn opened(&self) -> Vec<String> {
        self.records.lock().opened.clone()
    }

    /// Input boxes shown so far.
    pub fn input_prompts(&self) -> Vec<InputBoxOptions> {
        self.records.lock().prompts.clone()
    }

    /// Command ids executed through the host.
    pub fn executed(&self) -> Vec<String> {
        self.records.lock().executed.clone()
    }

    /// Trace lines emitted so far.
    pub fn logs(&self) -> Vec<(LogLevel, String)> {
        self.records.lock().logs.clone()
    }

    /// Terminals created so far.
    pub fn terminals(&self) -> Vec<RecordedTerminal> {
        self.terminals.lock().clone()
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }
}

#[async_trait]
impl Host for RecordingHost {
    fn register_command(&self, id: &str, invocable: Invocable) -> SwanResult<Disposable> {
        {
            let mut commands = self.commands.lock();
            if commands.contains_key(id) {
                return Err(SwanError::DuplicateCommand(id.to_string()));
            }
            commands.insert(id.to_string(), invocable);
        }

        let commands = Arc::clone(&self.commands);
        let id = id.to_string();
        Ok(Disposable::from_fn(format!("command {id}"), move || {
            commands.lock().remove(&id);
        }))
    }

    async fn execute_command(&self, id: &str) -> SwanResult<()> {
        let invocable = self
            .commands
            .lock()
            .get(id)
            .cloned()
            .ok_or_else(|| SwanError::CommandNotFound(id.to_string()))?;

        self.records.lock().executed.push(id.to_string());
        invocable.invoke(self).await
    }

    async fn show_information(&self, message: &str, choices: &[&str]) -> SwanResult<Option<String>> {
        self.records.lock().notifications.push(Notification {
            message: message.to_string(),
            choices: choices.iter().map(|c| (*c).to_string()).collect(),
        });

        if choices.is_empty() {
            return Ok(None);
        }

        let answer = self.choices.lock().pop_front().flatten();
        Ok(answer.filter(|a| choices.contains(&a.as_str())))
    }

    fn open_external(&self, uri: &str) -> SwanResult<()> {
        self.records.lock().opened.push(uri.to_string());
        Ok(())
    }

    async fn show_input_box(&self, options: InputBoxOptions) -> SwanResult<Option<String>> {
        self.records.lock().prompts.push(options);
        Ok(self.inputs.lock().pop_front().flatten())
    }

    fn create_terminal(&self, name: &str) -> SwanResult<Box<dyn Terminal>> {
        if *self.fail_terminals.lock() {
            return Err(SwanError::Terminal(format!("cannot spawn terminal '{name}'")));
        }

        let mut terminals = self.terminals.lock();
        terminals.push(RecordedTerminal { name: name.to_string(), ..Default::default() });

        Ok(Box::new(RecordingTerminal {
            name: name.to_string(),
            index: terminals.len() - 1,
            terminals: Arc::clone(&self.terminals),
        }))
    }

    fn show_status_bar_item(&self, item: StatusBarItem) -> Disposable {
        let id = self.next_id();
        self.status_items.lock().push((id, item));

        let items = Arc::clone(&self.status_items);
        Disposable::from_fn("status bar item", move || {
            items.lock().retain(|(item_id, _)| *item_id != id);
        })
    }

    fn get_configuration(&self, namespace: &str) -> ConfigurationSection {
        self.settings.lock().section(namespace)
    }

    fn on_configuration_changed(&self, listener: Box<dyn ConfigurationListener>) -> Disposable {
        let id = self.next_id();
        self.listeners.lock().push((id, Arc::from(listener)));

        let listeners = Arc::clone(&self.listeners);
        Disposable::from_fn("configuration listener", move || {
            listeners.lock().retain(|(listener_id, _)| *listener_id != id);
        })
    }

    fn log(&self, level: LogLevel, message: &str) {
        level.emit(message);
        self.records.lock().logs.push((level, message.to_string()));
    }
}

struct RecordingTerminal {
    name: String,
    index: usize,
    terminals: Arc<Mutex<Vec<RecordedTerminal>>>,
}

impl Terminal for RecordingTerminal {
    fn name(&self) -> &str {
        &self.name
    }

    fn send_text(&mut self, text: &str, add_new_line: bool) -> SwanResult<()> {
        let line = if add_new_line { format!("{text}\n") } else { text.to_string() };
        if let Some(terminal) = self.terminals.lock().get_mut(self.index) {
            terminal.sent.push(line);
        }
        Ok(())
    }

    fn show(&mut self) {
        if let Some(terminal) = self.terminals.lock().get_mut(self.index) {
            terminal.shown = true;
        }
    }
}
