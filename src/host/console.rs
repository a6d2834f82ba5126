//! Console host backing the `swan` binary.
//!
//! Notifications and prompts go through a line-oriented reader/writer pair
//! (stdin/stdout by default), terminals run their submitted lines through
//! the system shell, and links open with the platform opener.

use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::process::{Command as ProcessCommand, Stdio};
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

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;
type Listeners = Vec<(u64, Arc<dyn ConfigurationListener>)>;

/// Host that talks to the user through a terminal.
///
/// Prompts read their answer with a blocking line read, and terminals wait
/// for the shell to exit. Both block the calling task, which is what an
/// interactive session on a current-thread runtime wants; do not share a
/// `ConsoleHost` with tasks that need to make progress meanwhile.
pub struct ConsoleHost {
    commands: Arc<Mutex<HashMap<String, Invocable>>>,
    status_items: Arc<Mutex<Vec<(u64, StatusBarItem)>>>,
    listeners: Arc<Mutex<Listeners>>,
    settings: Mutex<Settings>,
    input: Mutex<Box<dyn BufRead + Send>>,
    output: SharedWriter,
    dry_run: bool,
    next_id: AtomicU64,
}

impl std::fmt::Debug for ConsoleHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleHost")
            .field("commands", &self.commands.lock().len())
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl ConsoleHost {
    /// Create a host on stdin/stdout.
    pub fn new(settings: Settings) -> Self {
        Self::with_io(
            settings,
            Box::new(std::io::BufReader::new(std::io::stdin())),
            Box::new(std::io::stdout()),
        )
    }

    /// Create a host on an arbitrary reader/writer pair.
    pub fn with_io(
        settings: Settings,
        input: Box<dyn BufRead + Send>,
        output: Box<dyn Write + Send>,
    ) -> Self {
        Self {
            commands: Arc::new(Mutex::new(HashMap::new())),
            status_items: Arc::new(Mutex::new(Vec::new())),
            listeners: Arc::new(Mutex::new(Vec::new())),
            settings: Mutex::new(settings),
            input: Mutex::new(input),
            output: Arc::new(Mutex::new(output)),
            dry_run: false,
            next_id: AtomicU64::new(0),
        }
    }

    /// Print terminal commands and links instead of running them.
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Registered command ids, sorted.
    pub fn command_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.commands.lock().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Status-bar items currently shown.
    pub fn status_items(&self) -> Vec<StatusBarItem> {
        self.status_items.lock().iter().map(|(_, item)| item.clone()).collect()
    }

    /// Read one line of user input. `None` on end of input.
    pub fn read_line(&self) -> SwanResult<Option<String>> {
        let mut line = String::new();
        let read = self.input.lock().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Write one line of output.
    pub fn write_line(&self, line: &str) -> SwanResult<()> {
        write_line(&self.output, line)
    }

    /// Replace the settings and notify listeners of the changed keys.
    pub fn apply_settings(&self, settings: Settings) {
        let changed = {
            let mut current = self.settings.lock();
            let changed = current.diff(&settings);
            *current = settings;
            changed
        };

        if changed.is_empty() {
            return;
        }

        tracing::debug!(?changed, "settings changed");
        let event = ConfigurationChangeEvent::new(changed);
        let listeners: Vec<_> =
            self.listeners.lock().iter().map(|(_, listener)| Arc::clone(listener)).collect();
        for listener in listeners {
            listener.on_change(&event, self);
        }
    }

    fn prompt(&self, text: &str) -> SwanResult<()> {
        let mut out = self.output.lock();
        write!(out, "{text}")?;
        out.flush()?;
        Ok(())
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }
}

fn write_line(output: &SharedWriter, line: &str) -> SwanResult<()> {
    let mut out = output.lock();
    writeln!(out, "{line}")?;
    out.flush()?;
    Ok(())
}

/// Resolve a typed answer against the offered choices: either a 1-based
/// index or the choice text (case-insensitive).
fn resolve_choice(answer: &str, choices: &[&str]) -> Option<String> {
    let answer = answer.trim();
    if answer.is_empty() {
        return None;
    }

    if let Ok(index) = answer.parse::<usize>() {
        return index.checked_sub(1).and_then(|i| choices.get(i)).map(|c| (*c).to_string());
    }

    choices.iter().find(|c| c.eq_ignore_ascii_case(answer)).map(|c| (*c).to_string())
}

fn get_shell() -> (&'static str, &'static str) {
    if cfg!(target_os = "windows") {
        ("cmd", "/C")
    } else {
        ("sh", "-c")
    }
}

fn opener() -> (&'static str, &'static [&'static str]) {
    if cfg!(target_os = "macos") {
        ("open", &[])
    } else if cfg!(target_os = "windows") {
        ("cmd", &["/c", "start", ""])
    } else {
        ("xdg-open", &[])
    }
}

#[async_trait]
impl Host for ConsoleHost {
    fn register_command(&self, id: &str, invocable: Invocable) -> SwanResult<Disposable> {
        {
            let mut commands = self.commands.lock();
            if commands.contains_key(id) {
                return Err(SwanError::DuplicateCommand(id.to_string()));
            }
            tracing::debug!(command = id, kind = invocable.kind(), "registering command");
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

        tracing::debug!(command = id, "executing command");
        invocable.invoke(self).await
    }

    async fn show_information(&self, message: &str, choices: &[&str]) -> SwanResult<Option<String>> {
        self.write_line(&format!("ℹ {message}"))?;
        if choices.is_empty() {
            return Ok(None);
        }

        for (i, choice) in choices.iter().enumerate() {
            self.write_line(&format!("  [{}] {choice}", i + 1))?;
        }
        self.prompt("Select an option (Enter to dismiss): ")?;

        Ok(self.read_line()?.and_then(|answer| resolve_choice(&answer, choices)))
    }

    fn open_external(&self, uri: &str) -> SwanResult<()> {
        if self.dry_run {
            return self.write_line(&format!("[dry-run] open {uri}"));
        }

        self.write_line(&format!("Opening: {uri}"))?;
        let (program, args) = opener();
        ProcessCommand::new(program)
            .args(args)
            .arg(uri)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SwanError::OpenExternal(format!("{uri}: {e}")))?;
        Ok(())
    }

    async fn show_input_box(&self, options: InputBoxOptions) -> SwanResult<Option<String>> {
        let prompt = match &options.placeholder {
            Some(placeholder) => format!("? {} ({placeholder}): ", options.prompt),
            None => format!("? {}: ", options.prompt),
        };
        self.prompt(&prompt)?;
        self.read_line()
    }

    fn create_terminal(&self, name: &str) -> SwanResult<Box<dyn Terminal>> {
        tracing::debug!(terminal = name, "creating terminal");
        Ok(Box::new(ShellTerminal::new(name, Arc::clone(&self.output), self.dry_run)))
    }

    fn show_status_bar_item(&self, item: StatusBarItem) -> Disposable {
        if item.visible {
            let command = item.command.as_deref().unwrap_or("-");
            if let Err(e) = self.write_line(&format!("[{}] {command}", item.text)) {
                tracing::warn!(error = %e, "failed to render status bar item");
            }
        }

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
    }
}

/// Terminal that runs each submitted line through the system shell.
///
/// Text sent without a newline is buffered until a line is submitted.
/// Submitting a line waits for the shell command to finish.
pub struct ShellTerminal {
    name: String,
    pending: String,
    output: SharedWriter,
    dry_run: bool,
}

impl ShellTerminal {
    fn new(name: &str, output: SharedWriter, dry_run: bool) -> Self {
        Self { name: name.to_string(), pending: String::new(), output, dry_run }
    }

    fn run(&self, line: &str) -> SwanResult<()> {
        if self.dry_run {
            return write_line(&self.output, &format!("[dry-run] {}$ {line}", self.name));
        }

        write_line(&self.output, &format!("{}$ {line}", self.name))?;

        let (shell, shell_arg) = get_shell();
        let status = ProcessCommand::new(shell)
            .arg(shell_arg)
            .arg(line)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| SwanError::Terminal(format!("{}: {e}", self.name)))?;

        if !status.success() {
            tracing::warn!(terminal = %self.name, code = ?status.code(), "terminal command failed");
        }
        Ok(())
    }
}

impl Terminal for ShellTerminal {
    fn name(&self) -> &str {
        &self.name
    }

    fn send_text(&mut self, text: &str, add_new_line: bool) -> SwanResult<()> {
        self.pending.push_str(text);
        if add_new_line {
            let line = std::mem::take(&mut self.pending);
            self.run(&line)?;
        }
        Ok(())
    }

    fn show(&mut self) {
        tracing::debug!(terminal = %self.name, "terminal shown");
    }
}
