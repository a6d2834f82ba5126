//! Value types exchanged between the extension and its host.

use serde::{Deserialize, Serialize};

/// Log level for diagnostic trace lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level (most verbose).
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// All levels, most verbose first.
    pub const ALL: [Self; 5] = [Self::Trace, Self::Debug, Self::Info, Self::Warn, Self::Error];

    /// Parse a level from its configuration spelling.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Configuration spelling of this level.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Emit `message` through `tracing` at this level.
    pub fn emit(self, message: &str) {
        match self {
            Self::Trace => tracing::trace!(extension = true, "{}", message),
            Self::Debug => tracing::debug!(extension = true, "{}", message),
            Self::Info => tracing::info!(extension = true, "{}", message),
            Self::Warn => tracing::warn!(extension = true, "{}", message),
            Self::Error => tracing::error!(extension = true, "{}", message),
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::Info
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which side of the status bar an item sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusBarAlignment {
    /// Left side.
    Left,
    /// Right side.
    Right,
}

/// A clickable status-bar entry bound to one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBarItem {
    /// Label text (may contain `$(icon)` references).
    pub text: String,
    /// Hover text.
    pub tooltip: Option<String>,
    /// Command run when the item is clicked.
    pub command: Option<String>,
    /// Status bar side.
    pub alignment: StatusBarAlignment,
    /// Higher priority sits further left.
    pub priority: i32,
    /// Whether the item is shown.
    pub visible: bool,
}

impl StatusBarItem {
    /// Create a hidden, empty item.
    pub fn new(alignment: StatusBarAlignment, priority: i32) -> Self {
        Self { text: String::new(), tooltip: None, command: None, alignment, priority, visible: false }
    }

    /// Mark the item visible.
    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Mark the item hidden.
    pub fn hide(&mut self) {
        self.visible = false;
    }
}

/// Options for a free-text prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputBoxOptions {
    /// Text shown above the input.
    pub prompt: String,
    /// Greyed-out example value.
    pub placeholder: Option<String>,
}

/// A change to one or more settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigurationChangeEvent {
    changed: Vec<String>,
}

impl ConfigurationChangeEvent {
    /// Create an event for the given fully-qualified keys (`swan.logLevel`).
    pub fn new(changed: Vec<String>) -> Self {
        Self { changed }
    }

    /// Keys that changed.
    pub fn changed(&self) -> &[String] {
        &self.changed
    }

    /// Whether `section` or anything below it changed.
    pub fn affects_configuration(&self, section: &str) -> bool {
        self.changed.iter().any(|key| {
            key == section
                || (key.starts_with(section) && key[section.len()..].starts_with('.'))
        })
    }
}
