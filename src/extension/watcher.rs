//! Traces the configured log level whenever Swan settings change.

use crate::host::{ConfigurationChangeEvent, ConfigurationListener, Host, LogLevel};

/// Listener that reports `<namespace>.logLevel` after a change to its namespace.
#[derive(Debug, Clone)]
pub struct LogLevelWatcher {
    namespace: String,
}

impl LogLevelWatcher {
    /// Watch `namespace`.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self { namespace: namespace.into() }
    }
}

impl ConfigurationListener for LogLevelWatcher {
    fn on_change(&self, event: &ConfigurationChangeEvent, host: &dyn Host) {
        if !event.affects_configuration(&self.namespace) {
            return;
        }

        let level = host.get_configuration(&self.namespace).get("logLevel", "info".to_string());
        host.log(LogLevel::Info, &format!("Swan configuration changed, log level: {level}"));
    }
}
