//! Contribution manifest the host reads before activating the extension.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{HELLO_WORLD_COMMAND, SWAN_COMMANDS};
use crate::host::LogLevel;
use crate::{Config, SwanError, SwanResult, APP_NAME, CONFIG_NAMESPACE, VERSION};

/// Extension manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionManifest {
    /// Package name.
    pub name: String,
    /// Human-readable name.
    pub display_name: String,
    /// Package version.
    pub version: String,
    /// Events that trigger activation.
    pub activation_events: Vec<String>,
    /// Contributed commands and settings.
    pub contributes: Contributions,
}

/// Everything the extension adds to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributions {
    /// Palette commands.
    pub commands: Vec<CommandContribution>,
    /// Settings schema.
    pub configuration: ConfigurationContribution,
    /// Status-bar bindings.
    pub status_bar: Vec<String>,
}

/// A palette entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandContribution {
    /// Command id.
    pub command: String,
    /// Title.
    pub title: String,
    /// Category.
    pub category: String,
}

/// Settings schema of one namespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationContribution {
    /// Section title.
    pub title: String,
    /// Fully-qualified setting keys.
    pub properties: BTreeMap<String, SettingSchema>,
}

/// Schema of one setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingSchema {
    /// JSON type name.
    #[serde(rename = "type")]
    pub kind: String,
    /// Default value.
    pub default: Value,
    /// Allowed values, if restricted.
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<String>>,
    /// Help text.
    pub description: String,
}

impl ExtensionManifest {
    /// Manifest of the Swan extension.
    pub fn swan() -> Self {
        let commands = SWAN_COMMANDS
            .iter()
            .map(|spec| CommandContribution {
                command: spec.id.clone(),
                title: spec.title.clone(),
                category: spec.category.clone(),
            })
            .collect();

        let defaults = Config::default().swan;
        let mut properties = BTreeMap::new();
        properties.insert(
            format!("{CONFIG_NAMESPACE}.enableAutoComplete"),
            SettingSchema {
                kind: "boolean".to_string(),
                default: json!(defaults.enable_auto_complete),
                allowed: None,
                description: "Enable auto-completion for Swan files".to_string(),
            },
        );
        properties.insert(
            format!("{CONFIG_NAMESPACE}.logLevel"),
            SettingSchema {
                kind: "string".to_string(),
                default: json!(defaults.log_level),
                allowed: Some(LogLevel::ALL.iter().map(|l| l.as_str().to_string()).collect()),
                description: "Log level for the Swan extension".to_string(),
            },
        );

        Self {
            name: APP_NAME.to_string(),
            display_name: "Swan".to_string(),
            version: VERSION.to_string(),
            activation_events: vec!["onStartupFinished".to_string()],
            contributes: Contributions {
                commands,
                configuration: ConfigurationContribution {
                    title: "Swan".to_string(),
                    properties,
                },
                status_bar: vec![HELLO_WORLD_COMMAND.to_string()],
            },
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> SwanResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SwanError::Config(e.to_string()))
    }
}
