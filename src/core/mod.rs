//! Core types shared by the extension and its hosts: configuration,
//! namespaced settings, and persisted state.

mod config;
mod settings;
mod state;

pub use config::{
    Config, DocsConfig, ScaffoldConfig, SwanSettings, CONFIG_ENV, DATA_DIR_ENV, LOCAL_CONFIG_FILE,
};
pub use settings::{ConfigurationSection, Settings};
pub use state::{read_flag, FileMemento, InMemoryMemento, Memento, GLOBAL_STATE_FILE};
