#![allow(clippy::unused_self)]
#![allow(clippy::needless_pass_by_value)]

//! # Swan
//!
//! Editor extension adapter for the Swan framework.
//!
//! The extension contributes three commands (a greeting, a link to the
//! documentation, and a project scaffolder), a status-bar item, and a
//! one-time welcome prompt. Everything it needs from the editor goes through
//! the [`Host`] trait, so the same extension runs inside an editor bridge,
//! the [`ConsoleHost`] behind the `swan` binary, or the [`RecordingHost`]
//! used in tests.
//!
//! ## Quick Start
//!
//! ```bash
//! # Run a command through the console host
//! swan run swan.helloWorld
//!
//! # Scaffold a project (prompts for the name)
//! swan run swan.createProject
//!
//! # Print the contribution manifest
//! swan manifest
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::uninlined_format_args)]

pub mod core;
mod error;
pub mod extension;
pub mod host;

pub use crate::core::{Config, FileMemento, InMemoryMemento, Memento, Settings};
pub use error::{SwanError, SwanResult};
pub use extension::{Extension, ExtensionContext, ExtensionState, Invocable};
pub use host::{ConsoleHost, Disposable, Host, RecordingHost};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "swan";

/// Settings namespace owned by the extension.
pub const CONFIG_NAMESPACE: &str = "swan";

/// Global-state key recording that the welcome prompt was shown.
pub const WELCOME_FLAG_KEY: &str = "swan.hasShownWelcome";

/// Default documentation URL.
pub const DEFAULT_DOCS_URL: &str = "https://swan-framework.dev/guide/";
