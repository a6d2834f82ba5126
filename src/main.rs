//! Swan - run the Swan editor extension from a terminal.
//!
//! The console host stands in for the editor: notifications and prompts
//! appear on the terminal, and scaffold commands run in the system shell.

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use swan::extension::{ExtensionManifest, WelcomeOutcome, SWAN_COMMANDS};
use swan::host::Host;
use swan::{Config, ConsoleHost, Extension, ExtensionContext, FileMemento};

/// Editor extension adapter for the Swan framework
#[derive(Parser)]
#[command(name = "swan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print terminal commands and links instead of running them
    #[arg(long, global = true)]
    dry_run: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Activate the extension, run one command, and deactivate
    Run {
        /// Command id (e.g. swan.helloWorld)
        id: String,
    },

    /// Activate the extension and read command ids interactively
    Activate,

    /// List contributed commands
    List {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Print the contribution manifest as JSON
    Manifest,

    /// Show configuration
    Config {
        /// Show config file path
        #[arg(long)]
        path: bool,

        /// Write the default configuration file
        #[arg(long, conflicts_with = "path")]
        init: bool,
    },

    /// Show persisted extension state
    State {
        /// Show state file path
        #[arg(long)]
        path: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// An activated extension running in the console host.
struct Session {
    host: ConsoleHost,
    extension: Extension,
    context: ExtensionContext,
}

impl Session {
    async fn start(dry_run: bool) -> Result<Self> {
        let config = Config::load().context("failed to load configuration")?;
        let host = ConsoleHost::new(config.to_settings()).dry_run(dry_run);
        let global_state = Arc::new(open_state()?);
        let mut context = ExtensionContext::new(global_state);
        let mut extension = Extension::new(config);

        if let WelcomeOutcome::CommandFailed { selection, error } =
            extension.start(&host, &mut context).await?
        {
            host.write_line(&format!("Error: '{selection}' failed: {error}"))?;
        }
        Ok(Self { host, extension, context })
    }

    /// Re-read the configuration file and push changed settings to the host.
    fn reload(&self) -> Result<()> {
        let config = Config::load().context("failed to load configuration")?;
        self.host.apply_settings(config.to_settings());
        Ok(())
    }

    fn stop(mut self) -> Result<()> {
        self.extension.stop(&self.host)?;
        self.context.dispose_all();
        Ok(())
    }
}

fn open_state() -> Result<FileMemento> {
    let dir = Config::data_dir().context("could not determine data directory")?;
    Ok(FileMemento::open_in(&dir)?)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose { EnvFilter::new("debug") } else { EnvFilter::new("warn") };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Run { id } => cmd_run(&id, cli.dry_run).await?,
        Commands::Activate => cmd_activate(cli.dry_run).await?,
        Commands::List { format } => cmd_list(&format)?,
        Commands::Manifest => cmd_manifest()?,
        Commands::Config { path, init } => cmd_config(path, init)?,
        Commands::State { path } => cmd_state(path)?,
        Commands::Completions { shell } => cmd_completions(shell),
    }

    Ok(())
}

async fn cmd_run(id: &str, dry_run: bool) -> Result<()> {
    let session = Session::start(dry_run).await?;
    let result = session.host.execute_command(id).await;
    session.stop()?;
    result.with_context(|| format!("command '{id}' failed"))
}

async fn cmd_activate(dry_run: bool) -> Result<()> {
    let session = Session::start(dry_run).await?;
    session.host.write_line("Type a command id, 'list', 'reload', or 'quit'.")?;

    loop {
        session.host.write_line("swan>")?;
        let Some(line) = session.host.read_line()? else {
            break;
        };

        match line.trim() {
            "" => {}
            "quit" | "exit" => break,
            "list" => {
                for id in session.host.command_ids() {
                    session.host.write_line(&format!("  {id}"))?;
                }
            }
            "reload" => match session.reload() {
                Ok(()) => session.host.write_line("Configuration reloaded")?,
                Err(e) => session.host.write_line(&format!("Error: {e:#}"))?,
            },
            id => {
                if let Err(e) = session.host.execute_command(id).await {
                    session.host.write_line(&format!("Error: {e}"))?;
                }
            }
        }
    }

    session.stop()
}

fn cmd_list(format: &str) -> Result<()> {
    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&*SWAN_COMMANDS)?);
        }
        "text" => {
            let width = SWAN_COMMANDS.iter().map(|c| c.id.len()).max().unwrap_or(0);
            for spec in SWAN_COMMANDS.iter() {
                println!("{:width$}  {}", spec.id, spec.display_name(), width = width);
            }
        }
        other => anyhow::bail!("Unknown format: {} (expected text or json)", other),
    }
    Ok(())
}

fn cmd_manifest() -> Result<()> {
    println!("{}", ExtensionManifest::swan().to_json()?);
    Ok(())
}

fn cmd_config(path: bool, init: bool) -> Result<()> {
    if init {
        if let Some(existing) = Config::save_path().filter(|p| p.exists()) {
            anyhow::bail!("Config file already exists: {}", existing.display());
        }
        let written = Config::default().save()?;
        println!("Created {}", written.display());
        return Ok(());
    }

    if path {
        match Config::path() {
            Some(path) => println!("{}", path.display()),
            None => match Config::config_dir() {
                Some(dir) => println!("{} (not created)", dir.join("config.toml").display()),
                None => println!("No config directory available"),
            },
        }
        return Ok(());
    }

    let config = Config::load().context("failed to load configuration")?;
    print!("{}", config.to_toml()?);
    Ok(())
}

fn cmd_state(path: bool) -> Result<()> {
    let state = open_state()?;
    if path {
        println!("{}", state.path().display());
    } else {
        println!("{}", state.to_json()?);
    }
    Ok(())
}

fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "swan", &mut io::stdout());
}
