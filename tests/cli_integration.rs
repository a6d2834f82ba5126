//! CLI Integration Tests
//!
//! Tests the command-line interface end-to-end with an isolated data
//! directory and config file.

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// Get the binary to test, isolated in `dir`.
fn swan(dir: &assert_fs::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("swan").unwrap();
    cmd.env("SWAN_DATA_DIR", dir.path().join("data"))
        .env("SWAN_CONFIG", dir.path().join("config.toml"))
        .current_dir(dir.path());
    cmd
}

fn workspace() -> assert_fs::TempDir {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("config.toml").write_str("[swan]\nlog_level = \"info\"\n").unwrap();
    dir
}

fn welcome_already_shown(dir: &assert_fs::TempDir) {
    dir.child("data").create_dir_all().unwrap();
    dir.child("data/global-state.json").write_str("{\"swan.hasShownWelcome\": true}").unwrap();
}

// ============================================================================
// Help & Version Tests
// ============================================================================

#[test]
fn test_help_flag() {
    let dir = workspace();
    swan(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Editor extension adapter"));
}

#[test]
fn test_version_flag() {
    let dir = workspace();
    swan(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ============================================================================
// List & Manifest Tests
// ============================================================================

#[test]
fn test_list_text() {
    let dir = workspace();
    swan(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("swan.helloWorld"))
        .stdout(predicate::str::contains("Swan: Open Documentation"))
        .stdout(predicate::str::contains("Swan: Create New Swan Project"));
}

#[test]
fn test_list_json() {
    let dir = workspace();
    swan(&dir)
        .args(["list", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("["));
}

#[test]
fn test_list_unknown_format() {
    let dir = workspace();
    swan(&dir).args(["list", "--format", "xml"]).assert().failure();
}

#[test]
fn test_manifest() {
    let dir = workspace();
    swan(&dir)
        .arg("manifest")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"swan.logLevel\""))
        .stdout(predicate::str::contains("\"swan.createProject\""));
}

// ============================================================================
// Run Tests
// ============================================================================

#[test]
fn test_first_run_shows_welcome_then_not_again() {
    let dir = workspace();

    swan(&dir)
        .args(["run", "swan.helloWorld"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to Swan!"))
        .stdout(predicate::str::contains("Hello World from Swan!"));

    dir.child("data/global-state.json").assert(predicate::str::contains("swan.hasShownWelcome"));

    swan(&dir)
        .args(["run", "swan.helloWorld"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to Swan!").not())
        .stdout(predicate::str::contains("Hello World from Swan!"));
}

#[test]
fn test_run_create_project_dry_run() {
    let dir = workspace();
    welcome_already_shown(&dir);

    swan(&dir)
        .args(["--dry-run", "run", "swan.createProject"])
        .write_stdin("demo\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("[dry-run] Swan$ npx create-swan-app demo"))
        .stdout(predicate::str::contains("Creating Swan project: demo"));
}

#[test]
fn test_run_create_project_cancelled() {
    let dir = workspace();
    welcome_already_shown(&dir);

    swan(&dir)
        .args(["--dry-run", "run", "swan.createProject"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Creating Swan project").not());
}

#[test]
fn test_run_open_docs_dry_run() {
    let dir = workspace();
    welcome_already_shown(&dir);

    swan(&dir)
        .args(["--dry-run", "run", "swan.openDocs"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("[dry-run] open https://"));
}

#[test]
fn test_run_unknown_command() {
    let dir = workspace();
    swan(&dir)
        .args(["run", "swan.nope"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("swan.nope"));
}

// ============================================================================
// Activate Tests
// ============================================================================

#[test]
fn test_activate_interactive_loop() {
    let dir = workspace();
    welcome_already_shown(&dir);

    swan(&dir)
        .arg("activate")
        .write_stdin("list\nswan.helloWorld\nswan.nope\nquit\nswan.helloWorld\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("  swan.createProject"))
        .stdout(predicate::str::contains("  swan.helloWorld"))
        .stdout(predicate::str::contains("  swan.openDocs"))
        .stdout(predicate::str::contains("Hello World from Swan!").count(1))
        .stdout(predicate::str::contains("Error: Command not found: swan.nope"))
        .stdout(predicate::str::contains("Welcome to Swan!").not());
}

#[test]
fn test_activate_ends_on_eof() {
    let dir = workspace();
    welcome_already_shown(&dir);

    swan(&dir)
        .arg("activate")
        .write_stdin("swan.helloWorld\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello World from Swan!"));
}

#[test]
fn test_activate_reload_reads_config() {
    let dir = workspace();
    welcome_already_shown(&dir);

    swan(&dir)
        .arg("activate")
        .write_stdin("reload\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration reloaded"));
}

// ============================================================================
// Config & State Tests
// ============================================================================

#[test]
fn test_config_shows_effective_values() {
    let dir = workspace();
    swan(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("log_level = \"info\""))
        .stdout(predicate::str::contains("create-swan-app"));
}

#[test]
fn test_invalid_config_fails() {
    let dir = workspace();
    dir.child("config.toml").write_str("[swan]\nlog_level = \"loud\"\n").unwrap();

    swan(&dir).args(["run", "swan.helloWorld"]).write_stdin("").assert().failure();
}

#[test]
fn test_state_path() {
    let dir = workspace();
    swan(&dir)
        .args(["state", "--path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("global-state.json"));
}

#[test]
fn test_config_init_writes_defaults_once() {
    let dir = assert_fs::TempDir::new().unwrap();

    swan(&dir)
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));

    dir.child("config.toml").assert(predicate::str::contains("create-swan-app"));

    swan(&dir).args(["config", "--init"]).assert().failure();
}
