//! End-to-end dispatch through execute_command.

use std::sync::OnceLock;

use clap::Parser;
use tempfile::TempDir;

use ordertree::cli::args::Cli;
use ordertree::cli::commands::execute_command;
use ordertree::exitcode;

fn fixture(name: &str) -> String {
    format!(
        "{}/tests/resources/orders/{}",
        env!("CARGO_MANIFEST_DIR"),
        name
    )
}

/// Empty XDG config home for this test binary, so the user's global config is never read.
fn isolated_config_home() -> &'static TempDir {
    static CONFIG_HOME: OnceLock<TempDir> = OnceLock::new();
    CONFIG_HOME.get_or_init(|| {
        let dir = TempDir::new().expect("create config home");
        std::env::set_var("XDG_CONFIG_HOME", dir.path());
        dir
    })
}

fn run(args: &[&str]) -> Result<(), i32> {
    isolated_config_home();
    let cli = Cli::try_parse_from(args).expect("valid arguments");
    execute_command(&cli).map_err(|e| e.exit_code())
}

#[test]
fn given_fixture_when_quoting_then_succeeds() {
    let file = fixture("ord-2024-001.toml");
    assert_eq!(run(&["ordertree", "quote", &file]), Ok(()));
}

#[test]
fn given_fixture_when_rendering_tree_then_succeeds() {
    let file = fixture("ord-2024-002.toml");
    assert_eq!(run(&["ordertree", "render", &file, "--tree"]), Ok(()));
}

#[test]
fn given_missing_document_when_quoting_then_noinput() {
    let file = fixture("does-not-exist.toml");
    assert_eq!(run(&["ordertree", "quote", &file]), Err(exitcode::NOINPUT));
}

#[test]
fn given_malformed_document_when_rendering_then_dataerr() {
    let file = fixture("malformed.toml");
    assert_eq!(run(&["ordertree", "render", &file]), Err(exitcode::DATAERR));
}

#[test]
fn given_missing_config_file_when_running_then_config_exit_code() {
    let file = fixture("ord-2024-002.toml");
    let config = fixture("no-such-config.toml");
    assert_eq!(
        run(&["ordertree", "--config", &config, "render", &file]),
        Err(exitcode::CONFIG)
    );
}

#[test]
fn given_demo_when_running_all_then_succeeds() {
    assert_eq!(run(&["ordertree", "demo"]), Ok(()));
}

#[cfg(target_os = "linux")]
#[test]
fn given_isolated_config_home_when_resolving_global_config_then_points_inside_it() {
    let home = isolated_config_home();

    let global = ordertree::config::global_config_path().expect("global config path");

    assert!(global.starts_with(home.path()));
    assert!(!global.exists());
}

#[test]
fn given_config_template_when_running_then_succeeds() {
    assert_eq!(run(&["ordertree", "config", "template"]), Ok(()));
}
