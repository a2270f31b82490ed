use assert_cmd::prelude::*;

use std::process::Command;

#[test]
fn it_has_a_help_flag() {
    let mut cli = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cli.arg("--help").assert().success();
}

#[test]
fn it_has_secret_subcommands() {
    for subcommand in &["put", "bulk", "list"] {
        let mut cli = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
        cli.args(&["secret", subcommand, "--help"]).assert().success();
    }
}

#[test]
fn it_fails_on_bad_command() {
    let mut cli = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cli.arg("farts").assert().failure();
}

#[test]
fn put_requires_a_worker_name() {
    let mut cli = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cli.args(&["secret", "put", "API_KEY", "--account-id", "abc"])
        .assert()
        .failure();
}
