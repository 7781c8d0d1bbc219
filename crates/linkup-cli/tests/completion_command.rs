use assert_cmd::Command;
use predicates::prelude::*;

fn linkup() -> Command {
    Command::cargo_bin("linkup").unwrap()
}

#[test]
fn test_completion_bash() {
    linkup()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("linkup"));
}

#[test]
fn test_completion_zsh() {
    linkup()
        .args(["completion", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("linkup"));
}

#[test]
fn test_completion_rejects_unknown_shell() {
    linkup().args(["completion", "tcsh"]).assert().failure();
}

#[test]
fn test_help_lists_subcommands() {
    linkup()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("note"))
        .stdout(predicate::str::contains("completion"));
}
