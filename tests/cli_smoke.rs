use assert_cmd::Command;
use predicates::str::contains;

#[test]
fn todoview_help_works() {
    Command::cargo_bin("todoview")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("remote todo list viewer"));
}

#[test]
fn subcommand_help_works() {
    for cmd in ["view", "list", "owners"] {
        Command::cargo_bin("todoview")
            .expect("binary")
            .arg(cmd)
            .arg("--help")
            .assert()
            .success();
    }
}
