// Binary-level CLI tests for commands that work without network access.

use assert_cmd::Command;
use predicates::prelude::*;

fn nota() -> Command {
    let mut cmd = Command::cargo_bin("nota").unwrap();
    cmd.env_remove("NOTION_API_KEY")
        .env_remove("NOTION_DATABASE_ID")
        .env_remove("NOTION_PARENT_PAGE_ID");
    cmd
}

#[test]
fn help_lists_command_families() {
    nota()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("refresh-cache"));
}

#[test]
fn check_config_reports_unset_variables() {
    nota()
        .arg("check-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("NOTION_API_KEY"))
        .stdout(predicate::str::contains("\"set\": false"));
}

#[test]
fn check_config_masks_the_api_key() {
    nota()
        .arg("check-config")
        .env("NOTION_API_KEY", "secret_abcdef123456")
        .assert()
        .success()
        .stdout(predicate::str::contains("secret_abc..."))
        .stdout(predicate::str::contains("secret_abcdef123456").not());
}

#[test]
fn missing_token_is_a_clear_error() {
    nota()
        .args(["list", "pages"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NOTION_API_KEY"));
}

#[test]
fn unknown_block_type_is_rejected_at_parse_time() {
    nota()
        .args(["blocks", "add", "Notes", "--type", "nonsense"])
        .assert()
        .failure();
}
