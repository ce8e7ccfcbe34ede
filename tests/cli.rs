use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

#[allow(deprecated)]
fn notes(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("notes").unwrap();
    cmd.arg("--home")
        .arg(home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("VISUAL");
    cmd
}

#[test]
fn create_list_view_delete() {
    let home = TempDir::new().unwrap();

    notes(home.path())
        .args(["create", "Groceries", "--content", "milk, eggs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added note \"Groceries\""));

    notes(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Notes sorted by modified (ascending)"))
        .stdout(predicate::str::contains("Groceries"));

    notes(home.path())
        .args(["view", "Groceries"])
        .assert()
        .success()
        .stdout(predicate::str::contains("milk, eggs"));

    notes(home.path())
        .args(["rm", "Groceries"])
        .assert()
        .success();

    notes(home.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("You have no notes"));

    assert!(home.path().join(".notes").join("notes.db").is_file());
}

#[test]
fn duplicate_title_fails() {
    let home = TempDir::new().unwrap();

    notes(home.path()).args(["new", "todo"]).assert().success();
    notes(home.path())
        .args(["new", "todo", "-c", "again"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn invalid_title_fails() {
    let home = TempDir::new().unwrap();

    notes(home.path())
        .args(["create", "a/b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));

    notes(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("You have no notes"));
}

#[test]
fn missing_note_fails() {
    let home = TempDir::new().unwrap();

    notes(home.path())
        .args(["delete", "nothing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no note titled"));

    notes(home.path())
        .args(["view", "nothing"])
        .assert()
        .failure();
}

#[test]
fn list_sorts_by_title_in_reverse() {
    let home = TempDir::new().unwrap();
    for title in ["apple", "cherry", "banana"] {
        notes(home.path()).args(["create", title]).assert().success();
    }

    let output = notes(home.path())
        .args(["list", "--sort-by", "title", "-r"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Notes sorted by title (descending)"));

    let cherry = stdout.find("cherry").unwrap();
    let banana = stdout.find("banana").unwrap();
    let apple = stdout.find("apple").unwrap();
    assert!(cherry < banana && banana < apple);
}

#[test]
fn config_round_trip() {
    let home = TempDir::new().unwrap();

    notes(home.path())
        .args(["config", "default-sort", "title"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default-sort set to title"));

    notes(home.path())
        .args(["config", "default-sort"])
        .assert()
        .success()
        .stdout(predicate::str::diff("title\n"));

    notes(home.path())
        .args(["config", "colour", "blue"])
        .assert()
        .failure();

    notes(home.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("You have no notes"));
}

#[test]
fn configured_title_length_applies() {
    let home = TempDir::new().unwrap();

    notes(home.path())
        .args(["config", "max-title-length", "3"])
        .assert()
        .success();
    notes(home.path()).args(["create", "abcd"]).assert().failure();
    notes(home.path()).args(["create", "abc"]).assert().success();
}

#[test]
fn version_prints_name_and_version() {
    let home = TempDir::new().unwrap();
    notes(home.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "notes  |  {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn doctor_reports_healthy_store() {
    let home = TempDir::new().unwrap();
    notes(home.path()).args(["create", "one"]).assert().success();
    notes(home.path())
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("No problems found."));
}

#[cfg(unix)]
#[test]
fn edit_with_unchanged_content() {
    let home = TempDir::new().unwrap();
    notes(home.path())
        .args(["create", "memo", "-c", "same"])
        .assert()
        .success();

    notes(home.path())
        .args(["edit", "memo"])
        .env("EDITOR", "true")
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes made to note."));
}

#[cfg(unix)]
#[test]
fn edit_replaces_content() {
    let home = TempDir::new().unwrap();
    let script = home.path().join("editor.sh");
    std::fs::write(&script, "#!/bin/sh\nprintf 'rewritten' > \"$1\"\n").unwrap();

    notes(home.path())
        .args(["create", "memo", "-c", "draft"])
        .assert()
        .success();

    notes(home.path())
        .args(["edit", "memo"])
        .env("EDITOR", format!("sh {}", script.display()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Note updated successfully."));

    notes(home.path())
        .args(["view", "memo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rewritten"))
        .stdout(predicate::str::contains("draft").not());
}

#[cfg(unix)]
#[test]
fn failing_editor_leaves_note_alone() {
    let home = TempDir::new().unwrap();
    notes(home.path())
        .args(["create", "memo", "-c", "draft"])
        .assert()
        .success();

    notes(home.path())
        .args(["edit", "memo"])
        .env("EDITOR", "false")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Editor error"));

    notes(home.path())
        .args(["view", "memo"])
        .assert()
        .stdout(predicate::str::contains("draft"));
}
