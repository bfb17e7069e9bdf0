//! Integration tests for zipedit-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use zipedit_core::test_utils::read_test_zip;
use zipedit_core::test_utils::write_test_zip;

fn zipedit_cmd() -> Command {
    cargo_bin_cmd!("zipedit")
}

/// Writes `a.zip` holding `x.txt` ("hello") and `y.txt` ("world").
fn hello_world_archive(temp: &TempDir) -> PathBuf {
    let archive = temp.path().join("a.zip");
    write_test_zip(&archive, &[("x.txt", b"hello"), ("y.txt", b"world")]);
    archive
}

fn json_documents(stdout: &[u8]) -> Vec<serde_json::Value> {
    serde_json::Deserializer::from_slice(stdout)
        .into_iter::<serde_json::Value>()
        .collect::<Result<_, _>>()
        .expect("stdout should hold only JSON documents")
}

#[test]
fn test_version_flag() {
    zipedit_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("zipedit"));
}

#[test]
fn test_help_flag() {
    zipedit_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ZIP archive members in place"));
}

#[test]
fn test_edit_help() {
    zipedit_cmd()
        .args(["edit", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--manual"))
        .stdout(predicate::str::contains("--work-dir"));
}

#[test]
fn test_create_then_list() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let x = temp.path().join("x.txt");
    let y = temp.path().join("y.txt");
    fs::write(&x, "hello").unwrap();
    fs::write(&y, "world").unwrap();
    let archive = temp.path().join("a.zip");

    zipedit_cmd()
        .arg("create")
        .arg(&archive)
        .arg(&x)
        .arg(&y)
        .assert()
        .success()
        .stdout(predicate::str::contains("Archive created"))
        .stdout(predicate::str::contains("Members added:    2"));

    zipedit_cmd()
        .arg("list")
        .arg(&archive)
        .assert()
        .success()
        .stdout("x.txt\ny.txt\n");
}

#[test]
fn test_create_skips_missing_source_with_warning() {
    let temp = TempDir::new().unwrap();
    let x = temp.path().join("x.txt");
    fs::write(&x, "hello").unwrap();
    let archive = temp.path().join("a.zip");

    zipedit_cmd()
        .arg("create")
        .arg(&archive)
        .arg(&x)
        .arg(temp.path().join("ghost.txt"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Sources skipped:  1"))
        .stdout(predicate::str::contains("ghost.txt"));

    assert_eq!(read_test_zip(&archive).len(), 1);
}

#[test]
fn test_create_refuses_to_overwrite_without_force() {
    let temp = TempDir::new().unwrap();
    let archive = hello_world_archive(&temp);
    let z = temp.path().join("z.txt");
    fs::write(&z, "zzz").unwrap();

    zipedit_cmd()
        .arg("create")
        .arg(&archive)
        .arg(&z)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("--force"));

    zipedit_cmd()
        .args(["create", "--force"])
        .arg(&archive)
        .arg(&z)
        .assert()
        .success();

    let members = read_test_zip(&archive);
    assert_eq!(members, vec![("z.txt".to_string(), b"zzz".to_vec())]);
}

#[test]
fn test_list_missing_archive_fails_with_hint() {
    let temp = TempDir::new().unwrap();

    zipedit_cmd()
        .arg("list")
        .arg(temp.path().join("absent.zip"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Archive not found"))
        .stderr(predicate::str::contains("HINT"));
}

#[test]
fn test_list_corrupt_archive_fails() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("bad.zip");
    fs::write(&archive, "definitely not a zip file\n".repeat(8)).unwrap();

    zipedit_cmd()
        .arg("list")
        .arg(&archive)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid archive"));
}

#[test]
fn test_list_json() {
    let temp = TempDir::new().unwrap();
    let archive = hello_world_archive(&temp);

    let output = zipedit_cmd()
        .args(["--json", "list"])
        .arg(&archive)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let docs = json_documents(&output);
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["operation"], "list");
    assert_eq!(docs[0]["status"], "success");
    assert_eq!(docs[0]["data"]["count"], 2);
    assert_eq!(docs[0]["data"]["members"][1], "y.txt");
}

#[test]
fn test_extract_member() {
    let temp = TempDir::new().unwrap();
    let archive = hello_world_archive(&temp);
    let out = temp.path().join("out");

    zipedit_cmd()
        .arg("extract")
        .arg(&archive)
        .arg("y.txt")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Extracted 'y.txt'"));

    assert_eq!(fs::read_to_string(out.join("y.txt")).unwrap(), "world");
}

#[test]
fn test_extract_missing_member_suggests_list() {
    let temp = TempDir::new().unwrap();
    let archive = hello_world_archive(&temp);
    let out = temp.path().join("out");

    zipedit_cmd()
        .arg("extract")
        .arg(&archive)
        .arg("missing.txt")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Member 'missing.txt' not found"))
        .stderr(predicate::str::contains("zipedit list"));

    assert!(!out.join("missing.txt").exists());
}

#[test]
fn test_replace_member() {
    let temp = TempDir::new().unwrap();
    let archive = hello_world_archive(&temp);
    let edited = temp.path().join("edited.txt");
    fs::write(&edited, "HELLO").unwrap();

    zipedit_cmd()
        .arg("replace")
        .arg(&archive)
        .arg("x.txt")
        .arg(&edited)
        .assert()
        .success()
        .stdout(predicate::str::contains("Replaced 'x.txt'"));

    let members = read_test_zip(&archive);
    assert_eq!(members[0], ("x.txt".to_string(), b"HELLO".to_vec()));
    assert_eq!(members[1], ("y.txt".to_string(), b"world".to_vec()));
}

#[test]
fn test_replace_with_missing_content_leaves_archive_unchanged() {
    let temp = TempDir::new().unwrap();
    let archive = hello_world_archive(&temp);
    let before = fs::read(&archive).unwrap();

    zipedit_cmd()
        .arg("replace")
        .arg(&archive)
        .arg("x.txt")
        .arg(temp.path().join("vanished.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("left unchanged"));

    assert_eq!(fs::read(&archive).unwrap(), before);
}

#[test]
fn test_generate_files() {
    let temp = TempDir::new().unwrap();

    zipedit_cmd()
        .args(["generate", "--count", "2", "--size-kb", "1", "--ext", "txt"])
        .arg("--dir")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 2 files"));

    let first = fs::metadata(temp.path().join("test_file_1.txt")).unwrap();
    let second = fs::metadata(temp.path().join("test_file_2.txt")).unwrap();
    assert_eq!(first.len(), 1024);
    assert_eq!(second.len(), 51 * 1024);
}

#[test]
fn test_generate_rejects_overflowing_size() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");

    zipedit_cmd()
        .args(["generate", "--count", "2", "--size-kb", "18446744073709551615"])
        .arg("--dir")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("file sizes overflow"));

    assert!(!out.exists());
}

#[test]
fn test_generate_with_seed_is_reproducible() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();

    for dir in [&a, &b] {
        zipedit_cmd()
            .args(["-q", "generate", "--count", "1", "--size-kb", "2", "--seed", "42"])
            .arg("--dir")
            .arg(dir.path())
            .assert()
            .success()
            .stdout("");
    }

    assert_eq!(
        fs::read(a.path().join("test_file_1.txt")).unwrap(),
        fs::read(b.path().join("test_file_1.txt")).unwrap()
    );
}

#[test]
fn test_manual_edit_session_from_piped_input() {
    let temp = TempDir::new().unwrap();
    let archive = hello_world_archive(&temp);
    let work = temp.path().join("work");

    zipedit_cmd()
        .arg("edit")
        .arg(&archive)
        .arg("--manual")
        .arg("--work-dir")
        .arg(&work)
        .write_stdin("abc\n1\n\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. x.txt"))
        .stdout(predicate::str::contains("Invalid input"))
        .stdout(predicate::str::contains("finished editing 'x.txt'"))
        .stdout(predicate::str::contains("'x.txt' recompressed"))
        .stdout(predicate::str::contains("1 committed"));

    assert!(!work.exists());
    let members = read_test_zip(&archive);
    assert_eq!(members[0], ("x.txt".to_string(), b"hello".to_vec()));
    assert_eq!(members[1], ("y.txt".to_string(), b"world".to_vec()));
}

#[test]
fn test_manual_edit_session_end_of_input_quits() {
    let temp = TempDir::new().unwrap();
    let archive = hello_world_archive(&temp);
    let work = temp.path().join("work");

    zipedit_cmd()
        .arg("edit")
        .arg(&archive)
        .arg("--manual")
        .arg("--work-dir")
        .arg(&work)
        .write_stdin("2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Edit of 'y.txt' abandoned"));

    assert!(!work.exists());
}

#[test]
fn test_json_edit_session_keeps_prompts_off_stdout() {
    let temp = TempDir::new().unwrap();
    let archive = hello_world_archive(&temp);

    let assert = zipedit_cmd()
        .arg("--json")
        .arg("edit")
        .arg(&archive)
        .arg("--manual")
        .arg("--work-dir")
        .arg(temp.path().join("work"))
        .write_stdin("1\n\nq\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Archived members:"));

    let docs = json_documents(&assert.get_output().stdout);
    let outcomes: Vec<_> = docs
        .iter()
        .filter(|d| d["operation"] == "cycle")
        .map(|d| d["data"]["outcome"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(outcomes, ["committed", "quit"]);

    let summary = docs.last().unwrap();
    assert_eq!(summary["operation"], "edit");
    assert_eq!(summary["data"]["committed"], 1);
}

#[test]
fn test_edit_missing_archive_fails_before_prompting() {
    let temp = TempDir::new().unwrap();
    let work = temp.path().join("work");

    zipedit_cmd()
        .arg("edit")
        .arg(temp.path().join("absent.zip"))
        .arg("--manual")
        .arg("--work-dir")
        .arg(&work)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Archived members").not())
        .stderr(predicate::str::contains("Archive not found"));

    assert!(!work.exists());
}

#[test]
fn test_edit_unusable_work_dir_is_fatal() {
    let temp = TempDir::new().unwrap();
    let archive = hello_world_archive(&temp);
    let blocker = temp.path().join("blocker");
    fs::write(&blocker, "a file").unwrap();

    zipedit_cmd()
        .arg("edit")
        .arg(&archive)
        .arg("--manual")
        .arg("--work-dir")
        .arg(blocker.join("work"))
        .write_stdin("1\n\nq\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot prepare working directory"));
}

#[test]
fn test_demo_cleans_up_generated_files() {
    let temp = TempDir::new().unwrap();
    let archive = temp.path().join("demo.zip");

    zipedit_cmd()
        .arg("demo")
        .arg("--archive")
        .arg(&archive)
        .args(["--count", "2", "--size-kb", "1", "--manual"])
        .arg("--work-dir")
        .arg(temp.path().join("work"))
        .write_stdin("2\n\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 2 files"))
        .stdout(predicate::str::contains("Archive created"))
        .stdout(predicate::str::contains("Removed 2 generated files"));

    let names: Vec<String> = read_test_zip(&archive).into_iter().map(|m| m.0).collect();
    assert_eq!(names, ["test_file_1.txt", "test_file_2.log"]);
    assert!(!temp.path().join("test_file_1.txt").exists());
    assert!(!temp.path().join("work").exists());
}

#[test]
fn test_completion_bash() {
    zipedit_cmd()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("zipedit"));
}
