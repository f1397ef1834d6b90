//! Integration tests for sevex-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
#[cfg(unix)]
use std::path::Path;
#[cfg(unix)]
use std::path::PathBuf;
#[cfg(unix)]
use tempfile::TempDir;

fn sevex_cmd() -> Command {
    cargo_bin_cmd!("sevex")
}

#[test]
fn test_version_flag() {
    sevex_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sevex"));
}

#[test]
fn test_help_flag() {
    sevex_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Command-line front-end"));
}

#[test]
fn test_add_help() {
    sevex_cmd()
        .arg("add")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Create an archive"));
}

#[test]
fn test_quiet_conflicts_with_verbose() {
    sevex_cmd()
        .arg("list")
        .arg("whatever.7z")
        .arg("--quiet")
        .arg("--verbose")
        .assert()
        .failure();
}

#[test]
fn test_plain_names_requires_password() {
    sevex_cmd()
        .arg("add")
        .arg("out.7z")
        .arg("src")
        .arg("--plain-names")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--password"));
}

/// Writes an executable shell script standing in for the 7-Zip binary.
#[cfg(unix)]
fn write_stub(dir: &Path, script: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("7zz");
    std::fs::write(&path, format!("#!/bin/sh\n{script}")).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

#[cfg(unix)]
const LISTING_STUB: &str = r#"
case "$1" in
  l)
    cat <<'EOF'
--
Path = sample.7z
Type = 7z

   Date      Time    Attr         Size   Compressed  Name
------------------- ----- ------------ ------------  ----
2024-03-01 09:15:02 ....A          123          100  a.txt
------------------- ----- ------------ ------------  ----
2024-03-01 09:15:02                123          100  1 files
EOF
    ;;
  i)
    cat <<'EOF'
7-Zip (z) 22.01 (x64)

Formats:
 0 CKSF  7z  7z  7 z BC AF 27 1C

Codecs:
 ED 21 LZMA2

Hashers:
 4 1 CRC32
EOF
    ;;
  *)
    echo "Everything is Ok"
    ;;
esac
"#;

#[cfg(unix)]
#[test]
fn test_list_prints_entries_via_stub_binary() {
    let dir = TempDir::new().unwrap();
    let stub = write_stub(dir.path(), LISTING_STUB);

    sevex_cmd()
        .arg("--bin")
        .arg(&stub)
        .arg("list")
        .arg("sample.7z")
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt"))
        .stdout(predicate::str::contains("1 files"));
}

#[cfg(unix)]
#[test]
fn test_list_json_output() {
    let dir = TempDir::new().unwrap();
    let stub = write_stub(dir.path(), LISTING_STUB);

    sevex_cmd()
        .arg("--bin")
        .arg(&stub)
        .arg("--json")
        .arg("list")
        .arg("sample.7z")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"operation\": \"list\""))
        .stdout(predicate::str::contains("\"status\": \"success\""))
        .stdout(predicate::str::contains("a.txt"));
}

#[cfg(unix)]
#[test]
fn test_info_reports_version() {
    let dir = TempDir::new().unwrap();
    let stub = write_stub(dir.path(), LISTING_STUB);

    sevex_cmd()
        .arg("--bin")
        .arg(&stub)
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("22.01"));
}

#[cfg(unix)]
#[test]
fn test_add_reports_created_archive() {
    let dir = TempDir::new().unwrap();
    let stub = write_stub(dir.path(), LISTING_STUB);
    let source = dir.path().join("src");
    std::fs::create_dir(&source).unwrap();
    let archive = dir.path().join("out.7z");

    sevex_cmd()
        .arg("--bin")
        .arg(&stub)
        .arg("add")
        .arg(&archive)
        .arg(&source)
        .assert()
        .success()
        .stdout(predicate::str::contains("Archive created"));
}

#[cfg(unix)]
#[test]
fn test_failing_binary_reports_error() {
    let dir = TempDir::new().unwrap();
    let stub = write_stub(dir.path(), "echo broken >&2\nexit 2\n");

    sevex_cmd()
        .arg("--bin")
        .arg(&stub)
        .arg("add")
        .arg(dir.path().join("out.7z"))
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken"));
}

#[cfg(unix)]
#[test]
fn test_missing_binary_override_is_actionable() {
    sevex_cmd()
        .arg("--bin")
        .arg("/definitely/not/a/binary")
        .arg("info")
        .assert()
        .failure()
        .stderr(predicate::str::contains("7-Zip"));
}
