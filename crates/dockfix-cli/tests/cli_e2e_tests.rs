//! CLI end-to-end tests that invoke the compiled `dockfix` binary.

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;
use pretty_assertions::assert_eq;

const BROKEN: &str = "\
FROM debian:bookworm-slim
RUN apt-get update \\
    && apt-get install -y --no-install-recommends \\
    && apt-get clean \\
    && rm -rf /var/lib/apt/lists/*
        curl \\
        git \\
        ca-certificates

WORKDIR /app
";

const FIXED: &str = "\
FROM debian:bookworm-slim
RUN apt-get update \\
    && apt-get install -y --no-install-recommends \\
        curl \\
        git \\
        ca-certificates \\
    && apt-get clean \\
    && rm -rf /var/lib/apt/lists/*

WORKDIR /app
";

/// Get a Command for the dockfix binary with colors off
fn dockfix_cmd(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("dockfix").expect("Failed to find dockfix binary");
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("DOCKFIX_CONFIG");
    cmd
}

// ============================================================================
// General
// ============================================================================

#[test]
fn test_help_lists_commands() {
    let temp = assert_fs::TempDir::new().unwrap();
    dockfix_cmd(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fix"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_no_command_prints_hint() {
    let temp = assert_fs::TempDir::new().unwrap();
    dockfix_cmd(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("dockfix --help"));
}

// ============================================================================
// fix
// ============================================================================

#[test]
fn test_fix_rewrites_dockerfile() {
    let temp = assert_fs::TempDir::new().unwrap();
    let dockerfile = temp.child("Dockerfile");
    dockerfile.write_str(BROKEN).unwrap();

    dockfix_cmd(temp.path())
        .arg("fix")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dockerfile: fixed - moved 3 packages"))
        .stdout(predicate::str::contains("(3 misplaced, +3 -3 lines)"))
        .stdout(predicate::str::contains("Summary: 1 fixed, 0 errors, 0 skipped"));

    dockerfile.assert(FIXED);
}

#[test]
fn test_fix_twice_is_stable() {
    let temp = assert_fs::TempDir::new().unwrap();
    let dockerfile = temp.child("Dockerfile");
    dockerfile.write_str(BROKEN).unwrap();

    dockfix_cmd(temp.path()).arg("fix").assert().success();
    dockfix_cmd(temp.path())
        .arg("fix")
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary: 0 fixed, 0 errors, 1 skipped"));

    dockerfile.assert(FIXED);
}

#[test]
fn test_fix_dry_run_leaves_file_alone() {
    let temp = assert_fs::TempDir::new().unwrap();
    let dockerfile = temp.child("Dockerfile");
    dockerfile.write_str(BROKEN).unwrap();

    dockfix_cmd(temp.path())
        .args(["fix", "--dry-run", "--diff"])
        .assert()
        .success()
        .stdout(predicate::str::contains("would fix"))
        .stdout(predicate::str::contains("+        ca-certificates \\"))
        .stdout(predicate::str::contains("Summary: 1 would fix"));

    dockerfile.assert(BROKEN);
}

#[test]
fn test_fix_walks_nested_variants() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("services/api/Dockerfile.prod").write_str(BROKEN).unwrap();
    temp.child("services/web/web.Dockerfile").write_str(FIXED).unwrap();
    temp.child("node_modules/pkg/Dockerfile").write_str(BROKEN).unwrap();
    temp.child("README.md").write_str(BROKEN).unwrap();

    dockfix_cmd(temp.path())
        .args(["fix", "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary: 1 fixed, 0 errors, 1 skipped"));

    temp.child("services/api/Dockerfile.prod").assert(FIXED);
    temp.child("node_modules/pkg/Dockerfile").assert(BROKEN);
    temp.child("README.md").assert(BROKEN);
}

#[test]
fn test_fix_missing_path_reports_error_and_continues() {
    let temp = assert_fs::TempDir::new().unwrap();
    let dockerfile = temp.child("Dockerfile");
    dockerfile.write_str(BROKEN).unwrap();

    dockfix_cmd(temp.path())
        .args(["fix", "Dockerfile", "missing/Dockerfile"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("missing"))
        .stdout(predicate::str::contains("Summary: 1 fixed, 1 errors, 0 skipped"));

    dockerfile.assert(FIXED);
}

#[test]
fn test_fix_json_report() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("Dockerfile").write_str(BROKEN).unwrap();

    let output = dockfix_cmd(temp.path())
        .args(["fix", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["fixed"], 1);
    assert_eq!(json["files"][0]["path"], "Dockerfile");
    assert_eq!(json["files"][0]["status"], "fixed");
    assert_eq!(json["files"][0]["packages"], 3);
    assert_eq!(json["files"][0]["diagnostic"], "fixed - moved 3 packages");
    assert_eq!(json["files"][0]["misplaced"], 3);
    assert_eq!(json["files"][0]["added"], 3);
    assert_eq!(json["files"][0]["removed"], 3);
    assert_eq!(json["added"], 3);
}

#[test]
fn test_check_json_lists_blocks() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("Dockerfile").write_str(BROKEN).unwrap();

    let output = dockfix_cmd(temp.path())
        .args(["check", "--json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let block = &json["files"][0]["blocks"][0];
    assert_eq!(json["files"][0]["status"], "would_fix");
    assert_eq!(block["start_line"], 3);
    assert_eq!(block["end_line"], 8);
    assert_eq!(block["packages"], 3);
    assert_eq!(block["misplaced"], 3);
}

#[test]
fn test_fix_indent_flag() {
    let temp = assert_fs::TempDir::new().unwrap();
    let dockerfile = temp.child("Dockerfile");
    dockerfile.write_str(BROKEN).unwrap();

    dockfix_cmd(temp.path())
        .args(["fix", "--indent", "tab"])
        .assert()
        .success();

    dockerfile.assert(predicate::str::contains("recommends \\\n\tcurl \\\n\tgit \\\n"));
}

#[test]
fn test_fix_reads_config_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child(".dockfix.toml")
        .write_str("file_names = [\"Containerfile\"]\nindent = \"  \"\n")
        .unwrap();
    let containerfile = temp.child("Containerfile");
    containerfile.write_str(BROKEN).unwrap();
    temp.child("Dockerfile").write_str(BROKEN).unwrap();

    dockfix_cmd(temp.path()).arg("fix").assert().success();

    containerfile.assert(predicate::str::contains("recommends \\\n  curl \\\n"));
    temp.child("Dockerfile").assert(BROKEN);
}

#[test]
fn test_fix_explicit_config_must_exist() {
    let temp = assert_fs::TempDir::new().unwrap();

    dockfix_cmd(temp.path())
        .args(["--config", "nope.toml", "fix"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_fix_rejects_unknown_config_keys() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child(".dockfix.toml").write_str("indnet = \"  \"\n").unwrap();

    dockfix_cmd(temp.path())
        .arg("fix")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse TOML config"));
}

// ============================================================================
// check
// ============================================================================

#[test]
fn test_check_fails_until_fixed() {
    let temp = assert_fs::TempDir::new().unwrap();
    let dockerfile = temp.child("Dockerfile");
    dockerfile.write_str(BROKEN).unwrap();

    dockfix_cmd(temp.path())
        .arg("check")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("would fix"));
    dockerfile.assert(BROKEN);

    dockfix_cmd(temp.path()).arg("fix").assert().success();
    dockfix_cmd(temp.path()).arg("check").assert().success();
}

#[test]
fn test_check_without_dockerfiles() {
    let temp = assert_fs::TempDir::new().unwrap();

    dockfix_cmd(temp.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("No Dockerfiles found"));
}
