//! Integration tests for the vimtabdiff CLI
//!
//! These tests run the binary against throwaway directory trees and check the
//! vim script, the listings and the failure modes.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

/// Test helper to get the CLI binary, isolated from the caller's environment
fn vimtabdiff_cmd(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("vimtabdiff").unwrap();
    cmd.current_dir(cwd)
        .env_remove("VIMTABDIFF_VIM")
        .env_remove("RUST_LOG");
    cmd
}

/// A/{foo.txt, bar/x.txt} against B/{foo.txt, baz.txt, bar/y.txt}
fn create_trees() -> (TempDir, PathBuf, PathBuf) {
    let dir = tempdir().unwrap();
    let a = dir.path().join("A");
    let b = dir.path().join("B");
    fs::create_dir_all(a.join("bar")).unwrap();
    fs::create_dir_all(b.join("bar")).unwrap();
    fs::write(a.join("foo.txt"), "left foo\n").unwrap();
    fs::write(b.join("foo.txt"), "right foo\n").unwrap();
    fs::write(b.join("baz.txt"), "baz\n").unwrap();
    fs::write(a.join("bar/x.txt"), "x\n").unwrap();
    fs::write(b.join("bar/y.txt"), "y\n").unwrap();
    (dir, a, b)
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn test_cli_help() {
    let dir = tempdir().unwrap();
    vimtabdiff_cmd(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("vim tab"))
        .stdout(predicate::str::contains("--onlydiffs"))
        .stdout(predicate::str::contains("--exclude"));
}

#[test]
fn test_cli_version() {
    let dir = tempdir().unwrap();
    vimtabdiff_cmd(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_requires_two_paths() {
    let dir = tempdir().unwrap();
    vimtabdiff_cmd(dir.path())
        .arg("only-one")
        .assert()
        .failure()
        .stderr(predicate::str::contains("PATH_B"));
}

#[test]
fn test_dry_run_prints_script() {
    let (tmp, a, b) = create_trees();
    let text = stdout_of(vimtabdiff_cmd(tmp.path()).arg("--dry").arg(&a).arg(&b));
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "let s:spr = &splitright");
    assert_eq!(lines[1], "set splitright");

    let tabs: Vec<&str> = lines.iter().copied().filter(|l| l.starts_with("tabedit ")).collect();
    assert_eq!(tabs.len(), 4);
    assert!(tabs[0].contains("A/baz.txt | vsp ") && tabs[0].ends_with("B/baz.txt"));
    assert!(tabs[1].contains("A/foo.txt | vsp ") && tabs[1].ends_with("B/foo.txt"));
    assert!(tabs[2].contains("A/bar/x.txt | vsp ") && tabs[2].ends_with("B/bar/x.txt"));
    assert!(tabs[3].contains("A/bar/y.txt | vsp ") && tabs[3].ends_with("B/bar/y.txt"));

    assert!(lines.contains(&"tabdo windo diffthis"));
    assert!(lines.contains(&"tabfirst | tabclose"));
    assert!(lines.last().unwrap().starts_with("call delete("));
    assert!(lines.iter().all(|l| l.trim_end() == *l));
}

#[test]
fn test_text_listing_follows_walk_order() {
    let (tmp, a, b) = create_trees();
    let text = stdout_of(
        vimtabdiff_cmd(tmp.path())
            .args(["--format", "text"])
            .arg(&a)
            .arg(&b),
    );

    let expected = format!(
        "-\t{b}/baz.txt\n{a}/foo.txt\t{b}/foo.txt\n{a}/bar/x.txt\t-\n-\t{b}/bar/y.txt\n",
        a = a.display(),
        b = b.display()
    );
    assert_eq!(text, expected);
}

#[test]
fn test_json_listing_is_one_object_per_line() {
    let (tmp, a, b) = create_trees();
    let text = stdout_of(
        vimtabdiff_cmd(tmp.path())
            .args(["--format", "json"])
            .arg(&a)
            .arg(&b),
    );

    let records: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    let statuses: Vec<&str> = records.iter().map(|r| r["status"].as_str().unwrap()).collect();
    assert_eq!(statuses, ["right_only", "both", "left_only", "right_only"]);
    assert!(records[0]["left"].is_null());
    assert!(records[2]["right"].is_null());
}

#[test]
fn test_git_flag_skips_git_directories() {
    let (tmp, a, b) = create_trees();
    fs::create_dir_all(a.join(".git")).unwrap();
    fs::write(a.join(".git/HEAD"), "ref: refs/heads/main\n").unwrap();
    fs::create_dir_all(b.join("bar/.git")).unwrap();
    fs::write(b.join("bar/.git/config"), "[core]\n").unwrap();

    let without = stdout_of(vimtabdiff_cmd(tmp.path()).args(["--format", "text"]).arg(&a).arg(&b));
    assert!(without.contains(".git/HEAD"));

    let with = stdout_of(
        vimtabdiff_cmd(tmp.path())
            .args(["--format", "text", "--git"])
            .arg(&a)
            .arg(&b),
    );
    assert!(!with.contains(".git"));
    assert_eq!(with.lines().count(), 4);
}

#[test]
fn test_exclude_accepts_comma_separated_patterns() {
    let (tmp, a, b) = create_trees();
    let text = stdout_of(
        vimtabdiff_cmd(tmp.path())
            .args(["--format", "text", "--exclude", "**/baz.txt,**/bar"])
            .arg(&a)
            .arg(&b),
    );
    assert_eq!(text.lines().count(), 1);
    assert!(text.contains("foo.txt"));
}

#[test]
fn test_onlydiffs_skips_identical_files() {
    let (tmp, a, b) = create_trees();
    fs::write(a.join("same.txt"), "same\n").unwrap();
    fs::write(b.join("same.txt"), "same\n").unwrap();

    let all = stdout_of(vimtabdiff_cmd(tmp.path()).args(["--format", "text"]).arg(&a).arg(&b));
    assert!(all.contains("same.txt"));

    let diffs = stdout_of(
        vimtabdiff_cmd(tmp.path())
            .args(["--format", "text", "--onlydiffs"])
            .arg(&a)
            .arg(&b),
    );
    assert!(!diffs.contains("same.txt"));
    assert!(diffs.contains("foo.txt"));
}

#[test]
fn test_config_file_supplies_excludes() {
    let (tmp, a, b) = create_trees();
    let config_path = tmp.path().join("tabdiff.yml");
    fs::write(&config_path, "exclude_patterns:\n  - \"**/bar\"\n").unwrap();

    let text = stdout_of(
        vimtabdiff_cmd(tmp.path())
            .args(["--format", "text", "--config"])
            .arg(&config_path)
            .arg(&a)
            .arg(&b),
    );
    assert!(!text.contains("bar/"));
    assert_eq!(text.lines().count(), 2);
}

#[test]
fn test_implicit_config_in_working_directory() {
    let (tmp, a, b) = create_trees();
    fs::write(tmp.path().join(".vimtabdiff.yml"), "only_diffs: false\nexclude_patterns: ['**/foo.txt']\n").unwrap();

    let text = stdout_of(vimtabdiff_cmd(tmp.path()).args(["--format", "text"]).arg(&a).arg(&b));
    assert!(!text.contains("foo.txt"));
}

#[test]
fn test_invalid_config_file_fails() {
    let (tmp, a, b) = create_trees();
    let config_path = tmp.path().join("broken.yml");
    fs::write(&config_path, "walk:\n  max_depth: [not, a, number]\n").unwrap();

    vimtabdiff_cmd(tmp.path())
        .arg("--config")
        .arg(&config_path)
        .arg(&a)
        .arg(&b)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_malformed_pattern_fails_before_walking() {
    let (tmp, a, b) = create_trees();
    vimtabdiff_cmd(tmp.path())
        .args(["--dry", "--exclude", "[oops"])
        .arg(&a)
        .arg(&b)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("[oops"));
}

#[test]
fn test_missing_root_fails() {
    let (tmp, a, _b) = create_trees();
    vimtabdiff_cmd(tmp.path())
        .arg("--dry")
        .arg(&a)
        .arg(tmp.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing"));
}

#[test]
fn test_file_as_root_fails() {
    let (tmp, a, b) = create_trees();
    vimtabdiff_cmd(tmp.path())
        .arg("--dry")
        .arg(a.join("foo.txt"))
        .arg(&b)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a directory"));
}

#[test]
fn test_max_depth_limit() {
    let (tmp, a, b) = create_trees();
    vimtabdiff_cmd(tmp.path())
        .args(["--format", "text", "--max-depth", "0"])
        .arg(&a)
        .arg(&b)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration validation failed"));

    vimtabdiff_cmd(tmp.path())
        .args(["--format", "text", "--max-depth", "1"])
        .arg(&a)
        .arg(&b)
        .assert()
        .success();
}

#[cfg(unix)]
#[test]
fn test_editor_is_launched_with_script() {
    let (tmp, a, b) = create_trees();
    vimtabdiff_cmd(tmp.path())
        .args(["--vim", "true"])
        .arg(&a)
        .arg(&b)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[cfg(unix)]
#[test]
fn test_failing_editor_is_reported() {
    let (tmp, a, b) = create_trees();
    vimtabdiff_cmd(tmp.path())
        .args(["--vim", "false"])
        .arg(&a)
        .arg(&b)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Editor 'false' failed"));
}

#[cfg(unix)]
#[test]
fn test_editor_from_environment() {
    let (tmp, a, b) = create_trees();
    vimtabdiff_cmd(tmp.path())
        .env("VIMTABDIFF_VIM", "false")
        .arg(&a)
        .arg(&b)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Editor 'false' failed"));
}

#[cfg(unix)]
fn create_non_utf8_trees() -> (TempDir, PathBuf, PathBuf, PathBuf) {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let (tmp, a, b) = create_trees();
    let name = PathBuf::from(OsStr::from_bytes(b"caf\xe9.txt"));
    fs::write(a.join(&name), "left\n").unwrap();
    fs::write(b.join(&name), "right\n").unwrap();
    (tmp, a, b, name)
}

#[cfg(unix)]
#[test]
fn test_json_listing_handles_non_utf8_names() {
    let (tmp, a, b, _name) = create_non_utf8_trees();
    let text = stdout_of(
        vimtabdiff_cmd(tmp.path())
            .args(["--format", "json"])
            .arg(&a)
            .arg(&b),
    );

    let records: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(records.len(), 5);
    let cafe = records
        .iter()
        .find(|r| r.get("left_bytes").is_some())
        .unwrap();
    assert_eq!(cafe["status"], "both");
    let bytes: Vec<u8> = serde_json::from_value(cafe["right_bytes"].clone()).unwrap();
    assert!(bytes.ends_with(b"/B/caf\xe9.txt"));
}

#[cfg(unix)]
#[test]
fn test_dry_run_names_non_utf8_files_exactly() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let (tmp, a, b, name) = create_non_utf8_trees();
    let output = vimtabdiff_cmd(tmp.path()).arg("--dry").arg(&a).arg(&b).output().unwrap();
    assert!(output.status.success());

    let tab = output
        .stdout
        .split(|&byte| byte == b'\n')
        .find(|line| line.ends_with(b"caf\xe9.txt"))
        .unwrap();
    let right = &tab[tab.windows(7).position(|w| w == b" | vsp ").unwrap() + 7..];
    let right = Path::new(OsStr::from_bytes(right));
    assert!(right.exists());
    assert!(right.ends_with(Path::new("B").join(&name)));
}

#[test]
fn test_rust_log_controls_log_level() {
    let (tmp, a, b) = create_trees();
    vimtabdiff_cmd(tmp.path())
        .env("RUST_LOG", "debug")
        .args(["--format", "text"])
        .arg(&a)
        .arg(&b)
        .assert()
        .success()
        .stderr(predicate::str::contains("Scanned"));

    vimtabdiff_cmd(tmp.path())
        .env("RUST_LOG", "warn")
        .args(["--format", "text"])
        .arg(&a)
        .arg(&b)
        .assert()
        .success()
        .stderr(predicate::str::contains("Scanned").not());
}
