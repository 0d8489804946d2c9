use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A throwaway home with its own config directory.
struct Env {
    tmp: TempDir,
}

impl Env {
    fn new() -> Self {
        Self {
            tmp: TempDir::new().unwrap(),
        }
    }

    fn home(&self) -> &Path {
        self.tmp.path()
    }

    fn hub(&self) -> PathBuf {
        self.home().join(".cache").join("huggingface").join("hub")
    }

    fn cmd(&self) -> Command {
        let mut cmd: Command = cargo_bin_cmd!("hfcache").into();
        cmd.current_dir(self.home());
        cmd.env("HOME", self.home());
        cmd.env("HFCACHE_CONFIG_DIR", self.home().join("config"));
        cmd.env_remove("XDG_CONFIG_HOME");
        cmd.env_remove("RUST_LOG");
        cmd.env("NO_COLOR", "1");
        cmd
    }

    fn config(&self) -> serde_json::Value {
        let raw = fs::read_to_string(self.home().join("config").join("config.json")).unwrap();
        serde_json::from_str(&raw).unwrap()
    }
}

fn add_blob(root: &Path, asset: &str, len: usize) {
    let blobs = root.join(asset).join("blobs");
    fs::create_dir_all(&blobs).unwrap();
    fs::write(blobs.join("blob"), vec![0u8; len]).unwrap();
}

// --- Binary startup ---

#[test]
fn binary_runs() {
    let mut cmd: Command = cargo_bin_cmd!("hfcache").into();
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("hfcache"));
}

// --- Scan ---

#[test]
fn scan_lists_assets() {
    let env = Env::new();
    let cache = env.home().join("cache");
    add_blob(&cache, "models--foo", 100);
    add_blob(&cache, "datasets--bar--baz", 30);
    fs::create_dir_all(cache.join("empty--qux")).unwrap();

    env.cmd()
        .args(["scan", cache.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Found 2 assets")
                .and(predicate::str::contains("models--foo (100B)"))
                .and(predicate::str::contains("datasets--bar--baz (30B)"))
                .and(predicate::str::contains("empty--qux").not()),
        );
}

#[test]
fn scan_limits_output() {
    let env = Env::new();
    let cache = env.home().join("cache");
    for i in 0..4 {
        add_blob(&cache, &format!("models--m{i}"), 1);
    }

    env.cmd()
        .args(["scan", cache.to_str().unwrap(), "--limit", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("... and 2 more"));
}

#[test]
fn scan_missing_directory_fails() {
    let env = Env::new();
    env.cmd()
        .args(["scan", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// --- List ---

#[test]
fn list_merges_default_and_custom() {
    let env = Env::new();
    add_blob(&env.hub(), "models--shared", 10);
    let custom = env.home().join("custom");
    add_blob(&custom, "models--shared", 20);
    add_blob(&custom, "datasets--squad", 5);

    env.cmd()
        .args(["dirs", "add", custom.to_str().unwrap()])
        .assert()
        .success();

    env.cmd()
        .args(["list", "--sort", "name"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("models--shared")
                .and(predicate::str::contains("datasets--squad"))
                .and(predicate::str::contains("1 models, 1 datasets")),
        )
        .stderr(predicate::str::contains("Skipped 1 duplicate"));
}

#[test]
fn list_json_carries_source_root() {
    let env = Env::new();
    add_blob(&env.hub(), "models--foo", 10);

    let output = env.cmd().args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());
    let assets: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(assets[0]["name"], "models--foo");
    assert_eq!(assets[0]["size_bytes"], 10);
    assert_eq!(assets[0]["kind"], "model");
    assert!(assets[0]["source_root"].as_str().unwrap().ends_with("hub"));
}

#[test]
fn list_without_assets() {
    let env = Env::new();
    env.cmd()
        .arg("list")
        .assert()
        .success()
        .stderr(predicate::str::contains("No assets found"));
}

#[test]
fn list_rejects_unknown_sort() {
    let env = Env::new();
    env.cmd().args(["list", "--sort", "bytes"]).assert().failure();
}

// --- Dirs ---

#[test]
fn dirs_add_is_idempotent() {
    let env = Env::new();
    let custom = env.home().join("custom");
    add_blob(&custom, "models--foo", 1);

    env.cmd()
        .args(["dirs", "add", custom.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Added directory"));
    env.cmd()
        .args(["dirs", "add", custom.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("already configured"));

    let dirs = env.config()["custom_directories"].as_array().unwrap().clone();
    assert_eq!(dirs.len(), 1);
}

#[test]
fn dirs_add_defaults_to_current_directory() {
    let env = Env::new();
    add_blob(env.home(), "models--here", 1);

    env.cmd().args(["dirs", "add"]).assert().success();

    let dirs = env.config()["custom_directories"].as_array().unwrap().clone();
    let expected = fs::canonicalize(env.home()).unwrap();
    assert_eq!(dirs[0].as_str().unwrap(), expected.to_str().unwrap());
}

#[test]
fn dirs_add_warns_on_unrecognized_directory() {
    let env = Env::new();
    let plain = env.home().join("plain");
    let other = env.home().join("other");
    fs::create_dir(&plain).unwrap();
    fs::create_dir(&other).unwrap();

    env.cmd()
        .args(["dirs", "add", plain.to_str().unwrap()])
        .assert()
        .success()
        .stderr(
            predicate::str::contains("doesn't appear")
                .and(predicate::str::contains("Added directory")),
        );

    env.cmd()
        .args(["dirs", "add", "--force", other.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("doesn't appear").not());

    let dirs = env.config()["custom_directories"].as_array().unwrap().clone();
    assert_eq!(dirs.len(), 2);
}

#[test]
fn dirs_add_missing_fails() {
    let env = Env::new();
    env.cmd()
        .args(["dirs", "add", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn dirs_remove() {
    let env = Env::new();
    let custom = env.home().join("custom");
    add_blob(&custom, "models--foo", 1);

    env.cmd()
        .args(["dirs", "add", custom.to_str().unwrap()])
        .assert()
        .success();
    env.cmd()
        .args(["dirs", "remove", custom.to_str().unwrap()])
        .assert()
        .success();
    assert!(env.config()["custom_directories"]
        .as_array()
        .unwrap()
        .is_empty());

    env.cmd()
        .args(["dirs", "remove", "/nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not configured"));
}

#[test]
fn dirs_toggle_default() {
    let env = Env::new();
    add_blob(&env.hub(), "models--foo", 10);

    env.cmd()
        .args(["dirs", "toggle-default"])
        .assert()
        .success()
        .stderr(predicate::str::contains("disabled"));
    assert_eq!(env.config()["include_default_cache"], false);

    env.cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("models--foo").not());

    env.cmd()
        .arg("dirs")
        .assert()
        .success()
        .stdout(predicate::str::contains("Disabled"));
}

#[test]
fn dirs_show_marks_missing() {
    let env = Env::new();
    let custom = env.home().join("custom");
    add_blob(&custom, "models--foo", 1);

    env.cmd()
        .args(["dirs", "add", custom.to_str().unwrap()])
        .assert()
        .success();
    fs::remove_dir_all(&custom).unwrap();

    env.cmd()
        .arg("dirs")
        .assert()
        .success()
        .stdout(predicate::str::contains("✗").and(predicate::str::contains("custom")));
}

#[test]
fn dirs_validate() {
    let env = Env::new();
    add_blob(&env.hub(), "models--foo", 1);

    env.cmd()
        .args(["dirs", "validate", env.hub().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("looks like"));
    env.cmd()
        .args(["dirs", "validate", env.home().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("doesn't appear"));
}
